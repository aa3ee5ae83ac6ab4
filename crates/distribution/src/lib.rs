//! `medstock-distribution` — historical distribution transactions.
//!
//! A `Distribution` is written once by the distribution workflow and never
//! mutated afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use medstock_core::{DistributionId, MedicineId, UserId};

/// Lifecycle state of a distribution transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistributionStatus {
    Completed,
    Pending,
    Cancelled,
}

impl DistributionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Pending => "Pending",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl core::fmt::Display for DistributionStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for DistributionStatus {
    type Err = medstock_core::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Completed" => Ok(Self::Completed),
            "Pending" => Ok(Self::Pending),
            "Cancelled" => Ok(Self::Cancelled),
            other => Err(medstock_core::DomainError::validation(format!(
                "unknown distribution status: {other}"
            ))),
        }
    }
}

/// One recorded handover of medicine stock to an officer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub id: DistributionId,
    pub officer_id: UserId,
    pub medicine_id: MedicineId,
    pub quantity: i32,
    pub date: NaiveDate,
    pub status: DistributionStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for s in [
            DistributionStatus::Completed,
            DistributionStatus::Pending,
            DistributionStatus::Cancelled,
        ] {
            assert_eq!(s.as_str().parse::<DistributionStatus>().unwrap(), s);
        }
        assert!("Done".parse::<DistributionStatus>().is_err());
    }
}
