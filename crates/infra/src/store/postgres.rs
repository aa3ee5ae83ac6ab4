//! Postgres-backed store implementation.
//!
//! The `distribute` workflow runs in a single transaction with a
//! `SELECT ... FOR UPDATE` row lock on the medicine, so the stock check,
//! decrement and history insert commit together or not at all. Concurrent
//! distributions serialize on the row lock and cannot drive stock negative.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use medstock_auth::{Role, User};
use medstock_core::{BatchId, DistributionId, DomainError, MedicineId, UserId};
use medstock_distribution::{Distribution, DistributionStatus};
use medstock_inventory::Medicine;
use medstock_stock::StockBatch;

use super::r#trait::{BatchStore, DistributionStore, MedicineStore, StoreError, UserStore};

/// Postgres-backed store. Cheap to clone; all methods use the shared pool.
///
/// Schema lives in `crates/infra/migrations/0001_init.sql`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply the bundled schema (idempotent; used at startup and in tests).
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::raw_sql(include_str!("../../migrations/0001_init.sql"))
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

fn medicine_from_row(row: &PgRow) -> Result<Medicine, StoreError> {
    Ok(Medicine {
        id: MedicineId::from_uuid(row.try_get::<Uuid, _>("id")?),
        name: row.try_get("name")?,
        dosage: row.try_get("dosage")?,
        manufacturer: row.try_get("manufacturer")?,
        category: row.try_get("category")?,
        stock: row.try_get("stock")?,
        expiration_date: row.try_get("expiration_date")?,
        instructions: row.try_get("instructions")?,
    })
}

fn batch_from_row(row: &PgRow) -> Result<StockBatch, StoreError> {
    Ok(StockBatch {
        id: BatchId::from_uuid(row.try_get::<Uuid, _>("id")?),
        medicine_id: MedicineId::from_uuid(row.try_get::<Uuid, _>("medicine_id")?),
        quantity: row.try_get("quantity")?,
        batch_number: row.try_get("batch_number")?,
        expiry_date: row.try_get("expiry_date")?,
        received_date: row.try_get("received_date")?,
        supplier: row.try_get("supplier")?,
        unit_price: row.try_get("unit_price")?,
        reorder_level: row.try_get("reorder_level")?,
    })
}

fn user_from_row(row: &PgRow) -> Result<User, StoreError> {
    let role: String = row.try_get("role")?;
    Ok(User {
        id: UserId::from_uuid(row.try_get::<Uuid, _>("id")?),
        username: row.try_get("username")?,
        password_hash: row.try_get("password_hash")?,
        role: role
            .parse::<Role>()
            .map_err(|e| StoreError::backend(format!("corrupt role column: {e}")))?,
    })
}

fn distribution_from_row(row: &PgRow) -> Result<Distribution, StoreError> {
    let status: String = row.try_get("status")?;
    Ok(Distribution {
        id: DistributionId::from_uuid(row.try_get::<Uuid, _>("id")?),
        officer_id: UserId::from_uuid(row.try_get::<Uuid, _>("officer_id")?),
        medicine_id: MedicineId::from_uuid(row.try_get::<Uuid, _>("medicine_id")?),
        quantity: row.try_get("quantity")?,
        date: row.try_get("date")?,
        status: status
            .parse::<DistributionStatus>()
            .map_err(|e| StoreError::backend(format!("corrupt status column: {e}")))?,
    })
}

#[async_trait]
impl MedicineStore for PostgresStore {
    async fn insert_medicine(&self, medicine: Medicine) -> Result<Medicine, StoreError> {
        sqlx::query(
            "INSERT INTO medicines \
             (id, name, dosage, manufacturer, category, stock, expiration_date, instructions) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(medicine.id.as_uuid())
        .bind(&medicine.name)
        .bind(&medicine.dosage)
        .bind(&medicine.manufacturer)
        .bind(&medicine.category)
        .bind(medicine.stock)
        .bind(medicine.expiration_date)
        .bind(&medicine.instructions)
        .execute(&self.pool)
        .await?;
        Ok(medicine)
    }

    async fn find_medicine(&self, id: MedicineId) -> Result<Option<Medicine>, StoreError> {
        let row = sqlx::query("SELECT * FROM medicines WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(medicine_from_row).transpose()
    }

    async fn list_medicines(&self) -> Result<Vec<Medicine>, StoreError> {
        let rows = sqlx::query("SELECT * FROM medicines ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(medicine_from_row).collect()
    }

    async fn update_medicine(&self, medicine: Medicine) -> Result<Medicine, StoreError> {
        let result = sqlx::query(
            "UPDATE medicines SET name = $2, dosage = $3, manufacturer = $4, category = $5, \
             stock = $6, expiration_date = $7, instructions = $8 WHERE id = $1",
        )
        .bind(medicine.id.as_uuid())
        .bind(&medicine.name)
        .bind(&medicine.dosage)
        .bind(&medicine.manufacturer)
        .bind(&medicine.category)
        .bind(medicine.stock)
        .bind(medicine.expiration_date)
        .bind(&medicine.instructions)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("medicine").into());
        }
        Ok(medicine)
    }

    async fn delete_medicine(&self, id: MedicineId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM medicines WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn medicines_expiring_on_or_before(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<Medicine>, StoreError> {
        let rows = sqlx::query("SELECT * FROM medicines WHERE expiration_date <= $1 ORDER BY id")
            .bind(date)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(medicine_from_row).collect()
    }

    async fn medicines_expired_before(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<Medicine>, StoreError> {
        let rows = sqlx::query("SELECT * FROM medicines WHERE expiration_date < $1 ORDER BY id")
            .bind(date)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(medicine_from_row).collect()
    }

    async fn medicines_low_stock(&self, threshold: i32) -> Result<Vec<Medicine>, StoreError> {
        let rows = sqlx::query("SELECT * FROM medicines WHERE stock < $1 ORDER BY id")
            .bind(threshold)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(medicine_from_row).collect()
    }

    async fn count_medicines(&self) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM medicines")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }
}

#[async_trait]
impl BatchStore for PostgresStore {
    async fn insert_batch(&self, batch: StockBatch) -> Result<StockBatch, StoreError> {
        sqlx::query(
            "INSERT INTO stock_batches \
             (id, medicine_id, quantity, batch_number, expiry_date, received_date, supplier, \
              unit_price, reorder_level) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(batch.id.as_uuid())
        .bind(batch.medicine_id.as_uuid())
        .bind(batch.quantity)
        .bind(&batch.batch_number)
        .bind(batch.expiry_date)
        .bind(batch.received_date)
        .bind(&batch.supplier)
        .bind(batch.unit_price)
        .bind(batch.reorder_level)
        .execute(&self.pool)
        .await?;
        Ok(batch)
    }

    async fn find_batch(&self, id: BatchId) -> Result<Option<StockBatch>, StoreError> {
        let row = sqlx::query("SELECT * FROM stock_batches WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(batch_from_row).transpose()
    }

    async fn list_batches(&self) -> Result<Vec<StockBatch>, StoreError> {
        let rows = sqlx::query("SELECT * FROM stock_batches ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(batch_from_row).collect()
    }

    async fn update_batch(&self, batch: StockBatch) -> Result<StockBatch, StoreError> {
        let result = sqlx::query(
            "UPDATE stock_batches SET medicine_id = $2, quantity = $3, batch_number = $4, \
             expiry_date = $5, received_date = $6, supplier = $7, unit_price = $8, \
             reorder_level = $9 WHERE id = $1",
        )
        .bind(batch.id.as_uuid())
        .bind(batch.medicine_id.as_uuid())
        .bind(batch.quantity)
        .bind(&batch.batch_number)
        .bind(batch.expiry_date)
        .bind(batch.received_date)
        .bind(&batch.supplier)
        .bind(batch.unit_price)
        .bind(batch.reorder_level)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("stock").into());
        }
        Ok(batch)
    }

    async fn delete_batch(&self, id: BatchId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM stock_batches WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn batches_expiring_on_or_before(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<StockBatch>, StoreError> {
        let rows = sqlx::query("SELECT * FROM stock_batches WHERE expiry_date <= $1 ORDER BY id")
            .bind(date)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(batch_from_row).collect()
    }
}

#[async_trait]
impl UserStore for PostgresStore {
    async fn insert_user(&self, user: User) -> Result<User, StoreError> {
        sqlx::query(
            "INSERT INTO users (id, username, password_hash, role) VALUES ($1, $2, $3, $4)",
        )
        .bind(user.id.as_uuid())
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .execute(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn list_users_by_role(&self, role: Role) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query("SELECT * FROM users WHERE role = $1 ORDER BY id")
            .bind(role.as_str())
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(user_from_row).collect()
    }

    async fn count_users(&self) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }
}

#[async_trait]
impl DistributionStore for PostgresStore {
    async fn list_distributions(&self) -> Result<Vec<Distribution>, StoreError> {
        let rows = sqlx::query("SELECT * FROM distributions ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(distribution_from_row).collect()
    }

    async fn distribute(
        &self,
        officer_id: UserId,
        medicine_id: MedicineId,
        quantity: i32,
        date: NaiveDate,
    ) -> Result<Distribution, StoreError> {
        let mut tx = self.pool.begin().await?;

        let officer_exists: Option<i32> = sqlx::query_scalar("SELECT 1 FROM users WHERE id = $1")
            .bind(officer_id.as_uuid())
            .fetch_optional(&mut *tx)
            .await?;
        if officer_exists.is_none() {
            return Err(DomainError::not_found("officer").into());
        }

        // Row lock: concurrent distributions against the same medicine
        // serialize here.
        let stock: Option<i32> =
            sqlx::query_scalar("SELECT stock FROM medicines WHERE id = $1 FOR UPDATE")
                .bind(medicine_id.as_uuid())
                .fetch_optional(&mut *tx)
                .await?;
        let available = match stock {
            Some(s) => s,
            None => return Err(DomainError::not_found("medicine").into()),
        };

        if available < quantity {
            return Err(DomainError::InsufficientStock {
                requested: quantity,
                available,
            }
            .into());
        }

        sqlx::query("UPDATE medicines SET stock = stock - $2 WHERE id = $1")
            .bind(medicine_id.as_uuid())
            .bind(quantity)
            .execute(&mut *tx)
            .await?;

        let distribution = Distribution {
            id: DistributionId::new(),
            officer_id,
            medicine_id,
            quantity,
            date,
            status: DistributionStatus::Completed,
        };

        sqlx::query(
            "INSERT INTO distributions (id, officer_id, medicine_id, quantity, date, status) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(distribution.id.as_uuid())
        .bind(distribution.officer_id.as_uuid())
        .bind(distribution.medicine_id.as_uuid())
        .bind(distribution.quantity)
        .bind(distribution.date)
        .bind(distribution.status.as_str())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(distribution)
    }
}
