use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::common::AppError;
use crate::models::{CreatePurchaseRequest, PurchaseRequest, RequestStatus};

/// Storage for purchase requests, the join entity between cars and
/// customers. The one-pending-request-per-pair invariant lives in the
/// schema (partial unique index) and is surfaced here as
/// `DuplicatePendingRequest`.
#[derive(Clone)]
pub struct PurchaseRequestRepository {
    pool: PgPool,
}

impl PurchaseRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<PurchaseRequest>, AppError> {
        let requests = sqlx::query_as::<_, PurchaseRequest>(
            "SELECT * FROM purchase_requests ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<PurchaseRequest>, AppError> {
        let request =
            sqlx::query_as::<_, PurchaseRequest>("SELECT * FROM purchase_requests WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(request)
    }

    pub async fn find_by_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<PurchaseRequest>, AppError> {
        let requests = sqlx::query_as::<_, PurchaseRequest>(
            "SELECT * FROM purchase_requests WHERE customer_id = $1 ORDER BY created_at DESC",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }

    pub async fn find_by_car(&self, car_id: Uuid) -> Result<Vec<PurchaseRequest>, AppError> {
        let requests = sqlx::query_as::<_, PurchaseRequest>(
            "SELECT * FROM purchase_requests WHERE car_id = $1 ORDER BY created_at DESC",
        )
        .bind(car_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }

    pub async fn find_by_status(
        &self,
        status: RequestStatus,
    ) -> Result<Vec<PurchaseRequest>, AppError> {
        let requests = sqlx::query_as::<_, PurchaseRequest>(
            "SELECT * FROM purchase_requests WHERE status = $1 ORDER BY created_at DESC",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }

    /// Inserts a new request; the status column defaults to Pending. A
    /// second pending request for the same (car, customer) pair trips the
    /// partial unique index; a dangling car or customer id trips the
    /// foreign keys.
    pub async fn create(&self, req: &CreatePurchaseRequest) -> Result<PurchaseRequest, AppError> {
        req.validate()?;
        sqlx::query_as::<_, PurchaseRequest>(
            r#"
            INSERT INTO purchase_requests (car_id, customer_id, offer_price, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(req.car_id)
        .bind(req.customer_id)
        .bind(req.offer_price)
        .bind(&req.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(Self::map_conflict)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: RequestStatus,
    ) -> Result<Option<PurchaseRequest>, AppError> {
        let request = sqlx::query_as::<_, PurchaseRequest>(
            r#"
            UPDATE purchase_requests
            SET status = $1, updated_at = now()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        // Reverting a request to Pending can collide with a newer pending
        // request for the same pair.
        .map_err(Self::map_conflict)?;
        Ok(request)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM purchase_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    fn map_conflict(e: sqlx::Error) -> AppError {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return AppError::DuplicatePendingRequest;
            }
            if db_err.is_foreign_key_violation() {
                let constraint = db_err.constraint().unwrap_or_default();
                if constraint.contains("car_id") {
                    return AppError::MissingReference("car");
                }
                if constraint.contains("customer_id") {
                    return AppError::MissingReference("customer");
                }
            }
        }
        AppError::from_db(e)
    }
}
