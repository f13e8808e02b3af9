use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::common::AppError;
use crate::models::{CreateCustomerRequest, Customer, UpdateCustomerRequest};

#[derive(Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Customer>, AppError> {
        let customers =
            sqlx::query_as::<_, Customer>("SELECT * FROM customers ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(customers)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(customer)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(customer)
    }

    pub async fn create(&self, req: &CreateCustomerRequest) -> Result<Customer, AppError> {
        req.validate()?;
        sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (first_name, last_name, email, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.email)
        .bind(&req.phone)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_conflict(e, &req.email))
    }

    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdateCustomerRequest,
    ) -> Result<Option<Customer>, AppError> {
        req.validate()?;
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET first_name = COALESCE($1, first_name),
                last_name = COALESCE($2, last_name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone)
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.email)
        .bind(&req.phone)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::map_conflict(e, req.email.as_deref().unwrap_or_default()))?;
        Ok(customer)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    fn map_conflict(e: sqlx::Error, email: &str) -> AppError {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return AppError::EmailAlreadyExists(email.to_string());
            }
        }
        AppError::from_db(e)
    }
}
