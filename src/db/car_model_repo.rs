use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::common::AppError;
use crate::models::{CarModel, CreateCarModelRequest, UpdateCarModelRequest};

#[derive(Clone)]
pub struct CarModelRepository {
    pool: PgPool,
}

impl CarModelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<CarModel>, AppError> {
        let models = sqlx::query_as::<_, CarModel>("SELECT * FROM car_models ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(models)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CarModel>, AppError> {
        let model = sqlx::query_as::<_, CarModel>("SELECT * FROM car_models WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(model)
    }

    pub async fn find_by_brand(&self, brand_id: Uuid) -> Result<Vec<CarModel>, AppError> {
        let models = sqlx::query_as::<_, CarModel>(
            "SELECT * FROM car_models WHERE brand_id = $1 ORDER BY name ASC",
        )
        .bind(brand_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(models)
    }

    /// Model names are only unique per brand, so a bare name may match
    /// several rows.
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<CarModel>, AppError> {
        let models = sqlx::query_as::<_, CarModel>(
            "SELECT * FROM car_models WHERE name = $1 ORDER BY created_at DESC",
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;
        Ok(models)
    }

    pub async fn create(&self, req: &CreateCarModelRequest) -> Result<CarModel, AppError> {
        req.validate()?;
        sqlx::query_as::<_, CarModel>(
            "INSERT INTO car_models (name, brand_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(&req.name)
        .bind(req.brand_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_conflict(e, &req.name))
    }

    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdateCarModelRequest,
    ) -> Result<Option<CarModel>, AppError> {
        req.validate()?;
        let model = sqlx::query_as::<_, CarModel>(
            r#"
            UPDATE car_models
            SET name = COALESCE($1, name),
                brand_id = COALESCE($2, brand_id),
                updated_at = now()
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(&req.name)
        .bind(req.brand_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::map_conflict(e, req.name.as_deref().unwrap_or_default()))?;
        Ok(model)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM car_models WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    fn map_conflict(e: sqlx::Error, name: &str) -> AppError {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return AppError::CarModelAlreadyExists(name.to_string());
            }
            if db_err.is_foreign_key_violation() {
                return AppError::MissingReference("brand");
            }
        }
        AppError::from_db(e)
    }
}
