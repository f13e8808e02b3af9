use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::common::AppError;
use crate::models::{Brand, CreateBrandRequest, UpdateBrandRequest};

/// Storage for the brand catalog. Deleting a brand cascades to its car
/// models (and from there to nothing else; cars and parts keep nullable
/// references).
#[derive(Clone)]
pub struct BrandRepository {
    pool: PgPool,
}

impl BrandRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Brand>, AppError> {
        let brands = sqlx::query_as::<_, Brand>("SELECT * FROM brands ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(brands)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Brand>, AppError> {
        let brand = sqlx::query_as::<_, Brand>("SELECT * FROM brands WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(brand)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Brand>, AppError> {
        let brand = sqlx::query_as::<_, Brand>("SELECT * FROM brands WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(brand)
    }

    pub async fn find_by_country(&self, country: &str) -> Result<Vec<Brand>, AppError> {
        let brands =
            sqlx::query_as::<_, Brand>("SELECT * FROM brands WHERE country = $1 ORDER BY name ASC")
                .bind(country)
                .fetch_all(&self.pool)
                .await?;
        Ok(brands)
    }

    pub async fn create(&self, req: &CreateBrandRequest) -> Result<Brand, AppError> {
        req.validate()?;
        sqlx::query_as::<_, Brand>(
            "INSERT INTO brands (name, country) VALUES ($1, $2) RETURNING *",
        )
        .bind(&req.name)
        .bind(&req.country)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_conflict(e, &req.name))
    }

    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdateBrandRequest,
    ) -> Result<Option<Brand>, AppError> {
        req.validate()?;
        let brand = sqlx::query_as::<_, Brand>(
            r#"
            UPDATE brands
            SET name = COALESCE($1, name),
                country = COALESCE($2, country),
                updated_at = now()
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(&req.name)
        .bind(&req.country)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::map_conflict(e, req.name.as_deref().unwrap_or_default()))?;
        Ok(brand)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM brands WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    fn map_conflict(e: sqlx::Error, name: &str) -> AppError {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return AppError::BrandAlreadyExists(name.to_string());
            }
        }
        AppError::from_db(e)
    }
}
