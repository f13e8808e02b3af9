use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::common::AppError;
use crate::models::{CreatePartRequest, Part, UpdatePartRequest};

#[derive(Clone)]
pub struct PartRepository {
    pool: PgPool,
}

impl PartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Part>, AppError> {
        let parts = sqlx::query_as::<_, Part>("SELECT * FROM parts ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(parts)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Part>, AppError> {
        let part = sqlx::query_as::<_, Part>("SELECT * FROM parts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(part)
    }

    pub async fn find_by_article(&self, article: &str) -> Result<Option<Part>, AppError> {
        let part = sqlx::query_as::<_, Part>("SELECT * FROM parts WHERE article = $1")
            .bind(article)
            .fetch_optional(&self.pool)
            .await?;
        Ok(part)
    }

    pub async fn find_by_brand(&self, brand_id: Uuid) -> Result<Vec<Part>, AppError> {
        let parts =
            sqlx::query_as::<_, Part>("SELECT * FROM parts WHERE brand_id = $1 ORDER BY name ASC")
                .bind(brand_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(parts)
    }

    pub async fn find_by_car_model(&self, car_model_id: Uuid) -> Result<Vec<Part>, AppError> {
        let parts = sqlx::query_as::<_, Part>(
            "SELECT * FROM parts WHERE car_model_id = $1 ORDER BY name ASC",
        )
        .bind(car_model_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(parts)
    }

    /// Parts whose compatibility list contains the VIN; containment is
    /// served by the GIN index on `compatible_vins`.
    pub async fn find_compatible_with_vin(&self, vin: &str) -> Result<Vec<Part>, AppError> {
        let parts = sqlx::query_as::<_, Part>(
            "SELECT * FROM parts WHERE compatible_vins @> $1 ORDER BY name ASC",
        )
        .bind(vec![vin.to_string()])
        .fetch_all(&self.pool)
        .await?;
        Ok(parts)
    }

    pub async fn create(&self, req: &CreatePartRequest) -> Result<Part, AppError> {
        req.validate()?;
        sqlx::query_as::<_, Part>(
            r#"
            INSERT INTO parts (article, name, model, brand_id, car_model_id,
                               purchase_price, sale_price, compatible_vins)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&req.article)
        .bind(&req.name)
        .bind(&req.model)
        .bind(req.brand_id)
        .bind(req.car_model_id)
        .bind(req.purchase_price)
        .bind(req.sale_price)
        .bind(&req.compatible_vins)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_conflict(e, &req.article))
    }

    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdatePartRequest,
    ) -> Result<Option<Part>, AppError> {
        req.validate()?;
        let part = sqlx::query_as::<_, Part>(
            r#"
            UPDATE parts
            SET article = COALESCE($1, article),
                name = COALESCE($2, name),
                model = COALESCE($3, model),
                brand_id = COALESCE($4, brand_id),
                car_model_id = COALESCE($5, car_model_id),
                purchase_price = COALESCE($6, purchase_price),
                sale_price = COALESCE($7, sale_price),
                compatible_vins = COALESCE($8, compatible_vins),
                updated_at = now()
            WHERE id = $9
            RETURNING *
            "#,
        )
        .bind(&req.article)
        .bind(&req.name)
        .bind(&req.model)
        .bind(req.brand_id)
        .bind(req.car_model_id)
        .bind(req.purchase_price)
        .bind(req.sale_price)
        .bind(&req.compatible_vins)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::map_conflict(e, req.article.as_deref().unwrap_or_default()))?;
        Ok(part)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM parts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    fn map_conflict(e: sqlx::Error, article: &str) -> AppError {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return AppError::ArticleAlreadyExists(article.to_string());
            }
            if db_err.is_foreign_key_violation() {
                let constraint = db_err.constraint().unwrap_or_default();
                if constraint.contains("brand_id") {
                    return AppError::MissingReference("brand");
                }
                if constraint.contains("car_model_id") {
                    return AppError::MissingReference("car model");
                }
            }
        }
        AppError::from_db(e)
    }
}
