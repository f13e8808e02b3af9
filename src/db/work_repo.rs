use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::common::AppError;
use crate::models::{CreateWorkRequest, UpdateWorkRequest, Work};

#[derive(Clone)]
pub struct WorkRepository {
    pool: PgPool,
}

impl WorkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Work>, AppError> {
        let works = sqlx::query_as::<_, Work>("SELECT * FROM works ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(works)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Work>, AppError> {
        let work = sqlx::query_as::<_, Work>("SELECT * FROM works WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(work)
    }

    pub async fn find_by_article(&self, article: &str) -> Result<Option<Work>, AppError> {
        let work = sqlx::query_as::<_, Work>("SELECT * FROM works WHERE article = $1")
            .bind(article)
            .fetch_optional(&self.pool)
            .await?;
        Ok(work)
    }

    pub async fn find_by_brand(&self, brand_id: Uuid) -> Result<Vec<Work>, AppError> {
        let works =
            sqlx::query_as::<_, Work>("SELECT * FROM works WHERE brand_id = $1 ORDER BY name ASC")
                .bind(brand_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(works)
    }

    pub async fn find_by_car_model(&self, car_model_id: Uuid) -> Result<Vec<Work>, AppError> {
        let works = sqlx::query_as::<_, Work>(
            "SELECT * FROM works WHERE car_model_id = $1 ORDER BY name ASC",
        )
        .bind(car_model_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(works)
    }

    pub async fn create(&self, req: &CreateWorkRequest) -> Result<Work, AppError> {
        req.validate()?;
        sqlx::query_as::<_, Work>(
            r#"
            INSERT INTO works (article, name, norm_hours, brand_id, car_model_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&req.article)
        .bind(&req.name)
        .bind(req.norm_hours)
        .bind(req.brand_id)
        .bind(req.car_model_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_conflict(e, &req.article))
    }

    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdateWorkRequest,
    ) -> Result<Option<Work>, AppError> {
        req.validate()?;
        let work = sqlx::query_as::<_, Work>(
            r#"
            UPDATE works
            SET article = COALESCE($1, article),
                name = COALESCE($2, name),
                norm_hours = COALESCE($3, norm_hours),
                brand_id = COALESCE($4, brand_id),
                car_model_id = COALESCE($5, car_model_id),
                updated_at = now()
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(&req.article)
        .bind(&req.name)
        .bind(req.norm_hours)
        .bind(req.brand_id)
        .bind(req.car_model_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::map_conflict(e, req.article.as_deref().unwrap_or_default()))?;
        Ok(work)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM works WHERE id = $1")
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
