use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::common::AppError;
use crate::models::{
    CreateServiceCampaignRequest, ServiceCampaign, ServiceCampaignStatus,
    UpdateServiceCampaignRequest,
};

#[derive(Clone)]
pub struct ServiceCampaignRepository {
    pool: PgPool,
}

impl ServiceCampaignRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<ServiceCampaign>, AppError> {
        let campaigns = sqlx::query_as::<_, ServiceCampaign>(
            "SELECT * FROM service_campaigns ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(campaigns)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ServiceCampaign>, AppError> {
        let campaign =
            sqlx::query_as::<_, ServiceCampaign>("SELECT * FROM service_campaigns WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(campaign)
    }

    pub async fn find_by_article(
        &self,
        article: &str,
    ) -> Result<Option<ServiceCampaign>, AppError> {
        let campaign = sqlx::query_as::<_, ServiceCampaign>(
            "SELECT * FROM service_campaigns WHERE article = $1",
        )
        .bind(article)
        .fetch_optional(&self.pool)
        .await?;
        Ok(campaign)
    }

    pub async fn find_by_brand(&self, brand_id: Uuid) -> Result<Vec<ServiceCampaign>, AppError> {
        let campaigns = sqlx::query_as::<_, ServiceCampaign>(
            "SELECT * FROM service_campaigns WHERE brand_id = $1 ORDER BY created_at DESC",
        )
        .bind(brand_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(campaigns)
    }

    pub async fn find_by_car_model(
        &self,
        car_model_id: Uuid,
    ) -> Result<Vec<ServiceCampaign>, AppError> {
        let campaigns = sqlx::query_as::<_, ServiceCampaign>(
            "SELECT * FROM service_campaigns WHERE car_model_id = $1 ORDER BY created_at DESC",
        )
        .bind(car_model_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(campaigns)
    }

    /// Open campaigns, mandatory ones first.
    pub async fn find_active(&self) -> Result<Vec<ServiceCampaign>, AppError> {
        let campaigns = sqlx::query_as::<_, ServiceCampaign>(
            r#"
            SELECT * FROM service_campaigns
            WHERE status = 'active'
            ORDER BY is_mandatory DESC, created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(campaigns)
    }

    /// Campaigns whose target list contains the VIN, plus the blanket
    /// campaigns that target every car of their model. The containment arm
    /// is served by the GIN index on `target_vins`.
    pub async fn find_targeting_vin(&self, vin: &str) -> Result<Vec<ServiceCampaign>, AppError> {
        let campaigns = sqlx::query_as::<_, ServiceCampaign>(
            r#"
            SELECT * FROM service_campaigns
            WHERE target_vins @> $1 OR cardinality(target_vins) = 0
            ORDER BY is_mandatory DESC, created_at DESC
            "#,
        )
        .bind(vec![vin.to_string()])
        .fetch_all(&self.pool)
        .await?;
        Ok(campaigns)
    }

    pub async fn create(
        &self,
        req: &CreateServiceCampaignRequest,
    ) -> Result<ServiceCampaign, AppError> {
        req.validate()?;
        sqlx::query_as::<_, ServiceCampaign>(
            r#"
            INSERT INTO service_campaigns
                (article, name, description, brand_id, car_model_id,
                 target_vins, required_parts, required_works, is_mandatory)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&req.article)
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.brand_id)
        .bind(req.car_model_id)
        .bind(&req.target_vins)
        .bind(&req.required_parts)
        .bind(&req.required_works)
        .bind(req.is_mandatory)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_conflict(e, &req.article))
    }

    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdateServiceCampaignRequest,
    ) -> Result<Option<ServiceCampaign>, AppError> {
        req.validate()?;
        let campaign = sqlx::query_as::<_, ServiceCampaign>(
            r#"
            UPDATE service_campaigns
            SET article = COALESCE($1, article),
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                brand_id = COALESCE($4, brand_id),
                car_model_id = COALESCE($5, car_model_id),
                target_vins = COALESCE($6, target_vins),
                required_parts = COALESCE($7, required_parts),
                required_works = COALESCE($8, required_works),
                is_mandatory = COALESCE($9, is_mandatory),
                is_completed = COALESCE($10, is_completed),
                status = COALESCE($11, status),
                updated_at = now()
            WHERE id = $12
            RETURNING *
            "#,
        )
        .bind(&req.article)
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.brand_id)
        .bind(req.car_model_id)
        .bind(&req.target_vins)
        .bind(&req.required_parts)
        .bind(&req.required_works)
        .bind(req.is_mandatory)
        .bind(req.is_completed)
        .bind(req.status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::map_conflict(e, req.article.as_deref().unwrap_or_default()))?;
        Ok(campaign)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: ServiceCampaignStatus,
    ) -> Result<Option<ServiceCampaign>, AppError> {
        let campaign = sqlx::query_as::<_, ServiceCampaign>(
            r#"
            UPDATE service_campaigns
            SET status = $1,
                is_completed = ($1 = 'completed'::service_campaign_status),
                updated_at = now()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(campaign)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM service_campaigns WHERE id = $1")
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
