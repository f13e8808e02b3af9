use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::common::AppError;
use crate::models::{Car, CarStatus, CreateCarRequest, ServiceCampaign, UpdateCarRequest};

/// All interactions with the `cars` table, including the per-car record of
/// completed service campaigns.
#[derive(Clone)]
pub struct CarRepository {
    pool: PgPool,
}

impl CarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Car>, AppError> {
        let cars = sqlx::query_as::<_, Car>("SELECT * FROM cars ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(cars)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Car>, AppError> {
        let car = sqlx::query_as::<_, Car>("SELECT * FROM cars WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(car)
    }

    pub async fn find_by_vin(&self, vin: &str) -> Result<Option<Car>, AppError> {
        let car = sqlx::query_as::<_, Car>("SELECT * FROM cars WHERE vin = $1")
            .bind(vin)
            .fetch_optional(&self.pool)
            .await?;
        Ok(car)
    }

    pub async fn find_by_status(&self, status: CarStatus) -> Result<Vec<Car>, AppError> {
        let cars = sqlx::query_as::<_, Car>(
            "SELECT * FROM cars WHERE status = $1 ORDER BY created_at DESC",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(cars)
    }

    pub async fn find_by_brand(&self, brand_id: Uuid) -> Result<Vec<Car>, AppError> {
        let cars = sqlx::query_as::<_, Car>(
            "SELECT * FROM cars WHERE brand_id = $1 ORDER BY created_at DESC",
        )
        .bind(brand_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(cars)
    }

    pub async fn find_by_model(&self, model_id: Uuid) -> Result<Vec<Car>, AppError> {
        let cars = sqlx::query_as::<_, Car>(
            "SELECT * FROM cars WHERE model_id = $1 ORDER BY created_at DESC",
        )
        .bind(model_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(cars)
    }

    pub async fn create(&self, req: &CreateCarRequest) -> Result<Car, AppError> {
        req.validate()?;
        sqlx::query_as::<_, Car>(
            r#"
            INSERT INTO cars (brand, model, brand_id, model_id, year, price,
                              mileage, color, vin, fuel_type, transmission)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&req.brand)
        .bind(&req.model)
        .bind(req.brand_id)
        .bind(req.model_id)
        .bind(req.year)
        .bind(req.price)
        .bind(req.mileage)
        .bind(&req.color)
        .bind(&req.vin)
        .bind(req.fuel_type)
        .bind(req.transmission)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_conflict(e, &req.vin))
    }

    pub async fn update(&self, id: Uuid, req: &UpdateCarRequest) -> Result<Option<Car>, AppError> {
        req.validate()?;
        let car = sqlx::query_as::<_, Car>(
            r#"
            UPDATE cars
            SET brand = COALESCE($1, brand),
                model = COALESCE($2, model),
                brand_id = COALESCE($3, brand_id),
                model_id = COALESCE($4, model_id),
                year = COALESCE($5, year),
                price = COALESCE($6, price),
                mileage = COALESCE($7, mileage),
                color = COALESCE($8, color),
                vin = COALESCE($9, vin),
                fuel_type = COALESCE($10, fuel_type),
                transmission = COALESCE($11, transmission),
                status = COALESCE($12, status),
                updated_at = now()
            WHERE id = $13
            RETURNING *
            "#,
        )
        .bind(&req.brand)
        .bind(&req.model)
        .bind(req.brand_id)
        .bind(req.model_id)
        .bind(req.year)
        .bind(req.price)
        .bind(req.mileage)
        .bind(&req.color)
        .bind(&req.vin)
        .bind(req.fuel_type)
        .bind(req.transmission)
        .bind(req.status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::map_conflict(e, req.vin.as_deref().unwrap_or_default()))?;
        Ok(car)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: CarStatus,
    ) -> Result<Option<Car>, AppError> {
        let car = sqlx::query_as::<_, Car>(
            "UPDATE cars SET status = $1, updated_at = now() WHERE id = $2 RETURNING *",
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(car)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ---
    // Completed service campaign bookkeeping
    // ---

    /// Records a campaign as carried out for the car. Appending an already
    /// recorded campaign is a no-op, not an error.
    pub async fn add_completed_campaign(
        &self,
        car_id: Uuid,
        campaign_id: Uuid,
    ) -> Result<Option<Car>, AppError> {
        let car = sqlx::query_as::<_, Car>(
            r#"
            UPDATE cars
            SET completed_service_campaigns = CASE
                    WHEN $1 = ANY(completed_service_campaigns)
                        THEN completed_service_campaigns
                    ELSE array_append(completed_service_campaigns, $1)
                END,
                updated_at = now()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(campaign_id)
        .bind(car_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(car)
    }

    pub async fn remove_completed_campaign(
        &self,
        car_id: Uuid,
        campaign_id: Uuid,
    ) -> Result<Option<Car>, AppError> {
        let car = sqlx::query_as::<_, Car>(
            r#"
            UPDATE cars
            SET completed_service_campaigns = array_remove(completed_service_campaigns, $1),
                updated_at = now()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(campaign_id)
        .bind(car_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(car)
    }

    pub async fn clear_completed_campaigns(&self, car_id: Uuid) -> Result<Option<Car>, AppError> {
        let car = sqlx::query_as::<_, Car>(
            r#"
            UPDATE cars
            SET completed_service_campaigns = '{}',
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(car_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(car)
    }

    /// Cars that have carried out the given campaign; served by the GIN
    /// index on `completed_service_campaigns`.
    pub async fn find_by_completed_campaign(
        &self,
        campaign_id: Uuid,
    ) -> Result<Vec<Car>, AppError> {
        let cars = sqlx::query_as::<_, Car>(
            r#"
            SELECT * FROM cars
            WHERE completed_service_campaigns @> $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(vec![campaign_id])
        .fetch_all(&self.pool)
        .await?;
        Ok(cars)
    }

    /// Active campaigns still outstanding for the car: matching its brand
    /// and model, targeting its VIN (or every VIN), and not yet in its
    /// completed list. Mandatory campaigns come first. A car without
    /// catalog references cannot match any campaign and yields an empty
    /// list; asking about a car id that does not exist is reported as
    /// `NotFound` so callers can tell a missing car from a car with
    /// nothing outstanding.
    pub async fn pending_campaigns_for_car(
        &self,
        car_id: Uuid,
    ) -> Result<Vec<ServiceCampaign>, AppError> {
        let car = match self.find_by_id(car_id).await? {
            Some(car) => car,
            None => return Err(AppError::NotFound("car")),
        };
        let (brand_id, model_id) = match (car.brand_id, car.model_id) {
            (Some(b), Some(m)) => (b, m),
            _ => return Ok(Vec::new()),
        };

        let campaigns = sqlx::query_as::<_, ServiceCampaign>(
            r#"
            SELECT * FROM service_campaigns
            WHERE status = 'active'
              AND brand_id = $1
              AND car_model_id = $2
              AND (cardinality(target_vins) = 0 OR target_vins @> $3)
              AND NOT id = ANY($4)
            ORDER BY is_mandatory DESC, created_at DESC
            "#,
        )
        .bind(brand_id)
        .bind(model_id)
        .bind(vec![car.vin])
        .bind(&car.completed_service_campaigns)
        .fetch_all(&self.pool)
        .await?;
        Ok(campaigns)
    }

    fn map_conflict(e: sqlx::Error, vin: &str) -> AppError {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return AppError::VinAlreadyExists(vin.to_string());
            }
            if db_err.is_foreign_key_violation() {
                let constraint = db_err.constraint().unwrap_or_default();
                if constraint.contains("brand_id") {
                    return AppError::MissingReference("brand");
                }
                if constraint.contains("model_id") {
                    return AppError::MissingReference("car model");
                }
            }
        }
        AppError::from_db(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::db_errors;
    use crate::models::{FuelType, Transmission};
    use rust_decimal::Decimal;

    fn repo() -> CarRepository {
        // Lazy pool: no connection is attempted until a query runs, so
        // payloads rejected up front never touch the network.
        let pool = PgPool::connect_lazy("postgres://localhost/unreachable").unwrap();
        CarRepository::new(pool)
    }

    #[tokio::test]
    async fn create_rejects_invalid_payload_without_reaching_the_database() {
        let req = CreateCarRequest {
            brand: "Toyota".into(),
            model: "Corolla".into(),
            brand_id: None,
            model_id: None,
            year: 1975,
            price: Decimal::new(18_500_00, 2),
            mileage: 42_000,
            color: "Silver".into(),
            vin: "JTDBR32E720123456".into(),
            fuel_type: FuelType::Petrol,
            transmission: Transmission::Automatic,
        };
        let err = repo().create(&req).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn update_rejects_out_of_range_year() {
        let req = UpdateCarRequest {
            year: Some(2030),
            ..Default::default()
        };
        let err = repo().update(Uuid::new_v4(), &req).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn unique_violation_maps_to_vin_conflict() {
        let err = CarRepository::map_conflict(
            db_errors::unique_violation("cars_vin_key"),
            "JTDBR32E720123456",
        );
        assert!(matches!(err, AppError::VinAlreadyExists(vin) if vin == "JTDBR32E720123456"));
    }

    #[test]
    fn foreign_key_violations_name_the_missing_catalog_entry() {
        let err = CarRepository::map_conflict(
            db_errors::foreign_key_violation("cars_brand_id_fkey"),
            "",
        );
        assert!(matches!(err, AppError::MissingReference("brand")));

        let err = CarRepository::map_conflict(
            db_errors::foreign_key_violation("cars_model_id_fkey"),
            "",
        );
        assert!(matches!(err, AppError::MissingReference("car model")));
    }

    #[test]
    fn check_violations_fall_through_to_the_shared_mapping() {
        let err = CarRepository::map_conflict(db_errors::check_violation("cars_year_check"), "");
        assert!(matches!(err, AppError::CheckViolation(name) if name == "cars_year_check"));
    }
}
