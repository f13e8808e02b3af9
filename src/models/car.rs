use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::enums::{CarStatus, FuelType, Transmission};
use super::validate_not_negative;

/// A vehicle on the lot. `brand`/`model` are the free-text columns from the
/// first schema revision; `brand_id`/`model_id` reference the catalogs added
/// later and stay optional for rows that predate them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Car {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub brand_id: Option<Uuid>,
    pub model_id: Option<Uuid>,
    pub year: i32,
    pub price: Decimal,
    pub mileage: i32,
    pub color: String,
    pub vin: String,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    pub status: CarStatus,
    pub completed_service_campaigns: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCarRequest {
    #[validate(length(min = 1, message = "brand must not be empty"))]
    pub brand: String,
    #[validate(length(min = 1, message = "model must not be empty"))]
    pub model: String,
    pub brand_id: Option<Uuid>,
    pub model_id: Option<Uuid>,
    #[validate(range(min = 1990, max = 2024))]
    pub year: i32,
    #[validate(custom(function = "validate_not_negative"))]
    pub price: Decimal,
    #[validate(range(min = 0))]
    pub mileage: i32,
    #[validate(length(min = 1, message = "color must not be empty"))]
    pub color: String,
    #[validate(length(min = 17, max = 17, message = "VIN must be exactly 17 characters"))]
    pub vin: String,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCarRequest {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub brand_id: Option<Uuid>,
    pub model_id: Option<Uuid>,
    #[validate(range(min = 1990, max = 2024))]
    pub year: Option<i32>,
    #[validate(custom(function = "validate_not_negative"))]
    pub price: Option<Decimal>,
    #[validate(range(min = 0))]
    pub mileage: Option<i32>,
    pub color: Option<String>,
    #[validate(length(min = 17, max = 17, message = "VIN must be exactly 17 characters"))]
    pub vin: Option<String>,
    pub fuel_type: Option<FuelType>,
    pub transmission: Option<Transmission>,
    pub status: Option<CarStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateCarRequest {
        CreateCarRequest {
            brand: "Toyota".into(),
            model: "Corolla".into(),
            brand_id: None,
            model_id: None,
            year: 2020,
            price: Decimal::new(18_500_00, 2),
            mileage: 42_000,
            color: "Silver".into(),
            vin: "JTDBR32E720123456".into(),
            fuel_type: FuelType::Petrol,
            transmission: Transmission::Automatic,
        }
    }

    #[test]
    fn accepts_a_well_formed_car() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn rejects_year_outside_the_allowed_range() {
        let mut req = valid_request();
        req.year = 1989;
        assert!(req.validate().is_err());
        req.year = 2025;
        assert!(req.validate().is_err());
    }

    #[test]
    fn rejects_negative_price_and_mileage() {
        let mut req = valid_request();
        req.price = Decimal::new(-1, 0);
        assert!(req.validate().is_err());

        let mut req = valid_request();
        req.mileage = -5;
        assert!(req.validate().is_err());
    }

    #[test]
    fn rejects_a_vin_of_the_wrong_length() {
        let mut req = valid_request();
        req.vin = "SHORTVIN".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn partial_update_validates_only_present_fields() {
        let update = UpdateCarRequest {
            price: Some(Decimal::new(17_000_00, 2)),
            status: Some(CarStatus::Reserved),
            ..Default::default()
        };
        assert!(update.validate().is_ok());

        let update = UpdateCarRequest {
            year: Some(1950),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }
}
