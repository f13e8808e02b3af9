use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::validate_not_negative;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Part {
    pub id: Uuid,
    pub article: String,
    pub name: String,
    pub model: String,
    pub brand_id: Option<Uuid>,
    pub car_model_id: Option<Uuid>,
    pub purchase_price: Decimal,
    pub sale_price: Decimal,
    pub compatible_vins: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePartRequest {
    #[validate(length(min = 1, message = "article must not be empty"))]
    pub article: String,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "model must not be empty"))]
    pub model: String,
    pub brand_id: Option<Uuid>,
    pub car_model_id: Option<Uuid>,
    #[validate(custom(function = "validate_not_negative"))]
    pub purchase_price: Decimal,
    #[validate(custom(function = "validate_not_negative"))]
    pub sale_price: Decimal,
    #[serde(default)]
    pub compatible_vins: Vec<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePartRequest {
    #[validate(length(min = 1))]
    pub article: Option<String>,
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub model: Option<String>,
    pub brand_id: Option<Uuid>,
    pub car_model_id: Option<Uuid>,
    #[validate(custom(function = "validate_not_negative"))]
    pub purchase_price: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub sale_price: Option<Decimal>,
    pub compatible_vins: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreatePartRequest {
        CreatePartRequest {
            article: "BP-2041".into(),
            name: "Front brake pads".into(),
            model: "Corolla E210".into(),
            brand_id: None,
            car_model_id: None,
            purchase_price: Decimal::new(35_50, 2),
            sale_price: Decimal::new(59_90, 2),
            compatible_vins: vec!["JTDBR32E720123456".into()],
        }
    }

    #[test]
    fn rejects_negative_prices() {
        let mut req = valid_request();
        req.sale_price = Decimal::new(-1, 2);
        assert!(req.validate().is_err());

        let mut req = valid_request();
        req.purchase_price = Decimal::new(-1, 2);
        assert!(req.validate().is_err());
    }

    #[test]
    fn rejects_an_empty_article() {
        let mut req = valid_request();
        req.article = String::new();
        assert!(req.validate().is_err());
    }

    #[test]
    fn compatible_vins_default_to_empty_on_deserialization() {
        let req: CreatePartRequest = serde_json::from_value(serde_json::json!({
            "article": "OF-114",
            "name": "Oil filter",
            "model": "Corolla E210",
            "purchase_price": 4.20,
            "sale_price": 8.90
        }))
        .unwrap();
        assert!(req.compatible_vins.is_empty());
    }
}
