use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::enums::RequestStatus;
use super::validate_not_negative;

/// Join entity between a car and a customer carrying the negotiation state.
/// New requests always start out Pending; the partial unique index in the
/// schema guarantees at most one Pending request per (car, customer) pair.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PurchaseRequest {
    pub id: Uuid,
    pub car_id: Uuid,
    pub customer_id: Uuid,
    pub status: RequestStatus,
    pub offer_price: Option<Decimal>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePurchaseRequest {
    pub car_id: Uuid,
    pub customer_id: Uuid,
    #[validate(custom(function = "validate_not_negative"))]
    pub offer_price: Option<Decimal>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_a_negative_offer() {
        let req = CreatePurchaseRequest {
            car_id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            offer_price: Some(Decimal::new(-100, 0)),
            notes: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn offer_price_is_optional() {
        let req = CreatePurchaseRequest {
            car_id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            offer_price: None,
            notes: Some("wants a test drive first".into()),
        };
        assert!(req.validate().is_ok());
    }
}
