use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A model within a brand's catalog. Model names are unique per brand, not
/// globally ("Corolla" may exist under exactly one brand, "GT" under many).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CarModel {
    pub id: Uuid,
    pub name: String,
    pub brand_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCarModelRequest {
    #[validate(length(min = 1, message = "model name must not be empty"))]
    pub name: String,
    pub brand_id: Uuid,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCarModelRequest {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub brand_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_an_empty_model_name() {
        let req = CreateCarModelRequest {
            name: String::new(),
            brand_id: Uuid::new_v4(),
        };
        assert!(req.validate().is_err());
    }
}
