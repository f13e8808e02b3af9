use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Brand {
    pub id: Uuid,
    pub name: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBrandRequest {
    #[validate(length(min = 1, message = "brand name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "country must not be empty"))]
    pub country: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateBrandRequest {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub country: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_an_empty_brand_name() {
        let req = CreateBrandRequest {
            name: String::new(),
            country: "Japan".into(),
        };
        assert!(req.validate().is_err());
    }
}
