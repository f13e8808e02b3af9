use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A labor operation from the service catalog, priced in normative hours.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Work {
    pub id: Uuid,
    pub article: String,
    pub name: String,
    pub norm_hours: f64,
    pub brand_id: Uuid,
    pub car_model_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateWorkRequest {
    #[validate(length(min = 1, message = "article must not be empty"))]
    pub article: String,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(range(exclusive_min = 0.0, message = "norm hours must be positive"))]
    pub norm_hours: f64,
    pub brand_id: Uuid,
    pub car_model_id: Uuid,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateWorkRequest {
    #[validate(length(min = 1))]
    pub article: Option<String>,
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(range(exclusive_min = 0.0))]
    pub norm_hours: Option<f64>,
    pub brand_id: Option<Uuid>,
    pub car_model_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_hours(norm_hours: f64) -> CreateWorkRequest {
        CreateWorkRequest {
            article: "W-100".into(),
            name: "Brake fluid change".into(),
            norm_hours,
            brand_id: Uuid::new_v4(),
            car_model_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn rejects_non_positive_norm_hours() {
        assert!(request_with_hours(0.0).validate().is_err());
        assert!(request_with_hours(-1.5).validate().is_err());
    }

    #[test]
    fn accepts_any_positive_norm_hours() {
        // The column CHECK is `norm_hours > 0`, so even tiny jobs pass.
        assert!(request_with_hours(0.05).validate().is_ok());
        assert!(request_with_hours(2.4).validate().is_ok());
    }
}
