use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 2, message = "first name must have at least 2 characters"))]
    pub first_name: String,
    #[validate(length(min = 2, message = "last name must have at least 2 characters"))]
    pub last_name: String,
    #[validate(email(message = "invalid e-mail address"))]
    pub email: String,
    #[validate(length(min = 1, message = "phone must not be empty"))]
    pub phone: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCustomerRequest {
    #[validate(length(min = 2))]
    pub first_name: Option<String>,
    #[validate(length(min = 2))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_a_malformed_email() {
        let req = CreateCustomerRequest {
            first_name: "Anna".into(),
            last_name: "Schmidt".into(),
            email: "not-an-email".into(),
            phone: "+49 170 0000000".into(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn accepts_a_well_formed_customer() {
        let req = CreateCustomerRequest {
            first_name: "Anna".into(),
            last_name: "Schmidt".into(),
            email: "anna.schmidt@example.com".into(),
            phone: "+49 170 0000000".into(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn update_with_only_a_phone_change_is_valid() {
        let update = UpdateCustomerRequest {
            phone: Some("+49 170 1111111".into()),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }
}
