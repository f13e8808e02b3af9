use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::enums::ServiceCampaignStatus;

/// A recall or scheduled service action issued by a manufacturer for one
/// model. An empty `target_vins` list means the campaign applies to every
/// car of that model.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServiceCampaign {
    pub id: Uuid,
    pub article: String,
    pub name: String,
    pub description: Option<String>,
    pub brand_id: Uuid,
    pub car_model_id: Uuid,
    pub target_vins: Vec<String>,
    pub required_parts: Vec<Uuid>,
    pub required_works: Vec<Uuid>,
    pub is_mandatory: bool,
    pub is_completed: bool,
    pub status: ServiceCampaignStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateServiceCampaignRequest {
    #[validate(length(min = 1, message = "article must not be empty"))]
    pub article: String,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub description: Option<String>,
    pub brand_id: Uuid,
    pub car_model_id: Uuid,
    #[serde(default)]
    pub target_vins: Vec<String>,
    #[serde(default)]
    pub required_parts: Vec<Uuid>,
    #[serde(default)]
    pub required_works: Vec<Uuid>,
    #[serde(default)]
    pub is_mandatory: bool,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateServiceCampaignRequest {
    #[validate(length(min = 1))]
    pub article: Option<String>,
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub brand_id: Option<Uuid>,
    pub car_model_id: Option<Uuid>,
    pub target_vins: Option<Vec<String>>,
    pub required_parts: Option<Vec<Uuid>>,
    pub required_works: Option<Vec<Uuid>>,
    pub is_mandatory: Option<bool>,
    pub is_completed: Option<bool>,
    pub status: Option<ServiceCampaignStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_lists_default_to_empty() {
        let req: CreateServiceCampaignRequest = serde_json::from_value(serde_json::json!({
            "article": "SC-2024-007",
            "name": "Fuel pump replacement",
            "brand_id": Uuid::new_v4(),
            "car_model_id": Uuid::new_v4()
        }))
        .unwrap();
        assert!(req.target_vins.is_empty());
        assert!(req.required_parts.is_empty());
        assert!(req.required_works.is_empty());
        assert!(!req.is_mandatory);
        assert!(req.validate().is_ok());
    }
}
