use serde::{Deserialize, Serialize};

// Each of these maps onto a Postgres enum type created by the migrations;
// the variant spellings are the enum labels.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "fuel_type")]
pub enum FuelType {
    Petrol,
    Diesel,
    Electric,
    Hybrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "transmission")]
pub enum Transmission {
    Manual,
    Automatic,
    CVT,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "car_status")]
pub enum CarStatus {
    Available,
    Reserved,
    Sold,
    Maintenance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_status")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "service_campaign_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ServiceCampaignStatus {
    Active,
    Completed,
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_wire_spellings_match_the_schema_labels() {
        assert_eq!(serde_json::to_string(&FuelType::Petrol).unwrap(), "\"Petrol\"");
        assert_eq!(serde_json::to_string(&Transmission::CVT).unwrap(), "\"CVT\"");
        assert_eq!(
            serde_json::to_string(&CarStatus::Available).unwrap(),
            "\"Available\""
        );
        assert_eq!(
            serde_json::to_string(&RequestStatus::Pending).unwrap(),
            "\"Pending\""
        );
        assert_eq!(
            serde_json::to_string(&ServiceCampaignStatus::Active).unwrap(),
            "\"active\""
        );
    }

    #[test]
    fn enums_round_trip_through_json() {
        let status: RequestStatus = serde_json::from_str("\"Rejected\"").unwrap();
        assert_eq!(status, RequestStatus::Rejected);

        let campaign: ServiceCampaignStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(campaign, ServiceCampaignStatus::Cancelled);
    }

    #[test]
    fn unknown_labels_are_rejected() {
        assert!(serde_json::from_str::<FuelType>("\"Steam\"").is_err());
        assert!(serde_json::from_str::<ServiceCampaignStatus>("\"Active\"").is_err());
    }
}
