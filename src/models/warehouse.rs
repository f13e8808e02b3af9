use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Stock record for a part. One row per part (`part_id` is unique).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WarehouseItem {
    pub id: Uuid,
    pub part_id: Uuid,
    pub quantity: i32,
    pub min_stock_level: i32,
    pub max_stock_level: i32,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stock record joined with the part's article and name, for stock reports.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WarehouseItemWithPart {
    pub id: Uuid,
    pub part_id: Uuid,
    pub part_article: String,
    pub part_name: String,
    pub quantity: i32,
    pub min_stock_level: i32,
    pub max_stock_level: i32,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateWarehouseItemRequest {
    pub part_id: Uuid,
    #[validate(range(min = 0))]
    pub quantity: i32,
    #[validate(range(min = 0))]
    pub min_stock_level: Option<i32>,
    #[validate(range(min = 0))]
    pub max_stock_level: Option<i32>,
    pub location: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateWarehouseItemRequest {
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    #[validate(range(min = 0))]
    pub min_stock_level: Option<i32>,
    #[validate(range(min = 0))]
    pub max_stock_level: Option<i32>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockMovementType {
    Incoming,
    Outgoing,
    Adjustment,
}

/// A quantity change applied to a stock record. `Adjustment` replaces the
/// quantity outright; the other two add or subtract.
#[derive(Debug, Deserialize, Validate)]
pub struct StockMovementRequest {
    #[validate(range(min = 1, message = "quantity must be positive"))]
    pub quantity: i32,
    pub movement_type: StockMovementType,
}
