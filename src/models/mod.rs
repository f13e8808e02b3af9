use rust_decimal::Decimal;
use validator::ValidationError;

pub mod brand;
pub mod car;
pub mod car_model;
pub mod customer;
pub mod enums;
pub mod part;
pub mod purchase;
pub mod service_campaign;
pub mod warehouse;
pub mod work;

pub use brand::{Brand, CreateBrandRequest, UpdateBrandRequest};
pub use car::{Car, CreateCarRequest, UpdateCarRequest};
pub use car_model::{CarModel, CreateCarModelRequest, UpdateCarModelRequest};
pub use customer::{CreateCustomerRequest, Customer, UpdateCustomerRequest};
pub use enums::{CarStatus, FuelType, RequestStatus, ServiceCampaignStatus, Transmission};
pub use part::{CreatePartRequest, Part, UpdatePartRequest};
pub use purchase::{CreatePurchaseRequest, PurchaseRequest};
pub use service_campaign::{
    CreateServiceCampaignRequest, ServiceCampaign, UpdateServiceCampaignRequest,
};
pub use warehouse::{
    CreateWarehouseItemRequest, StockMovementRequest, StockMovementType,
    UpdateWarehouseItemRequest, WarehouseItem, WarehouseItemWithPart,
};
pub use work::{CreateWorkRequest, UpdateWorkRequest, Work};

/// Mirrors the `>= 0` CHECK constraints on monetary columns so that bad
/// payloads are rejected before they reach the database.
pub fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("value must not be negative".into());
        return Err(err);
    }
    Ok(())
}
