//! Crate-level checks that the payload layer mirrors the schema's
//! declarative constraints. Everything here runs without a database; the
//! constraints themselves are exercised by applying the migrations.

use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use autodealer_db::models::{
    CreateCarRequest, CreateCustomerRequest, CreatePartRequest, CreatePurchaseRequest, FuelType,
    Transmission,
};

fn car_payload() -> CreateCarRequest {
    serde_json::from_value(serde_json::json!({
        "brand": "Toyota",
        "model": "Corolla",
        "year": 2021,
        "price": 18500.0,
        "mileage": 30000,
        "color": "White",
        "vin": "JTDBR32E720123456",
        "fuel_type": "Hybrid",
        "transmission": "CVT"
    }))
    .unwrap()
}

#[test]
fn car_year_bounds_match_the_check_constraint() {
    let mut car = car_payload();
    assert!(car.validate().is_ok());

    car.year = 1989;
    assert!(car.validate().is_err());
    car.year = 1990;
    assert!(car.validate().is_ok());
    car.year = 2024;
    assert!(car.validate().is_ok());
    car.year = 2025;
    assert!(car.validate().is_err());
}

#[test]
fn monetary_fields_reject_negative_values_across_entities() {
    let mut car = car_payload();
    car.price = Decimal::new(-1, 2);
    assert!(car.validate().is_err());

    let part = CreatePartRequest {
        article: "BP-2041".into(),
        name: "Front brake pads".into(),
        model: "Corolla E210".into(),
        brand_id: None,
        car_model_id: None,
        purchase_price: Decimal::new(-1, 2),
        sale_price: Decimal::ZERO,
        compatible_vins: vec![],
    };
    assert!(part.validate().is_err());

    let purchase = CreatePurchaseRequest {
        car_id: Uuid::new_v4(),
        customer_id: Uuid::new_v4(),
        offer_price: Some(Decimal::new(-500, 0)),
        notes: None,
    };
    assert!(purchase.validate().is_err());
}

#[test]
fn enum_payload_spellings_are_the_schema_labels() {
    let car = car_payload();
    assert_eq!(car.fuel_type, FuelType::Hybrid);
    assert_eq!(car.transmission, Transmission::CVT);

    let err = serde_json::from_value::<CreateCarRequest>(serde_json::json!({
        "brand": "Toyota",
        "model": "Corolla",
        "year": 2021,
        "price": 18500.0,
        "mileage": 30000,
        "color": "White",
        "vin": "JTDBR32E720123456",
        "fuel_type": "Kerosene",
        "transmission": "CVT"
    }));
    assert!(err.is_err());
}

#[test]
fn customer_email_must_be_well_formed() {
    let customer = CreateCustomerRequest {
        first_name: "Ivan".into(),
        last_name: "Petrov".into(),
        email: "ivan.petrov".into(),
        phone: "+7 900 000 00 00".into(),
    };
    assert!(customer.validate().is_err());
}
