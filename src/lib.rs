//! Schema and typed storage layer for the AutoDealer dealership management
//! system: vehicles, customers, purchase requests, spare parts, brand/model
//! catalogs, service campaigns, labor works and warehouse stock.
//!
//! The schema carries the invariants (CHECK constraints, unique and partial
//! unique indexes, cascading foreign keys, GIN-indexed array columns); the
//! repositories in [`db`] expose it to Rust callers and translate constraint
//! violations into the [`common::AppError`] taxonomy. Payload structs in
//! [`models`] mirror the same invariants through `validator` so bad input
//! can be rejected before a round trip.

pub mod common;
pub mod config;
pub mod db;
pub mod models;
