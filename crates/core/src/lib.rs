//! Core business logic for ScrapTally.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations live
//! here.
//!
//! # Modules
//!
//! - `fiscal` - Financial year resolution (April-March accounting periods)
//! - `gst` - GST tax breakdown calculation
//! - `payment` - Per-bill payment ledger and status derivation
//! - `transaction` - Purchase/sale bill lifecycle
//! - `lot` - Lot reconciliation across linked purchases and sales
//! - `party` - Supplier/customer registry and per-party ledger
//! - `dashboard` - Cross-transaction summary aggregation
//! - `reports` - CSV-ready report rows
//! - `storage` - Bill attachment object store

pub mod dashboard;
pub mod fiscal;
pub mod gst;
pub mod lot;
pub mod party;
pub mod payment;
pub mod reports;
pub mod storage;
pub mod transaction;
