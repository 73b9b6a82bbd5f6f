//! Monetary value engine for Monto.
//!
//! Pure logic with ZERO web or database dependencies. Builds on
//! `monto_shared::MonetaryValue`.
//!
//! # Modules
//!
//! - `currency` - Comparison, aggregation, and exact-sum distribution
//! - `boundary` - Tagging and converting money fields in JSON payloads

pub mod boundary;
pub mod currency;

pub use boundary::{BoundaryError, BoundaryTransformer, FieldRegistry, WireValue};
pub use currency::{allocate_by_ratios, distribute};
