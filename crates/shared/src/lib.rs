//! Shared types, errors, and configuration for Monto.
//!
//! This crate provides the pieces every other crate builds on:
//! - `MonetaryValue`, the exact decimal money type
//! - Monetary error types
//! - Configuration management
//! - Tracing initialization

pub mod config;
pub mod error;
pub mod telemetry;
pub mod types;

pub use config::{AppConfig, BoundaryConfig, LoggingConfig, MismatchPolicy};
pub use error::{MoneyError, MoneyResult};
pub use types::{CurrencyFormat, MonetaryValue, Operand};
