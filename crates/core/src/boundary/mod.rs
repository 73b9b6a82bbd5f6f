//! Boundary transformer for JSON payloads.
//!
//! The only part of the engine that inspects untyped data and the only part
//! that knows which field names are money:
//! - `WireValue` - tagged tree of JSON values plus typed leaves
//! - `FieldRegistry` - closed set of monetary field names
//! - `BoundaryTransformer` - recursive decode and encode

pub mod error;
pub mod registry;
pub mod transformer;
pub mod value;


pub use error::BoundaryError;
pub use registry::{FieldRegistry, MONETARY_FIELDS, MONETARY_FIELDS_VERSION};
pub use transformer::BoundaryTransformer;
pub use value::WireValue;
