//! Operations over collections of monetary values.

pub mod aggregation;
pub mod allocation;

#[cfg(test)]
mod props;

pub use aggregation::{average, compare, max, min, sum};
pub use allocation::{allocate_by_ratios, distribute};
