pub mod conditions;
pub mod dataset;
pub mod error;
