pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod population;
pub mod types;

pub use error::{LegforgeError, Result};
