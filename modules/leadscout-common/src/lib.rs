pub mod config;
pub mod error;
pub mod fields;
pub mod types;

pub use config::{Config, PipelineSettings};
pub use error::LeadScoutError;
pub use types::*;
