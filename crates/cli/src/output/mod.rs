//! Structured output envelope and payload models.


mod data;
mod envelope;
mod format;
mod model;

pub use data::*;
pub use format::OutputFormat;
pub use model::*;
