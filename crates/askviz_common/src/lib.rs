//! Askviz Common - shared types and response resolution for the askviz client.
//!
//! The backend answers natural-language questions with chart-ready tables in
//! several historical payload shapes; this crate reduces all of them to one
//! normalized form.

pub mod chart;
pub mod config;
pub mod error;
pub mod resolver;
pub mod response;

pub use chart::{ChartSuggestion, ChartType};
pub use config::BackendConfig;
pub use error::QueryError;
pub use resolver::{resolve, NormalizedResult};
pub use response::{DataShape, RawResponse, Record};
