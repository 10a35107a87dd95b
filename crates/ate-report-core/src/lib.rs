pub mod aggregate;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod schema;
pub mod selection;
pub mod table;

pub use config::{ChartSpec, ErrorBarPolicy, ReportConfig};
pub use error::{ReportError, Result};
