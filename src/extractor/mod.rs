pub mod aggregator;
pub mod config_file;
pub mod export;
pub mod report;

pub use aggregator::{AggregationOutcome, Aggregator, FieldColumn, KeyData, Row};
pub use config_file::{annotate_type, parse_line, ConfigExtractor, ItemConfig};
pub use export::{read_values, ValueExporter};
pub use report::QueryReport;
