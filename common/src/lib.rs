//! Visual Measure Common Library
//!
//! CLIと中継サーバで共有される型とユーティリティ

pub mod error;
pub mod ingest;
pub mod parser;
pub mod prompts;
pub mod types;

pub use error::{Error, Result};
pub use ingest::{parse_csv, parse_rows, split_csv_line, validate_row};
pub use parser::{extract_json, parse_measurement_response};
pub use prompts::MEASUREMENT_PROMPT;
pub use types::{AnalysisResult, Cell, ProductRecord, SkipReason, VisualMeasurement};
