pub mod anomaly;
pub mod data_loading;
pub mod engine;
pub mod error;
pub mod hypothesis;
pub mod ml;
pub mod network;
pub mod regression;
pub mod statistics;
pub mod timeseries;
pub mod wasm_api;

pub use data_loading::{Column, ColumnKind, ColumnValues, DataTable};
pub use engine::{AnalysisEngine, AnalysisOperation, AnalysisOutput, AnalysisParameters};
pub use error::{AnalysisError, AnalysisResult};
pub use wasm_api::WasmAnalyticsEngine;
