//! Statement exporters and file naming.
//!
//! Exporters consume the same [`StatementViewModel`](crate::statements::StatementViewModel)
//! as the on-screen table, so every output shares one row layout.

pub mod delimited;
pub mod error;
pub mod exporter;
pub mod format;
pub mod json;
pub mod xlsx;


pub use delimited::CsvExporter;
pub use error::ExportError;
pub use exporter::{LEDGER_TITLE, StatementExporter, exporter_for};
pub use format::{ExportFormat, FileScope, export_filename};
pub use json::JsonExporter;
pub use xlsx::XlsxExporter;
