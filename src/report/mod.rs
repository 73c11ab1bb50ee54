//! Inventory reports.
//!
//! Builds a full address-space report from a snapshot and renders it as
//! JSON and human-readable text.

pub mod render;
pub mod types;

pub use render::{generate_json_report, generate_text_report, print_summary};
pub use types::{usage_rows, InventoryReport, ReportMetadata, UsageRow};
