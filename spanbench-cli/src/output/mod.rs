//! Output formatting module

pub mod report;

pub use report::{render_report, write_json};
