//! Export pipeline: pagination, event extraction, and CSV output.

pub mod driver;
pub mod extractor;
pub mod writer;

pub use driver::{collect_samples, ExportOptions};
pub use extractor::extract_sample;
pub use writer::write_rows;
