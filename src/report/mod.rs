//! Report output.
//!
//! After evaluation, the non-compliant assets of a scan are handed to a
//! [`ReportSink`]. The default sink writes them to `compliance_report.json`.
//!
//! ## Sinks
//!
//! - [`FilesystemReportSink`] - Atomic JSON file write
//! - [`InMemoryReportSink`] - Keeps reports in memory

mod filesystem;
mod status;
mod traits;

pub use filesystem::{FilesystemReportSink, DEFAULT_REPORT_FILE};
pub use status::ReportStatus;
pub use traits::{encode_report, InMemoryReportSink, ReportSink};
