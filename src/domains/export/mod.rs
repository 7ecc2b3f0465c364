pub mod csv_record;
pub mod service;
pub mod types;

pub use csv_record::{to_csv_bytes, CsvRecord};
pub use service::{ExportService, ExportServiceImpl};
pub use types::{ExportMetadata, ExportRequest, ReportKind};
