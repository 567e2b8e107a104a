pub mod assembler;
pub mod formatter;
pub mod publisher;

pub use assembler::{OutputDestination, ReportAssembler, DEFAULT_REPORT_BUCKET, DEFAULT_REPORT_KEY};
pub use publisher::{ObjectStorePublisher, ReportPublisher};
