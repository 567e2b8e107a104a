pub mod orchestrator;

pub use orchestrator::{CloudServices, ScanOrchestrator, ScanOutcome, ScanPlan, ScanSummary};
