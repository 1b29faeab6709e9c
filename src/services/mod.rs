pub mod orchestrator;

pub use orchestrator::{RunOrchestrator, RunStage, RunSummary};
