//! Scripted runs of named operations against one session.

pub mod operation;
mod orchestrator;
pub mod preset;
pub mod report;

pub use operation::{Fixtures, OperationKind, TEST_CONTENT};
pub use orchestrator::TestOrchestrator;
pub use preset::Preset;
pub use report::{RunReport, StepOutcome, StepRecord, Trigger};
