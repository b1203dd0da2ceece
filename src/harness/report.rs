//! Per-run results.

use std::fmt;

use serde_json::Value;

use crate::error::{ErrorKind, HarnessError, Result};

/// Why a step ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Named by the caller.
    Requested,
    /// Inserted before an operation that needed a session.
    ImplicitLogin,
    /// Inserted to close an open session, at the end of a run or before a
    /// repeated login.
    ImplicitLogout,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Trigger::Requested => "requested",
            Trigger::ImplicitLogin => "implicit login",
            Trigger::ImplicitLogout => "implicit logout",
        })
    }
}

/// Result of one step. Failures are recorded here instead of propagated.
#[derive(Debug)]
pub enum StepOutcome {
    Succeeded(Value),
    Failed(HarnessError),
}

impl From<Result<Value>> for StepOutcome {
    fn from(result: Result<Value>) -> Self {
        match result {
            Ok(value) => StepOutcome::Succeeded(value),
            Err(e) => StepOutcome::Failed(e),
        }
    }
}

/// One executed (or refused) step of a run.
#[derive(Debug)]
pub struct StepRecord {
    pub name: String,
    pub trigger: Trigger,
    pub outcome: StepOutcome,
}

impl StepRecord {
    pub fn new(name: impl Into<String>, trigger: Trigger, outcome: Result<Value>) -> Self {
        Self {
            name: name.into(),
            trigger,
            outcome: outcome.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, StepOutcome::Succeeded(_))
    }

    pub fn error(&self) -> Option<&HarnessError> {
        match &self.outcome {
            StepOutcome::Failed(e) => Some(e),
            StepOutcome::Succeeded(_) => None,
        }
    }

    pub fn payload(&self) -> Option<&Value> {
        match &self.outcome {
            StepOutcome::Succeeded(value) => Some(value),
            StepOutcome::Failed(_) => None,
        }
    }

    /// Whether a request went out for this step. Client-side refusals
    /// (unknown name, no session) never reach the server.
    pub fn reached_remote(&self) -> bool {
        self.error()
            .map_or(true, |e| e.kind() != ErrorKind::ClientContract)
    }
}

impl fmt::Display for StepRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            StepOutcome::Succeeded(_) => write!(f, "ok    {} ({})", self.name, self.trigger),
            StepOutcome::Failed(e) => {
                write!(f, "FAIL  {} ({}): {}", self.name, self.trigger, e)
            }
        }
    }
}

/// Ordered record of a run.
#[derive(Debug, Default)]
pub struct RunReport {
    steps: Vec<StepRecord>,
}

impl RunReport {
    pub(crate) fn push(&mut self, record: StepRecord) {
        self.steps.push(record);
    }

    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    pub fn failures(&self) -> impl Iterator<Item = &StepRecord> {
        self.steps.iter().filter(|s| !s.is_success())
    }

    /// True when no step failed.
    pub fn succeeded(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Names of the steps that issued a request, in order.
    pub fn call_order(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter(|s| s.reached_remote())
            .map(|s| s.name.as_str())
            .collect()
    }

    /// First record requested under `name`.
    pub fn requested(&self, name: &str) -> Option<&StepRecord> {
        self.steps
            .iter()
            .find(|s| s.trigger == Trigger::Requested && s.name == name)
    }

    /// One-line summary such as `5 steps, 4 ok, 1 failed`.
    pub fn summary(&self) -> String {
        let failed = self.failures().count();
        format!(
            "{} steps, {} ok, {} failed",
            self.steps.len(),
            self.steps.len() - failed,
            failed
        )
    }
}
