//! Test runs, per-step results, and report rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::agent::AgentId;

/// Unique identifier for a test run (UUID v7, time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RunId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// One recorded execution of a scenario by an agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRun {
    pub id: RunId,
    pub agent_id: AgentId,
    pub status: RunStatus,
    /// Description of the scenario this run exercised.
    pub scenario: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub steps: Vec<StepResult>,
}

/// Run lifecycle states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Running,
    Completed,
    Failed,
    Stopped,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Running => write!(f, "running"),
            RunStatus::Completed => write!(f, "completed"),
            RunStatus::Failed => write!(f, "failed"),
            RunStatus::Stopped => write!(f, "stopped"),
        }
    }
}

impl FromStr for RunStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "running" => Ok(RunStatus::Running),
            "completed" => Ok(RunStatus::Completed),
            "failed" => Ok(RunStatus::Failed),
            "stopped" => Ok(RunStatus::Stopped),
            other => Err(format!("invalid run status: '{other}'")),
        }
    }
}

/// Outcome of a single step within a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    pub description: String,
    pub status: StepStatus,
    /// Set when `status` is `Error`.
    pub error: Option<String>,
}

impl StepResult {
    /// A successful step.
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            status: StepStatus::Success,
            error: None,
        }
    }

    /// A failed step with its error message.
    pub fn error(description: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            status: StepStatus::Error,
            error: Some(error.into()),
        }
    }
}

/// Per-step outcome states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Success,
    Error,
    Pending,
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepStatus::Success => write!(f, "success"),
            StepStatus::Error => write!(f, "error"),
            StepStatus::Pending => write!(f, "pending"),
        }
    }
}

/// One row in the reports listing, derived from a finished run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: RunId,
    pub title: String,
    pub agent: String,
    /// Short persona label, e.g. "Martha, 68".
    pub persona: String,
    pub issues_found: i64,
    /// Human-formatted duration, e.g. "1h 23m".
    pub duration: String,
    pub date: DateTime<Utc>,
}

/// The four dashboard stat cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_agents: usize,
    pub total_personas: usize,
    pub issues_found: i64,
    pub testing_hours: i64,
}
