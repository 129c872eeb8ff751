//! In-progress agent draft built by the creation wizard.
//!
//! The draft mirrors the submission payload field for field. Every value is
//! kept as entered -- empty strings and non-numeric text are legal draft
//! content and are only inspected at submission time by the service layer.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Simulated-user tech proficiency.
///
/// `Unspecified` is the unselected state and serializes to the empty string,
/// matching the payload contract of the agent-creation collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechLevel {
    #[serde(rename = "")]
    Unspecified,
    Beginner,
    Intermediate,
    Advanced,
}

impl Default for TechLevel {
    fn default() -> Self {
        TechLevel::Unspecified
    }
}

impl fmt::Display for TechLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TechLevel::Unspecified => write!(f, "unspecified"),
            TechLevel::Beginner => write!(f, "beginner"),
            TechLevel::Intermediate => write!(f, "intermediate"),
            TechLevel::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for TechLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" | "unspecified" => Ok(TechLevel::Unspecified),
            "beginner" => Ok(TechLevel::Beginner),
            "intermediate" => Ok(TechLevel::Intermediate),
            "advanced" => Ok(TechLevel::Advanced),
            other => Err(format!("invalid tech level: '{other}'")),
        }
    }
}

/// The persona section of a draft.
///
/// `goals` and `preferences` are carried in the model but no wizard
/// operation mutates them; they stay empty until a richer editor exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaDraft {
    pub name: String,
    /// Numeric-looking free text, not validated.
    pub age: String,
    pub tech_level: TechLevel,
    /// Insertion order is display order; duplicates rejected on insert.
    pub traits: Vec<String>,
    pub goals: Vec<String>,
    pub preferences: Vec<String>,
}

/// One test scenario: a description plus an ordered list of textual steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDraft {
    pub description: String,
    pub steps: Vec<String>,
}

impl Default for ScenarioDraft {
    /// A fresh scenario starts with one empty step, never zero.
    fn default() -> Self {
        Self {
            description: String::new(),
            steps: vec![String::new()],
        }
    }
}

/// The test-configuration section of a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDraft {
    pub target_url: String,
    /// Invariant: never empty. The wizard's remove guard enforces this.
    pub scenarios: Vec<ScenarioDraft>,
    /// Seconds between simulated actions, as entered.
    pub wait_time: String,
    /// Maximum test duration in minutes, as entered.
    pub max_duration: String,
}

impl Default for ConfigDraft {
    fn default() -> Self {
        Self {
            target_url: String::new(),
            scenarios: vec![ScenarioDraft::default()],
            wait_time: "2".to_string(),
            max_duration: "30".to_string(),
        }
    }
}

/// The full in-progress agent record owned by a wizard session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentDraft {
    pub name: String,
    pub description: String,
    pub persona: PersonaDraft,
    pub configuration: ConfigDraft,
}

/// The closed set of scalar draft fields the wizard can set.
///
/// An enum rather than free-form path strings so a typo in a caller is a
/// compile error, not a silently dropped update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Description,
    PersonaName,
    PersonaAge,
    PersonaTechLevel,
    TargetUrl,
    WaitTime,
    MaxDuration,
}
