use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::draft::{AgentDraft, ConfigDraft, PersonaDraft, ScenarioDraft, TechLevel};

/// Unique identifier for an agent, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub Uuid);

impl AgentId {
    /// Create a new AgentId using UUID v7 (time-sortable, guaranteed ordering).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create an AgentId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for AgentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AgentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A testing agent: a simulated persona paired with a test configuration.
///
/// Agents are created by the wizard and managed via the CLI. The run-state
/// controls only toggle `status`; no execution engine exists behind them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    /// URL-safe unique slug derived from name ("Senior User Agent" -> "senior-user-agent").
    pub slug: String,
    /// Freeform display name (duplicates allowed across agents).
    pub name: String,
    /// What this agent tests (1-2 sentences for listings).
    pub description: String,
    /// Current run state.
    pub status: AgentStatus,
    /// The simulated user driving the tests.
    pub persona: PersonaProfile,
    /// Target URL, scenarios, and timing.
    pub configuration: TestConfig,
    /// Total issues surfaced across all runs.
    pub issues_found: i64,
    /// Progress of the most recent run, 0-100.
    pub progress: u8,
    /// Percentage of steps that succeeded across runs, when any run exists.
    pub success_rate: Option<u8>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Last time a test run was started for this agent.
    pub last_run_at: Option<DateTime<Utc>>,
}

/// Agent run states.
///
/// - Active: a test is (nominally) running
/// - Paused: stopped mid-way, resumable
/// - Completed: last run finished
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Active,
    Paused,
    Completed,
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentStatus::Active => write!(f, "active"),
            AgentStatus::Paused => write!(f, "paused"),
            AgentStatus::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for AgentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(AgentStatus::Active),
            "paused" => Ok(AgentStatus::Paused),
            "completed" => Ok(AgentStatus::Completed),
            other => Err(format!("invalid agent status: '{other}'")),
        }
    }
}

impl Default for AgentStatus {
    fn default() -> Self {
        AgentStatus::Active
    }
}

/// A submitted persona profile. Values stay exactly as entered in the
/// wizard; `age` in particular is unvalidated text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaProfile {
    pub name: String,
    pub age: String,
    pub tech_level: TechLevel,
    pub traits: Vec<String>,
    pub goals: Vec<String>,
    pub preferences: Vec<String>,
}

impl From<PersonaDraft> for PersonaProfile {
    fn from(draft: PersonaDraft) -> Self {
        Self {
            name: draft.name,
            age: draft.age,
            tech_level: draft.tech_level,
            traits: draft.traits,
            goals: draft.goals,
            preferences: draft.preferences,
        }
    }
}

/// A submitted test configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestConfig {
    pub target_url: String,
    pub scenarios: Vec<Scenario>,
    pub wait_time: String,
    pub max_duration: String,
}

impl From<ConfigDraft> for TestConfig {
    fn from(draft: ConfigDraft) -> Self {
        Self {
            target_url: draft.target_url,
            scenarios: draft.scenarios.into_iter().map(Scenario::from).collect(),
            wait_time: draft.wait_time,
            max_duration: draft.max_duration,
        }
    }
}

/// A test flow: a description plus ordered textual steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub description: String,
    pub steps: Vec<String>,
}

impl From<ScenarioDraft> for Scenario {
    fn from(draft: ScenarioDraft) -> Self {
        Self {
            description: draft.description,
            steps: draft.steps,
        }
    }
}

/// The finalized submission payload handed to the agent-creation service.
///
/// Shaped exactly like the draft it was packaged from; the payload keys use
/// camelCase to match the collaborator contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAgentRequest {
    pub name: String,
    pub description: String,
    pub persona: PersonaProfile,
    pub configuration: TestConfig,
}

impl From<AgentDraft> for CreateAgentRequest {
    fn from(draft: AgentDraft) -> Self {
        Self {
            name: draft.name,
            description: draft.description,
            persona: draft.persona.into(),
            configuration: draft.configuration.into(),
        }
    }
}

/// Generate a URL-safe slug from a display name.
///
/// Rules:
/// - Lowercase
/// - Replace non-alphanumeric characters with hyphens
/// - Collapse consecutive hyphens into one
/// - Trim leading/trailing hyphens
///
/// # Examples
///
/// ```
/// use uxprobe_types::agent::slugify;
///
/// assert_eq!(slugify("Senior User Agent"), "senior-user-agent");
/// assert_eq!(slugify("My  Cool  Agent!"), "my-cool-agent");
/// assert_eq!(slugify("---hello---world---"), "hello-world");
/// ```
pub fn slugify(name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();

    // Collapse consecutive hyphens and trim edges
    let mut result = String::with_capacity(slug.len());
    let mut prev_was_hyphen = true; // treat start as hyphen to trim leading
    for c in slug.chars() {
        if c == '-' {
            if !prev_was_hyphen {
                result.push('-');
            }
            prev_was_hyphen = true;
        } else {
            result.push(c);
            prev_was_hyphen = false;
        }
    }

    // Trim trailing hyphen
    if result.ends_with('-') {
        result.pop();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Senior User Agent"), "senior-user-agent");
    }

    #[test]
    fn test_slugify_special_chars() {
        assert_eq!(slugify("My  Cool  Agent!"), "my-cool-agent");
    }

    #[test]
    fn test_slugify_leading_trailing() {
        assert_eq!(slugify("---hello---world---"), "hello-world");
    }

    #[test]
    fn test_slugify_numbers() {
        assert_eq!(slugify("Shopper v2.0"), "shopper-v2-0");
    }

    #[test]
    fn test_agent_id_display() {
        let id = AgentId::new();
        let s = id.to_string();
        let parsed: AgentId = s.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_agent_status_roundtrip() {
        for status in [
            AgentStatus::Active,
            AgentStatus::Paused,
            AgentStatus::Completed,
        ] {
            let s = status.to_string();
            let parsed: AgentStatus = s.parse().unwrap();
            assert_eq!(status, parsed);
        }
    }

    #[test]
    fn test_request_from_draft_preserves_everything() {
        let mut draft = AgentDraft::default();
        draft.name = "Checkout Prober".to_string();
        draft.persona.age = "32".to_string();
        draft.persona.traits = vec!["patient".to_string()];
        draft.configuration.target_url = "https://example-store.com".to_string();
        draft.configuration.scenarios[0].description = "Checkout".to_string();
        draft.configuration.scenarios[0].steps = vec!["Add to cart".to_string()];

        let request = CreateAgentRequest::from(draft);
        assert_eq!(request.name, "Checkout Prober");
        assert_eq!(request.persona.age, "32");
        assert_eq!(request.persona.traits, vec!["patient"]);
        assert_eq!(request.configuration.scenarios.len(), 1);
        assert_eq!(request.configuration.scenarios[0].steps, vec!["Add to cart"]);
        assert_eq!(request.configuration.wait_time, "2");
    }
}
