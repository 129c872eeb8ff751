//! Sample catalog seeding.
//!
//! With no execution engine and no persistence, a fresh process would start
//! with an empty dashboard. The seed fills the in-memory stores with a small
//! believable catalog of agents and finished runs so every view has content.
//! Disable via `seed_samples = false` in `config.toml`.

use chrono::{DateTime, Duration, TimeZone, Utc};

use uxprobe_core::repository::agent::AgentRepository;
use uxprobe_core::repository::run::RunRepository;
use uxprobe_types::agent::{Agent, AgentId, AgentStatus, PersonaProfile, Scenario, TestConfig};
use uxprobe_types::draft::TechLevel;
use uxprobe_types::error::RepositoryError;
use uxprobe_types::run::{RunId, RunStatus, StepResult, TestRun};

use crate::memory::{MemoryAgentRepository, MemoryRunRepository};

/// Seed the sample catalog into empty stores. No-op when agents already
/// exist, so repeated initialization is safe.
pub async fn seed_catalog(
    agents: &MemoryAgentRepository,
    runs: &MemoryRunRepository,
) -> Result<(), RepositoryError> {
    if !agents.is_empty() {
        return Ok(());
    }

    let (sample_agents, sample_runs) = build_catalog();
    for agent in &sample_agents {
        agents.create(agent).await?;
    }
    for run in &sample_runs {
        runs.add(run).await?;
    }

    tracing::debug!(
        agents = sample_agents.len(),
        runs = sample_runs.len(),
        "seeded sample catalog"
    );
    Ok(())
}

/// The full sample catalog: four agents and their finished runs.
pub fn build_catalog() -> (Vec<Agent>, Vec<TestRun>) {
    let now = Utc::now();

    let martha = sample_agent(SampleAgent {
        name: "Senior User Agent",
        description: "Simulates a low tech-savvy senior navigating the site",
        status: AgentStatus::Active,
        persona: PersonaProfile {
            name: "Martha".to_string(),
            age: "68".to_string(),
            tech_level: TechLevel::Beginner,
            traits: strings(&["careful", "patient"]),
            goals: strings(&["find contact information"]),
            preferences: strings(&["large text"]),
        },
        configuration: TestConfig {
            target_url: "https://example.com".to_string(),
            scenarios: vec![Scenario {
                description: "Find contact information".to_string(),
                steps: strings(&[
                    "Open the home page",
                    "Locate the help menu",
                    "Find the contact page",
                ]),
            }],
            wait_time: "4".to_string(),
            max_duration: "30".to_string(),
        },
        issues_found: 5,
        progress: 75,
        success_rate: Some(72),
        last_run_at: Some(now - Duration::hours(2)),
    });

    let alex = sample_agent(SampleAgent {
        name: "Teenage Shopper",
        description: "Tests the mobile shopping flow as a tech-native teenager",
        status: AgentStatus::Paused,
        persona: PersonaProfile {
            name: "Alex".to_string(),
            age: "17".to_string(),
            tech_level: TechLevel::Advanced,
            traits: strings(&["impatient", "curious"]),
            goals: strings(&["find trending products"]),
            preferences: strings(&["mobile-first"]),
        },
        configuration: TestConfig {
            target_url: "https://example-store.com".to_string(),
            scenarios: vec![Scenario {
                description: "Browse new arrivals".to_string(),
                steps: strings(&[
                    "Open the catalog",
                    "Filter by newest",
                    "Open a product page",
                ]),
            }],
            wait_time: "1".to_string(),
            max_duration: "20".to_string(),
        },
        issues_found: 2,
        progress: 45,
        success_rate: Some(90),
        last_run_at: Some(now - Duration::days(1)),
    });

    let james = sample_agent(SampleAgent {
        name: "Professional User",
        description: "Business executive completing tasks under time pressure",
        status: AgentStatus::Completed,
        persona: PersonaProfile {
            name: "James".to_string(),
            age: "42".to_string(),
            tech_level: TechLevel::Intermediate,
            traits: strings(&["efficient", "demanding"]),
            goals: strings(&["export a usage report"]),
            preferences: strings(&["keyboard shortcuts"]),
        },
        configuration: TestConfig {
            target_url: "https://example.com".to_string(),
            scenarios: vec![Scenario {
                description: "Export a usage report".to_string(),
                steps: strings(&[
                    "Log in",
                    "Open the reports section",
                    "Export as PDF",
                ]),
            }],
            wait_time: "2".to_string(),
            max_duration: "45".to_string(),
        },
        issues_found: 9,
        progress: 100,
        success_rate: Some(64),
        last_run_at: Some(now - Duration::days(3)),
    });

    let sarah = sample_agent(SampleAgent {
        name: "E-commerce Shopper",
        description: "Tests the full e-commerce shopping experience",
        status: AgentStatus::Active,
        persona: PersonaProfile {
            name: "Sarah".to_string(),
            age: "32".to_string(),
            tech_level: TechLevel::Intermediate,
            traits: strings(&["detail-oriented", "methodical", "patient"]),
            goals: strings(&["complete purchase", "find specific products"]),
            preferences: strings(&["mobile-first", "fast checkout"]),
        },
        configuration: TestConfig {
            target_url: "https://example-store.com".to_string(),
            scenarios: vec![Scenario {
                description: "Complete checkout flow".to_string(),
                steps: strings(&[
                    "Browse product catalog",
                    "Add item to cart",
                    "Proceed to checkout",
                    "Fill shipping details",
                    "Complete payment",
                ]),
            }],
            wait_time: "2".to_string(),
            max_duration: "30".to_string(),
        },
        issues_found: 1,
        progress: 100,
        success_rate: Some(85),
        last_run_at: Some(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()),
    });

    let runs = vec![
        finished_run(
            &martha,
            Utc.with_ymd_and_hms(2023, 6, 28, 9, 0, 0).unwrap(),
            Duration::minutes(83),
            RunStatus::Completed,
            vec![
                StepResult::success("Open the home page"),
                StepResult::success("Locate the help menu"),
                StepResult::error("Find the contact page", "Link target returned 404"),
            ],
        ),
        finished_run(
            &alex,
            Utc.with_ymd_and_hms(2023, 7, 1, 14, 0, 0).unwrap(),
            Duration::minutes(45),
            RunStatus::Stopped,
            vec![
                StepResult::success("Open the catalog"),
                StepResult::success("Filter by newest"),
                StepResult {
                    description: "Open a product page".to_string(),
                    status: uxprobe_types::run::StepStatus::Pending,
                    error: None,
                },
            ],
        ),
        finished_run(
            &james,
            Utc.with_ymd_and_hms(2023, 7, 5, 9, 30, 0).unwrap(),
            Duration::minutes(130),
            RunStatus::Completed,
            vec![
                StepResult::success("Log in"),
                StepResult::success("Open the reports section"),
                StepResult::error("Export as PDF", "Download never started"),
            ],
        ),
        finished_run(
            &sarah,
            Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
            Duration::minutes(30),
            RunStatus::Completed,
            vec![
                StepResult::success("Browse product catalog"),
                StepResult::success("Add item to cart"),
                StepResult::success("Proceed to checkout"),
                StepResult::success("Fill shipping details"),
                StepResult::error("Complete payment", "Payment gateway timeout"),
            ],
        ),
    ];

    (vec![martha, alex, james, sarah], runs)
}

struct SampleAgent {
    name: &'static str,
    description: &'static str,
    status: AgentStatus,
    persona: PersonaProfile,
    configuration: TestConfig,
    issues_found: i64,
    progress: u8,
    success_rate: Option<u8>,
    last_run_at: Option<DateTime<Utc>>,
}

fn sample_agent(seed: SampleAgent) -> Agent {
    let now = Utc::now();
    Agent {
        id: AgentId::new(),
        slug: uxprobe_types::agent::slugify(seed.name),
        name: seed.name.to_string(),
        description: seed.description.to_string(),
        status: seed.status,
        persona: seed.persona,
        configuration: seed.configuration,
        issues_found: seed.issues_found,
        progress: seed.progress,
        success_rate: seed.success_rate,
        created_at: now - Duration::days(30),
        updated_at: seed.last_run_at.unwrap_or(now),
        last_run_at: seed.last_run_at,
    }
}

fn finished_run(
    agent: &Agent,
    started_at: DateTime<Utc>,
    duration: Duration,
    status: RunStatus,
    steps: Vec<StepResult>,
) -> TestRun {
    TestRun {
        id: RunId::new(),
        agent_id: agent.id.clone(),
        status,
        scenario: agent
            .configuration
            .scenarios
            .first()
            .map(|s| s.description.clone())
            .unwrap_or_default(),
        started_at,
        ended_at: Some(started_at + duration),
        steps,
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
