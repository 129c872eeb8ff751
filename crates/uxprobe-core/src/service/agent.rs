//! Agent management service.
//!
//! Orchestrates agent creation from a submitted wizard payload, listing,
//! deletion, and the start/stop run-state toggles. There is no execution
//! engine behind start/stop: starting opens a `TestRun` record and flips the
//! agent's status, stopping closes it.

use chrono::Utc;

use uxprobe_types::agent::{Agent, AgentId, AgentStatus, CreateAgentRequest, slugify};
use uxprobe_types::error::AgentError;
use uxprobe_types::run::{RunId, RunStatus, StepResult, StepStatus, TestRun};

use crate::repository::agent::{AgentFilter, AgentRepository};
use crate::repository::run::RunRepository;

/// Service orchestrating the agent lifecycle.
///
/// Generic over repository traits to keep the clean-architecture split --
/// uxprobe-core never depends on uxprobe-infra.
pub struct AgentService<A: AgentRepository, R: RunRepository> {
    agent_repo: A,
    run_repo: R,
}

impl<A: AgentRepository, R: RunRepository> AgentService<A, R> {
    pub fn new(agent_repo: A, run_repo: R) -> Self {
        Self {
            agent_repo,
            run_repo,
        }
    }

    /// Create an agent from a finalized wizard submission.
    ///
    /// The only content validation in the whole pipeline happens here: the
    /// display name must be non-empty after trimming (the wizard itself
    /// never gates anything). Everything else -- blank target URL,
    /// non-numeric age or timing fields -- is stored as submitted.
    pub async fn create_agent(&self, request: CreateAgentRequest) -> Result<Agent, AgentError> {
        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(AgentError::InvalidName("name cannot be empty".to_string()));
        }

        let base_slug = slugify(&name);
        if base_slug.is_empty() {
            return Err(AgentError::InvalidName(
                "name must contain at least one alphanumeric character".to_string(),
            ));
        }

        let slug = self.ensure_unique_slug(&base_slug).await?;
        let now = Utc::now();

        let agent = Agent {
            id: AgentId::new(),
            slug,
            name,
            description: request.description,
            status: AgentStatus::Active,
            persona: request.persona,
            configuration: request.configuration,
            issues_found: 0,
            progress: 0,
            success_rate: None,
            created_at: now,
            updated_at: now,
            last_run_at: None,
        };

        tracing::info!(slug = %agent.slug, "creating agent");

        self.agent_repo.create(&agent).await.map_err(|e| match e {
            uxprobe_types::error::RepositoryError::Conflict(msg) => AgentError::SlugConflict(msg),
            other => AgentError::StorageError(other.to_string()),
        })
    }

    /// Ensure a slug is unique by appending -2, -3, etc. if needed.
    async fn ensure_unique_slug(&self, base_slug: &str) -> Result<String, AgentError> {
        let mut slug = base_slug.to_string();
        let mut counter = 2;

        loop {
            let existing = self
                .agent_repo
                .get_by_slug(&slug)
                .await
                .map_err(|e| AgentError::StorageError(e.to_string()))?;

            if existing.is_none() {
                return Ok(slug);
            }

            slug = format!("{base_slug}-{counter}");
            counter += 1;

            // Safety valve: prevent infinite loops
            if counter > 100 {
                return Err(AgentError::SlugConflict(format!(
                    "could not generate unique slug from '{base_slug}'"
                )));
            }
        }
    }

    /// Get an agent by ID.
    pub async fn get_agent(&self, id: &AgentId) -> Result<Agent, AgentError> {
        self.agent_repo
            .get_by_id(id)
            .await
            .map_err(|e| AgentError::StorageError(e.to_string()))?
            .ok_or(AgentError::NotFound)
    }

    /// Get an agent by slug.
    pub async fn get_agent_by_slug(&self, slug: &str) -> Result<Agent, AgentError> {
        self.agent_repo
            .get_by_slug(slug)
            .await
            .map_err(|e| AgentError::StorageError(e.to_string()))?
            .ok_or(AgentError::NotFound)
    }

    /// List agents with optional filtering.
    pub async fn list_agents(&self, filter: Option<AgentFilter>) -> Result<Vec<Agent>, AgentError> {
        self.agent_repo
            .list(filter)
            .await
            .map_err(|e| AgentError::StorageError(e.to_string()))
    }

    /// Test-run history for one agent, most recent first.
    pub async fn run_history(&self, id: &AgentId) -> Result<Vec<TestRun>, AgentError> {
        self.run_repo
            .list_for_agent(id)
            .await
            .map_err(|e| AgentError::StorageError(e.to_string()))
    }

    /// Every recorded run, most recent first (dashboard and report feeds).
    pub async fn all_runs(&self) -> Result<Vec<TestRun>, AgentError> {
        self.run_repo
            .list_all()
            .await
            .map_err(|e| AgentError::StorageError(e.to_string()))
    }

    /// Start a test: open a run against the agent's first scenario and mark
    /// the agent active.
    ///
    /// A single run may be in flight per agent; starting while one is open
    /// fails with `AlreadyRunning` rather than stacking runs.
    pub async fn start_test(&self, id: &AgentId) -> Result<TestRun, AgentError> {
        let mut agent = self.get_agent(id).await?;

        if self.open_run(id).await?.is_some() {
            return Err(AgentError::AlreadyRunning);
        }

        let scenario = agent
            .configuration
            .scenarios
            .first()
            .map(|s| s.description.clone())
            .unwrap_or_default();
        let steps = agent
            .configuration
            .scenarios
            .first()
            .map(|s| {
                s.steps
                    .iter()
                    .map(|step| StepResult {
                        description: step.clone(),
                        status: StepStatus::Pending,
                        error: None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let now = Utc::now();
        let run = TestRun {
            id: RunId::new(),
            agent_id: agent.id.clone(),
            status: RunStatus::Running,
            scenario,
            started_at: now,
            ended_at: None,
            steps,
        };

        let run = self
            .run_repo
            .add(&run)
            .await
            .map_err(|e| AgentError::StorageError(e.to_string()))?;

        agent.status = AgentStatus::Active;
        agent.progress = 0;
        agent.last_run_at = Some(now);
        agent.updated_at = now;
        self.agent_repo
            .update(&agent)
            .await
            .map_err(|e| AgentError::StorageError(e.to_string()))?;

        tracing::info!(slug = %agent.slug, run = %run.id, "test started");
        Ok(run)
    }

    /// Stop the in-flight test: mark the open run stopped and pause the agent.
    pub async fn stop_test(&self, id: &AgentId) -> Result<TestRun, AgentError> {
        let mut agent = self.get_agent(id).await?;

        let mut run = self.open_run(id).await?.ok_or(AgentError::NotRunning)?;

        let now = Utc::now();
        run.status = RunStatus::Stopped;
        run.ended_at = Some(now);
        let run = self
            .run_repo
            .update(&run)
            .await
            .map_err(|e| AgentError::StorageError(e.to_string()))?;

        agent.status = AgentStatus::Paused;
        agent.updated_at = now;
        self.agent_repo
            .update(&agent)
            .await
            .map_err(|e| AgentError::StorageError(e.to_string()))?;

        tracing::info!(slug = %agent.slug, run = %run.id, "test stopped");
        Ok(run)
    }

    /// Delete an agent and its run history.
    pub async fn delete_agent(&self, id: &AgentId) -> Result<(), AgentError> {
        // Resolve first so a missing agent reports NotFound, not a silent pass
        let agent = self.get_agent(id).await?;

        self.run_repo
            .delete_for_agent(id)
            .await
            .map_err(|e| AgentError::StorageError(e.to_string()))?;

        self.agent_repo
            .delete(id)
            .await
            .map_err(|e| AgentError::StorageError(e.to_string()))?;

        tracing::info!(slug = %agent.slug, "agent deleted");
        Ok(())
    }

    /// The agent's currently open run, if any.
    async fn open_run(&self, id: &AgentId) -> Result<Option<TestRun>, AgentError> {
        let runs = self
            .run_repo
            .list_for_agent(id)
            .await
            .map_err(|e| AgentError::StorageError(e.to_string()))?;
        Ok(runs.into_iter().find(|r| r.status == RunStatus::Running))
    }
}
