//! Test-run repository trait definition.

use uxprobe_types::agent::AgentId;
use uxprobe_types::error::RepositoryError;
use uxprobe_types::run::{RunId, TestRun};

/// Repository trait for test-run history.
///
/// Runs are append-mostly: created when a test starts, updated once when it
/// ends, never deleted individually (they go with their agent).
pub trait RunRepository: Send + Sync {
    /// Record a new run.
    fn add(
        &self,
        run: &TestRun,
    ) -> impl std::future::Future<Output = Result<TestRun, RepositoryError>> + Send;

    /// Get a run by ID.
    fn get_by_id(
        &self,
        id: &RunId,
    ) -> impl std::future::Future<Output = Result<Option<TestRun>, RepositoryError>> + Send;

    /// Update an existing run (status transition, end timestamp, steps).
    fn update(
        &self,
        run: &TestRun,
    ) -> impl std::future::Future<Output = Result<TestRun, RepositoryError>> + Send;

    /// List runs for one agent, most recently started first.
    fn list_for_agent(
        &self,
        agent_id: &AgentId,
    ) -> impl std::future::Future<Output = Result<Vec<TestRun>, RepositoryError>> + Send;

    /// List all runs, most recently started first.
    fn list_all(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<TestRun>, RepositoryError>> + Send;

    /// Delete all runs belonging to an agent (cascade on agent delete).
    fn delete_for_agent(
        &self,
        agent_id: &AgentId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
