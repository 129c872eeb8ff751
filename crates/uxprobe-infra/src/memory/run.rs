//! In-memory test-run repository.

use std::sync::Arc;

use dashmap::DashMap;

use uxprobe_core::repository::run::RunRepository;
use uxprobe_types::agent::AgentId;
use uxprobe_types::error::RepositoryError;
use uxprobe_types::run::{RunId, TestRun};

/// DashMap-backed implementation of `RunRepository`.
#[derive(Clone, Default)]
pub struct MemoryRunRepository {
    runs: Arc<DashMap<RunId, TestRun>>,
}

impl MemoryRunRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted_desc(mut runs: Vec<TestRun>) -> Vec<TestRun> {
        runs.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        runs
    }
}

impl RunRepository for MemoryRunRepository {
    async fn add(&self, run: &TestRun) -> Result<TestRun, RepositoryError> {
        if self.runs.contains_key(&run.id) {
            return Err(RepositoryError::Conflict(run.id.to_string()));
        }
        self.runs.insert(run.id.clone(), run.clone());
        Ok(run.clone())
    }

    async fn get_by_id(&self, id: &RunId) -> Result<Option<TestRun>, RepositoryError> {
        Ok(self.runs.get(id).map(|entry| entry.clone()))
    }

    async fn update(&self, run: &TestRun) -> Result<TestRun, RepositoryError> {
        if !self.runs.contains_key(&run.id) {
            return Err(RepositoryError::NotFound);
        }
        self.runs.insert(run.id.clone(), run.clone());
        Ok(run.clone())
    }

    async fn list_for_agent(&self, agent_id: &AgentId) -> Result<Vec<TestRun>, RepositoryError> {
        let runs: Vec<TestRun> = self
            .runs
            .iter()
            .filter(|entry| &entry.value().agent_id == agent_id)
            .map(|entry| entry.value().clone())
            .collect();
        Ok(Self::sorted_desc(runs))
    }

    async fn list_all(&self) -> Result<Vec<TestRun>, RepositoryError> {
        let runs: Vec<TestRun> = self.runs.iter().map(|entry| entry.value().clone()).collect();
        Ok(Self::sorted_desc(runs))
    }

    async fn delete_for_agent(&self, agent_id: &AgentId) -> Result<(), RepositoryError> {
        self.runs.retain(|_, run| &run.agent_id != agent_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uxprobe_types::run::{RunStatus, StepResult};

    fn run_for(agent_id: &AgentId, minutes_ago: i64) -> TestRun {
        let started = Utc::now() - Duration::minutes(minutes_ago);
        TestRun {
            id: RunId::new(),
            agent_id: agent_id.clone(),
            status: RunStatus::Completed,
            scenario: "Complete checkout flow".to_string(),
            started_at: started,
            ended_at: Some(started + Duration::minutes(5)),
            steps: vec![StepResult::success("Browse product catalog")],
        }
    }

    #[tokio::test]
    async fn test_add_and_list_most_recent_first() {
        let repo = MemoryRunRepository::new();
        let agent_id = AgentId::new();

        let old = run_for(&agent_id, 60);
        let recent = run_for(&agent_id, 5);
        repo.add(&old).await.unwrap();
        repo.add(&recent).await.unwrap();

        let runs = repo.list_for_agent(&agent_id).await.unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].id, recent.id);
        assert_eq!(runs[1].id, old.id);
    }

    #[tokio::test]
    async fn test_list_for_agent_scopes_to_agent() {
        let repo = MemoryRunRepository::new();
        let a = AgentId::new();
        let b = AgentId::new();
        repo.add(&run_for(&a, 10)).await.unwrap();
        repo.add(&run_for(&b, 10)).await.unwrap();

        assert_eq!(repo.list_for_agent(&a).await.unwrap().len(), 1);
        assert_eq!(repo.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_transitions_status() {
        let repo = MemoryRunRepository::new();
        let agent_id = AgentId::new();
        let mut run = run_for(&agent_id, 10);
        run.status = RunStatus::Running;
        run.ended_at = None;
        repo.add(&run).await.unwrap();

        run.status = RunStatus::Stopped;
        run.ended_at = Some(Utc::now());
        repo.update(&run).await.unwrap();

        let stored = repo.get_by_id(&run.id).await.unwrap().unwrap();
        assert_eq!(stored.status, RunStatus::Stopped);
        assert!(stored.ended_at.is_some());
    }

    #[tokio::test]
    async fn test_update_missing_run_is_not_found() {
        let repo = MemoryRunRepository::new();
        let run = run_for(&AgentId::new(), 10);
        let err = repo.update(&run).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_for_agent_cascades() {
        let repo = MemoryRunRepository::new();
        let a = AgentId::new();
        let b = AgentId::new();
        repo.add(&run_for(&a, 10)).await.unwrap();
        repo.add(&run_for(&a, 20)).await.unwrap();
        repo.add(&run_for(&b, 10)).await.unwrap();

        repo.delete_for_agent(&a).await.unwrap();

        assert!(repo.list_for_agent(&a).await.unwrap().is_empty());
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }
}
