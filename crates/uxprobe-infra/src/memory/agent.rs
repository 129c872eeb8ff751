//! In-memory agent repository.

use std::sync::Arc;

use dashmap::DashMap;

use uxprobe_core::repository::SortOrder;
use uxprobe_core::repository::agent::{AgentFilter, AgentRepository};
use uxprobe_types::agent::{Agent, AgentId};
use uxprobe_types::error::RepositoryError;

/// DashMap-backed implementation of `AgentRepository`.
///
/// Keeps a secondary slug index so slug lookups and uniqueness checks don't
/// scan the whole map.
#[derive(Clone, Default)]
pub struct MemoryAgentRepository {
    agents: Arc<DashMap<AgentId, Agent>>,
    slugs: Arc<DashMap<String, AgentId>>,
}

impl MemoryAgentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored agents (used to decide whether to seed samples).
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

impl AgentRepository for MemoryAgentRepository {
    async fn create(&self, agent: &Agent) -> Result<Agent, RepositoryError> {
        match self.slugs.entry(agent.slug.clone()) {
            dashmap::Entry::Occupied(_) => {
                return Err(RepositoryError::Conflict(agent.slug.clone()));
            }
            dashmap::Entry::Vacant(entry) => {
                entry.insert(agent.id.clone());
            }
        }
        self.agents.insert(agent.id.clone(), agent.clone());
        Ok(agent.clone())
    }

    async fn get_by_id(&self, id: &AgentId) -> Result<Option<Agent>, RepositoryError> {
        Ok(self.agents.get(id).map(|entry| entry.clone()))
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Agent>, RepositoryError> {
        let Some(id) = self.slugs.get(slug).map(|entry| entry.clone()) else {
            return Ok(None);
        };
        Ok(self.agents.get(&id).map(|entry| entry.clone()))
    }

    async fn list(&self, filter: Option<AgentFilter>) -> Result<Vec<Agent>, RepositoryError> {
        let filter = filter.unwrap_or_default();

        let mut agents: Vec<Agent> = self
            .agents
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|agent| {
                filter
                    .status
                    .as_ref()
                    .is_none_or(|status| &agent.status == status)
            })
            .collect();

        let sort_by = filter.sort_by.as_deref().unwrap_or("created_at");
        let order = filter.sort_order.unwrap_or_default();
        agents.sort_by(|a, b| {
            let ordering = match sort_by {
                "name" => a.name.cmp(&b.name),
                "updated_at" => a.updated_at.cmp(&b.updated_at),
                "last_run_at" => a.last_run_at.cmp(&b.last_run_at),
                // Unknown fields fall back to creation time
                _ => a.created_at.cmp(&b.created_at),
            };
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let offset = filter.offset.unwrap_or(0).max(0) as usize;
        let mut agents: Vec<Agent> = agents.into_iter().skip(offset).collect();
        if let Some(limit) = filter.limit {
            agents.truncate(limit.max(0) as usize);
        }

        Ok(agents)
    }

    async fn update(&self, agent: &Agent) -> Result<Agent, RepositoryError> {
        let previous = self
            .agents
            .get(&agent.id)
            .map(|entry| entry.clone())
            .ok_or(RepositoryError::NotFound)?;

        if previous.slug != agent.slug {
            match self.slugs.entry(agent.slug.clone()) {
                dashmap::Entry::Occupied(_) => {
                    return Err(RepositoryError::Conflict(agent.slug.clone()));
                }
                dashmap::Entry::Vacant(entry) => {
                    entry.insert(agent.id.clone());
                }
            }
            self.slugs.remove(&previous.slug);
        }

        self.agents.insert(agent.id.clone(), agent.clone());
        Ok(agent.clone())
    }

    async fn delete(&self, id: &AgentId) -> Result<(), RepositoryError> {
        let (_, agent) = self.agents.remove(id).ok_or(RepositoryError::NotFound)?;
        self.slugs.remove(&agent.slug);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uxprobe_types::agent::{AgentStatus, PersonaProfile, TestConfig, slugify};

    fn sample_agent(name: &str, status: AgentStatus) -> Agent {
        let now = Utc::now();
        Agent {
            id: AgentId::new(),
            slug: slugify(name),
            name: name.to_string(),
            description: String::new(),
            status,
            persona: PersonaProfile::default(),
            configuration: TestConfig::default(),
            issues_found: 0,
            progress: 0,
            success_rate: None,
            created_at: now,
            updated_at: now,
            last_run_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let repo = MemoryAgentRepository::new();
        let agent = sample_agent("Senior User Agent", AgentStatus::Active);
        repo.create(&agent).await.unwrap();

        let by_id = repo.get_by_id(&agent.id).await.unwrap().unwrap();
        assert_eq!(by_id.name, "Senior User Agent");

        let by_slug = repo.get_by_slug("senior-user-agent").await.unwrap().unwrap();
        assert_eq!(by_slug.id, agent.id);
    }

    #[tokio::test]
    async fn test_create_duplicate_slug_conflicts() {
        let repo = MemoryAgentRepository::new();
        repo.create(&sample_agent("Shopper", AgentStatus::Active))
            .await
            .unwrap();

        let dup = sample_agent("Shopper", AgentStatus::Paused);
        let err = repo.create(&dup).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_filters_by_status() {
        let repo = MemoryAgentRepository::new();
        repo.create(&sample_agent("A", AgentStatus::Active)).await.unwrap();
        repo.create(&sample_agent("B", AgentStatus::Paused)).await.unwrap();
        repo.create(&sample_agent("C", AgentStatus::Active)).await.unwrap();

        let filter = AgentFilter {
            status: Some(AgentStatus::Active),
            ..Default::default()
        };
        let active = repo.list(Some(filter)).await.unwrap();
        assert_eq!(active.len(), 2);

        let all = repo.list(None).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_list_sorts_by_name_ascending() {
        let repo = MemoryAgentRepository::new();
        repo.create(&sample_agent("Bravo", AgentStatus::Active)).await.unwrap();
        repo.create(&sample_agent("Alpha", AgentStatus::Active)).await.unwrap();

        let filter = AgentFilter {
            sort_by: Some("name".to_string()),
            sort_order: Some(SortOrder::Asc),
            ..Default::default()
        };
        let agents = repo.list(Some(filter)).await.unwrap();
        assert_eq!(agents[0].name, "Alpha");
        assert_eq!(agents[1].name, "Bravo");
    }

    #[tokio::test]
    async fn test_list_applies_offset_and_limit() {
        let repo = MemoryAgentRepository::new();
        for name in ["A", "B", "C", "D"] {
            repo.create(&sample_agent(name, AgentStatus::Active)).await.unwrap();
        }

        let filter = AgentFilter {
            sort_by: Some("name".to_string()),
            sort_order: Some(SortOrder::Asc),
            offset: Some(1),
            limit: Some(2),
            ..Default::default()
        };
        let page = repo.list(Some(filter)).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].name, "B");
        assert_eq!(page[1].name, "C");
    }

    #[tokio::test]
    async fn test_update_changes_status() {
        let repo = MemoryAgentRepository::new();
        let mut agent = sample_agent("Shopper", AgentStatus::Active);
        repo.create(&agent).await.unwrap();

        agent.status = AgentStatus::Paused;
        repo.update(&agent).await.unwrap();

        let stored = repo.get_by_id(&agent.id).await.unwrap().unwrap();
        assert_eq!(stored.status, AgentStatus::Paused);
    }

    #[tokio::test]
    async fn test_update_missing_agent_is_not_found() {
        let repo = MemoryAgentRepository::new();
        let agent = sample_agent("Ghost", AgentStatus::Active);
        let err = repo.update(&agent).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_frees_slug() {
        let repo = MemoryAgentRepository::new();
        let agent = sample_agent("Shopper", AgentStatus::Active);
        repo.create(&agent).await.unwrap();
        repo.delete(&agent.id).await.unwrap();

        assert!(repo.get_by_slug("shopper").await.unwrap().is_none());
        // Slug is reusable after delete
        repo.create(&sample_agent("Shopper", AgentStatus::Active))
            .await
            .unwrap();
    }
}
