//! Agent repository trait definition.

use uxprobe_types::agent::{Agent, AgentId, AgentStatus};
use uxprobe_types::error::RepositoryError;

use super::SortOrder;

/// Filter criteria for listing agents.
#[derive(Debug, Clone, Default)]
pub struct AgentFilter {
    /// Filter by run state (the dashboard's all/active/paused/completed tabs).
    pub status: Option<AgentStatus>,
    /// Field to sort by (e.g., "created_at", "name", "updated_at").
    pub sort_by: Option<String>,
    /// Sort direction.
    pub sort_order: Option<SortOrder>,
    /// Maximum number of results.
    pub limit: Option<i64>,
    /// Number of results to skip (offset pagination).
    pub offset: Option<i64>,
}

/// Repository trait for agent persistence.
///
/// Implementations live in uxprobe-infra (e.g., MemoryAgentRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait AgentRepository: Send + Sync {
    /// Create a new agent. Returns the created agent.
    fn create(
        &self,
        agent: &Agent,
    ) -> impl std::future::Future<Output = Result<Agent, RepositoryError>> + Send;

    /// Get an agent by its unique ID.
    fn get_by_id(
        &self,
        id: &AgentId,
    ) -> impl std::future::Future<Output = Result<Option<Agent>, RepositoryError>> + Send;

    /// Get an agent by its unique slug.
    fn get_by_slug(
        &self,
        slug: &str,
    ) -> impl std::future::Future<Output = Result<Option<Agent>, RepositoryError>> + Send;

    /// List agents with optional filtering, sorting, and pagination.
    fn list(
        &self,
        filter: Option<AgentFilter>,
    ) -> impl std::future::Future<Output = Result<Vec<Agent>, RepositoryError>> + Send;

    /// Update an existing agent. Returns the updated agent.
    fn update(
        &self,
        agent: &Agent,
    ) -> impl std::future::Future<Output = Result<Agent, RepositoryError>> + Send;

    /// Permanently delete an agent by ID.
    fn delete(
        &self,
        id: &AgentId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
