//! Application state wiring services together.
//!
//! AppState holds the concrete service instance used by the CLI commands.
//! The service is generic over repository traits, but AppState pins it to
//! the in-memory infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use uxprobe_core::service::agent::AgentService;
use uxprobe_infra::config::load_global_config;
use uxprobe_infra::filesystem::resolve_data_dir;
use uxprobe_infra::memory::{MemoryAgentRepository, MemoryRunRepository};
use uxprobe_infra::sample::seed_catalog;
use uxprobe_types::config::GlobalConfig;

/// Concrete type alias for the service generics pinned to infra implementations.
pub type ConcreteAgentService = AgentService<MemoryAgentRepository, MemoryRunRepository>;

/// Shared application state holding the wired service and config.
#[derive(Clone)]
pub struct AppState {
    pub agent_service: Arc<ConcreteAgentService>,
    pub config: GlobalConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: resolve the data dir, load config,
    /// build the in-memory stores, and seed the sample catalog.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // The data dir only ever holds config.toml; create it so a first
        // run can drop a config file in without extra steps.
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_global_config(&data_dir).await;

        let agent_repo = MemoryAgentRepository::new();
        let run_repo = MemoryRunRepository::new();

        if config.seed_samples {
            seed_catalog(&agent_repo, &run_repo).await?;
        }

        let agent_service = AgentService::new(agent_repo, run_repo);

        Ok(Self {
            agent_service: Arc::new(agent_service),
            config,
            data_dir,
        })
    }
}
