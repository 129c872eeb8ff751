//! CLI command definitions and dispatch for the `uxp` binary.
//!
//! Uses clap derive macros for argument parsing. The CLI follows a verb-noun
//! pattern (e.g., `uxp create agent`, `uxp list agents`).

pub mod agent;
pub mod report;
pub mod status;
pub mod wizard;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Manage your AI testing agents.
#[derive(Parser)]
#[command(name = "uxp", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new resource.
    Create {
        #[command(subcommand)]
        resource: CreateResource,
    },

    /// List resources.
    #[command(alias = "ls")]
    List {
        #[command(subcommand)]
        resource: ListResource,
    },

    /// Show details of an agent.
    Show {
        /// Agent slug to display.
        slug: String,
    },

    /// Start a test run for an agent.
    Start {
        /// Agent slug.
        slug: String,
    },

    /// Stop the in-flight test run of an agent.
    Stop {
        /// Agent slug.
        slug: String,
    },

    /// Delete a resource.
    #[command(alias = "rm")]
    Delete {
        #[command(subcommand)]
        resource: DeleteResource,
    },

    /// Dashboard overview: stat cards and recent agents.
    Status,

    /// List test reports.
    Reports,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum CreateResource {
    /// Create an agent, either through the three-step wizard or one-shot flags.
    Agent {
        /// Agent display name (skips the wizard's prompts when given).
        #[arg(long)]
        name: Option<String>,

        /// What this agent will test.
        #[arg(long)]
        description: Option<String>,

        /// URL of the application under test.
        #[arg(long)]
        target_url: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ListResource {
    /// List agents.
    Agents {
        /// Filter by status (active, paused, completed).
        #[arg(long)]
        status: Option<String>,

        /// Sort field (created_at, updated_at, name, last_run_at).
        #[arg(long, default_value = "created_at")]
        sort: String,
    },
}

#[derive(Subcommand)]
pub enum DeleteResource {
    /// Delete an agent and its run history.
    Agent {
        /// Agent slug.
        slug: String,

        /// Skip the confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}
