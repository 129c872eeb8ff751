//! uxprobe CLI entry point.
//!
//! Binary name: `uxp`
//!
//! Parses CLI arguments, initializes the tracing subscriber and the
//! in-memory catalog, then dispatches to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands, CreateResource, DeleteResource, ListResource};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity; UXPROBE_OTEL additionally exports
    // spans to stdout via OpenTelemetry.
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,uxprobe=debug",
        _ => "trace",
    };
    let enable_otel = std::env::var_os("UXPROBE_OTEL").is_some();
    uxprobe_observe::tracing_setup::init_tracing(filter, enable_otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "uxp", &mut std::io::stdout());
        return Ok(());
    }

    // Initialize application state (config, in-memory catalog, services)
    let state = AppState::init().await?;

    let result = dispatch(&cli, &state).await;

    uxprobe_observe::tracing_setup::shutdown_tracing();
    result
}

async fn dispatch(cli: &Cli, state: &AppState) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Create { resource } => match resource {
            CreateResource::Agent {
                name,
                description,
                target_url,
            } => {
                cli::wizard::create_agent(
                    state,
                    name.clone(),
                    description.clone(),
                    target_url.clone(),
                    cli.json,
                )
                .await?;
            }
        },

        Commands::List { resource } => match resource {
            ListResource::Agents { status, sort } => {
                cli::agent::list_agents(state, status.clone(), sort, cli.json).await?;
            }
        },

        Commands::Show { slug } => {
            cli::agent::show_agent(state, slug, cli.json).await?;
        }

        Commands::Start { slug } => {
            cli::agent::start_test(state, slug, cli.json).await?;
        }

        Commands::Stop { slug } => {
            cli::agent::stop_test(state, slug, cli.json).await?;
        }

        Commands::Delete { resource } => match resource {
            DeleteResource::Agent { slug, force } => {
                cli::agent::delete_agent(state, slug, *force, cli.json).await?;
            }
        },

        Commands::Status => {
            cli::status::status(state, cli.json).await?;
        }

        Commands::Reports => {
            cli::report::list_reports(state, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
