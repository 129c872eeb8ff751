//! Dashboard overview command.

use anyhow::Result;
use console::style;

use uxprobe_core::service::stats::{dashboard_stats, persona_label, recent_agents};

use crate::cli::agent::{format_relative_time, format_status};
use crate::state::AppState;

/// Display the dashboard: the four stat cards plus recent agents.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let agents = state.agent_service.list_agents(None).await?;
    let runs = state.agent_service.all_runs().await?;

    let stats = dashboard_stats(&agents, &runs);
    let recent = recent_agents(&agents, state.config.recent_limit);

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "stats": stats,
            "recent_agents": recent,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} uxprobe v{}",
        style("⚡").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Overview ──").dim());
    println!("  Agents:        {}", style(stats.total_agents).bold());
    println!("  Personas:      {}", style(stats.total_personas).bold());
    println!(
        "  Issues found:  {}",
        style(stats.issues_found).red().bold()
    );
    println!(
        "  Testing hours: {}",
        style(stats.testing_hours).green().bold()
    );
    println!();

    println!("  {}", style("── Recent Agents ──").dim());
    if recent.is_empty() {
        println!(
            "  None yet. Create one with: {}",
            style("uxp create agent").yellow()
        );
    }
    for agent in &recent {
        let last_run = match &agent.last_run_at {
            Some(dt) => format_relative_time(dt),
            None => "never".to_string(),
        };
        println!(
            "  {} {} ({}) -- {} issues, last run {}",
            format_status(&agent.status),
            style(&agent.name).cyan(),
            persona_label(agent),
            agent.issues_found,
            last_run
        );
    }
    println!();

    Ok(())
}
