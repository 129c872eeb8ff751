//! Agent lifecycle CLI commands: list, show, start, stop, delete.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};

use uxprobe_core::repository::agent::AgentFilter;
use uxprobe_core::service::stats::persona_label;
use uxprobe_types::agent::{Agent, AgentStatus};
use uxprobe_types::run::{StepStatus, TestRun};

use crate::state::AppState;

/// List all agents in a rich colored table.
pub async fn list_agents(
    state: &AppState,
    status: Option<String>,
    sort: &str,
    json: bool,
) -> Result<()> {
    let status_filter = match status {
        Some(s) => Some(s.parse::<AgentStatus>().map_err(|e| anyhow::anyhow!(e))?),
        None => None,
    };

    let filter = Some(AgentFilter {
        status: status_filter,
        sort_by: Some(sort.to_string()),
        ..Default::default()
    });

    let agents = state.agent_service.list_agents(filter).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&agents)?);
        return Ok(());
    }

    if agents.is_empty() {
        println!();
        println!(
            "  {} No agents found. Create one with: {}",
            style("i").blue().bold(),
            style("uxp create agent").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Name").fg(Color::White),
        Cell::new("Slug").fg(Color::White),
        Cell::new("Status").fg(Color::White),
        Cell::new("Persona").fg(Color::White),
        Cell::new("Issues").fg(Color::White),
        Cell::new("Last Run").fg(Color::White),
    ]);

    for agent in &agents {
        let last_run = match &agent.last_run_at {
            Some(dt) => format_relative_time(dt),
            None => "never".to_string(),
        };

        table.add_row(vec![
            Cell::new(&agent.name).fg(Color::Cyan),
            Cell::new(&agent.slug).fg(Color::White),
            status_cell(&agent.status),
            Cell::new(persona_label(agent)),
            Cell::new(agent.issues_found),
            Cell::new(last_run).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} agent{}",
        style(agents.len()).bold(),
        if agents.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Show the full profile for an agent: persona, configuration, run history.
pub async fn show_agent(state: &AppState, slug: &str, json: bool) -> Result<()> {
    let agent = state.agent_service.get_agent_by_slug(slug).await?;
    let runs = state.agent_service.run_history(&agent.id).await?;

    if json {
        let detail = serde_json::json!({
            "agent": agent,
            "test_runs": runs,
        });
        println!("{}", serde_json::to_string_pretty(&detail)?);
        return Ok(());
    }

    println!();
    println!("  {}", style(&agent.name).cyan().bold());
    if !agent.description.is_empty() {
        println!("  {}", style(&agent.description).dim());
    }
    println!();

    println!("  {}", style("── Details ──").dim());
    println!("  {}        {}", style("Slug:").bold(), &agent.slug);
    println!(
        "  {}      {}",
        style("Status:").bold(),
        format_status(&agent.status)
    );
    if let Some(rate) = agent.success_rate {
        println!("  {} {rate}%", style("Success rate:").bold());
    }
    println!(
        "  {}    {}",
        style("Progress:").bold(),
        format!("{}%", agent.progress)
    );
    println!(
        "  {}      {}",
        style("Issues:").bold(),
        agent.issues_found
    );
    println!(
        "  {}          {}",
        style("ID:").bold(),
        style(agent.id.to_string()).dim()
    );
    println!();

    print_persona(&agent);
    print_configuration(&agent);
    print_history(&runs);

    println!("  {}", style("── Timestamps ──").dim());
    println!(
        "  {}  {}",
        style("Created:").bold(),
        agent.created_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!(
        "  {}  {}",
        style("Updated:").bold(),
        agent.updated_at.format("%Y-%m-%d %H:%M UTC")
    );
    if let Some(last) = &agent.last_run_at {
        println!(
            "  {} {}",
            style("Last run:").bold(),
            last.format("%Y-%m-%d %H:%M UTC")
        );
    }
    println!();

    Ok(())
}

fn print_persona(agent: &Agent) {
    let persona = &agent.persona;

    println!("  {}", style("── Persona ──").dim());
    println!(
        "  {}       {}",
        style("Name:").bold(),
        if persona.name.is_empty() {
            "(unnamed)"
        } else {
            &persona.name
        }
    );
    if !persona.age.is_empty() {
        println!("  {}        {}", style("Age:").bold(), &persona.age);
    }
    println!(
        "  {} {}",
        style("Tech level:").bold(),
        persona.tech_level
    );
    if !persona.traits.is_empty() {
        println!(
            "  {}     {}",
            style("Traits:").bold(),
            persona.traits.join(", ")
        );
    }
    if !persona.goals.is_empty() {
        println!(
            "  {}      {}",
            style("Goals:").bold(),
            persona.goals.join(", ")
        );
    }
    if !persona.preferences.is_empty() {
        println!(
            "  {}  {}",
            style("Prefers:").bold(),
            persona.preferences.join(", ")
        );
    }
    println!();
}

fn print_configuration(agent: &Agent) {
    let config = &agent.configuration;

    println!("  {}", style("── Configuration ──").dim());
    println!(
        "  {}   {}",
        style("Target URL:").bold(),
        if config.target_url.is_empty() {
            style("(not set)").dim().to_string()
        } else {
            config.target_url.clone()
        }
    );
    println!(
        "  {}    {}s between actions",
        style("Wait time:").bold(),
        &config.wait_time
    );
    println!(
        "  {} {}m",
        style("Max duration:").bold(),
        &config.max_duration
    );

    for (i, scenario) in config.scenarios.iter().enumerate() {
        println!();
        let title = if scenario.description.is_empty() {
            format!("Scenario {}", i + 1)
        } else {
            format!("Scenario {}: {}", i + 1, scenario.description)
        };
        println!("  {}", style(title).bold());
        for (j, step) in scenario.steps.iter().enumerate() {
            let text = if step.is_empty() { "(empty step)" } else { step };
            println!("    {}. {}", j + 1, text);
        }
    }
    println!();
}

fn print_history(runs: &[TestRun]) {
    println!("  {}", style("── Test History ──").dim());
    if runs.is_empty() {
        println!("  {}", style("No runs recorded.").dim());
        println!();
        return;
    }

    for run in runs {
        let duration = match run.ended_at {
            Some(end) => {
                uxprobe_core::service::stats::format_duration(end - run.started_at)
            }
            None => "in progress".to_string(),
        };
        println!(
            "  {} {} {} ({})",
            run_glyph(run),
            run.started_at.format("%Y-%m-%d %H:%M"),
            &run.scenario,
            duration
        );
        for step in &run.steps {
            let mark = match step.status {
                StepStatus::Success => format!("{}", style("✓").green()),
                StepStatus::Error => format!("{}", style("✗").red()),
                StepStatus::Pending => format!("{}", style("·").dim()),
            };
            match &step.error {
                Some(err) => println!(
                    "      {mark} {} {}",
                    &step.description,
                    style(format!("-- {err}")).red()
                ),
                None => println!("      {mark} {}", &step.description),
            }
        }
    }
    println!();
}

/// Start a test run for an agent.
pub async fn start_test(state: &AppState, slug: &str, json: bool) -> Result<()> {
    let agent = state.agent_service.get_agent_by_slug(slug).await?;

    let spinner = spinner("cyan", format!("Starting test for {}...", agent.name));
    let run = state.agent_service.start_test(&agent.id).await?;
    spinner.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&run)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Test started for '{}'",
        style("▶").green().bold(),
        style(&agent.name).cyan()
    );
    if !run.scenario.is_empty() {
        println!("  Scenario: {}", &run.scenario);
    }
    println!(
        "  Stop it with: {}",
        style(format!("uxp stop {}", agent.slug)).yellow()
    );
    println!();

    Ok(())
}

/// Stop the in-flight test run of an agent.
pub async fn stop_test(state: &AppState, slug: &str, json: bool) -> Result<()> {
    let agent = state.agent_service.get_agent_by_slug(slug).await?;

    let spinner = spinner("red", format!("Stopping test for {}...", agent.name));
    let run = state.agent_service.stop_test(&agent.id).await?;
    spinner.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&run)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Test stopped for '{}'",
        style("■").red().bold(),
        style(&agent.name).cyan()
    );
    println!();

    Ok(())
}

/// Delete an agent and its run history, with confirmation.
pub async fn delete_agent(state: &AppState, slug: &str, force: bool, json: bool) -> Result<()> {
    let agent = state.agent_service.get_agent_by_slug(slug).await?;

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Permanently delete agent '{}' and its run history?",
                style(&agent.name).red().bold()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    let spinner = spinner("red", format!("Deleting {}...", agent.name));
    state.agent_service.delete_agent(&agent.id).await?;
    spinner.finish_and_clear();

    if json {
        println!("{}", serde_json::json!({"deleted": true, "slug": slug}));
    } else {
        println!(
            "  {} Agent '{}' deleted.",
            style("✓").red().bold(),
            agent.name
        );
    }

    Ok(())
}

// --- Formatting helpers ---

fn spinner(color: &str, message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .template(&format!("{{spinner:.{color}}} {{msg}}"))
            .unwrap(),
    );
    bar.set_message(message);
    bar.enable_steady_tick(std::time::Duration::from_millis(80));
    bar
}

pub(crate) fn format_status(status: &AgentStatus) -> String {
    match status {
        AgentStatus::Active => format!("{}", style("● active").green()),
        AgentStatus::Paused => format!("{}", style("○ paused").yellow()),
        AgentStatus::Completed => format!("{}", style("◌ completed").dim()),
    }
}

pub(crate) fn status_cell(status: &AgentStatus) -> Cell {
    match status {
        AgentStatus::Active => Cell::new("● active").fg(Color::Green),
        AgentStatus::Paused => Cell::new("○ paused").fg(Color::Yellow),
        AgentStatus::Completed => Cell::new("◌ completed").fg(Color::DarkGrey),
    }
}

fn run_glyph(run: &TestRun) -> String {
    use uxprobe_types::run::RunStatus;
    match run.status {
        RunStatus::Running => format!("{}", style("▶").green()),
        RunStatus::Completed => format!("{}", style("✓").green()),
        RunStatus::Failed => format!("{}", style("✗").red()),
        RunStatus::Stopped => format!("{}", style("■").yellow()),
    }
}

pub(crate) fn format_relative_time(dt: &chrono::DateTime<chrono::Utc>) -> String {
    let now = chrono::Utc::now();
    let diff = now - *dt;

    if diff.num_minutes() < 1 {
        "just now".to_string()
    } else if diff.num_hours() < 1 {
        format!("{}m ago", diff.num_minutes())
    } else if diff.num_days() < 1 {
        format!("{}h ago", diff.num_hours())
    } else if diff.num_days() < 30 {
        format!("{}d ago", diff.num_days())
    } else {
        dt.format("%Y-%m-%d").to_string()
    }
}
