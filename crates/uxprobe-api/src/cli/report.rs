//! Test-report listing command.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use uxprobe_core::service::stats::build_reports;

use crate::state::AppState;

/// List report rows derived from finished runs, most recent first.
pub async fn list_reports(state: &AppState, json: bool) -> Result<()> {
    let agents = state.agent_service.list_agents(None).await?;
    let runs = state.agent_service.all_runs().await?;

    let reports = build_reports(&agents, &runs);

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    if reports.is_empty() {
        println!();
        println!(
            "  {} No reports yet. Finished test runs show up here.",
            style("i").blue().bold()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Report").fg(Color::White),
        Cell::new("Date").fg(Color::White),
        Cell::new("Agent").fg(Color::White),
        Cell::new("Persona").fg(Color::White),
        Cell::new("Issues").fg(Color::White),
        Cell::new("Duration").fg(Color::White),
    ]);

    for report in &reports {
        table.add_row(vec![
            Cell::new(&report.title).fg(Color::Cyan),
            Cell::new(report.date.format("%b %d, %Y").to_string()),
            Cell::new(&report.agent),
            Cell::new(&report.persona),
            Cell::new(report.issues_found).fg(if report.issues_found > 0 {
                Color::Red
            } else {
                Color::Green
            }),
            Cell::new(&report.duration).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} report{}",
        style(reports.len()).bold(),
        if reports.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}
