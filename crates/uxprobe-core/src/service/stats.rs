//! Dashboard and report derivations.
//!
//! Pure aggregation over already-loaded agents and runs. The CLI loads the
//! catalog through `AgentService` and hands the slices here; nothing in this
//! module touches storage.

use chrono::Duration;

use uxprobe_types::agent::Agent;
use uxprobe_types::run::{DashboardStats, Report, RunStatus, TestRun};

/// Compute the four dashboard stat cards.
///
/// Persona count equals agent count: each agent embeds exactly one persona.
/// Testing hours are the summed wall-clock of finished runs, rounded down
/// to whole hours.
pub fn dashboard_stats(agents: &[Agent], runs: &[TestRun]) -> DashboardStats {
    let issues_found = agents.iter().map(|a| a.issues_found).sum();

    let tested = runs
        .iter()
        .filter_map(|r| r.ended_at.map(|end| end - r.started_at))
        .fold(Duration::zero(), |acc, d| acc + d);

    DashboardStats {
        total_agents: agents.len(),
        total_personas: agents.len(),
        issues_found,
        testing_hours: tested.num_hours(),
    }
}

/// The `limit` most recently updated agents, for the dashboard's recent list.
pub fn recent_agents(agents: &[Agent], limit: usize) -> Vec<Agent> {
    let mut sorted: Vec<Agent> = agents.to_vec();
    sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    sorted.truncate(limit);
    sorted
}

/// Build report rows from finished runs, most recent first.
///
/// Reports are numbered in chronological order ("Test Report #1" is the
/// oldest), so numbering is stable as new runs finish. Runs whose agent has
/// been deleted are skipped.
pub fn build_reports(agents: &[Agent], runs: &[TestRun]) -> Vec<Report> {
    let mut finished: Vec<&TestRun> = runs
        .iter()
        .filter(|r| r.status != RunStatus::Running && r.ended_at.is_some())
        .collect();
    finished.sort_by_key(|r| r.started_at);

    let mut reports: Vec<Report> = finished
        .iter()
        .enumerate()
        .filter_map(|(i, run)| {
            let agent = agents.iter().find(|a| a.id == run.agent_id)?;
            let ended = run.ended_at?;
            Some(Report {
                id: run.id.clone(),
                title: format!("Test Report #{}", i + 1),
                agent: agent.name.clone(),
                persona: persona_label(agent),
                issues_found: agent.issues_found,
                duration: format_duration(ended - run.started_at),
                date: ended,
            })
        })
        .collect();

    reports.reverse();
    reports
}

/// Short persona label for listings, e.g. "Martha, 68" or just "Martha"
/// when no age was entered.
pub fn persona_label(agent: &Agent) -> String {
    let name = if agent.persona.name.is_empty() {
        "(unnamed)"
    } else {
        agent.persona.name.as_str()
    };
    if agent.persona.age.is_empty() {
        name.to_string()
    } else {
        format!("{}, {}", name, agent.persona.age)
    }
}

/// Render a duration as "2h 10m", "45m", or "0m" for sub-minute spans.
pub fn format_duration(duration: Duration) -> String {
    let minutes = duration.num_minutes().max(0);
    let hours = minutes / 60;
    let remainder = minutes % 60;
    if hours > 0 {
        format!("{hours}h {remainder}m")
    } else {
        format!("{remainder}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uxprobe_types::agent::{AgentId, AgentStatus, PersonaProfile, TestConfig};
    use uxprobe_types::run::{RunId, StepResult};

    fn agent(name: &str, persona_name: &str, age: &str, issues: i64) -> Agent {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        Agent {
            id: AgentId::new(),
            slug: uxprobe_types::agent::slugify(name),
            name: name.to_string(),
            description: String::new(),
            status: AgentStatus::Active,
            persona: PersonaProfile {
                name: persona_name.to_string(),
                age: age.to_string(),
                ..Default::default()
            },
            configuration: TestConfig::default(),
            issues_found: issues,
            progress: 0,
            success_rate: None,
            created_at: now,
            updated_at: now,
            last_run_at: None,
        }
    }

    fn finished_run(agent: &Agent, start_hour: u32, minutes: i64) -> TestRun {
        let started = Utc.with_ymd_and_hms(2024, 1, 15, start_hour, 0, 0).unwrap();
        TestRun {
            id: RunId::new(),
            agent_id: agent.id.clone(),
            status: RunStatus::Completed,
            scenario: "Complete checkout flow".to_string(),
            started_at: started,
            ended_at: Some(started + Duration::minutes(minutes)),
            steps: vec![StepResult::success("Browse product catalog")],
        }
    }

    #[test]
    fn test_dashboard_stats_totals() {
        let agents = vec![agent("A", "Martha", "68", 5), agent("B", "Alex", "17", 2)];
        let runs = vec![
            finished_run(&agents[0], 8, 83),
            finished_run(&agents[1], 10, 45),
        ];

        let stats = dashboard_stats(&agents, &runs);
        assert_eq!(stats.total_agents, 2);
        assert_eq!(stats.total_personas, 2);
        assert_eq!(stats.issues_found, 7);
        // 83m + 45m = 128m -> 2 whole hours
        assert_eq!(stats.testing_hours, 2);
    }

    #[test]
    fn test_dashboard_stats_ignores_open_runs() {
        let agents = vec![agent("A", "Martha", "68", 0)];
        let mut run = finished_run(&agents[0], 8, 60);
        run.status = RunStatus::Running;
        run.ended_at = None;

        let stats = dashboard_stats(&agents, &[run]);
        assert_eq!(stats.testing_hours, 0);
    }

    #[test]
    fn test_recent_agents_sorts_and_truncates() {
        let mut a = agent("A", "Martha", "68", 0);
        let mut b = agent("B", "Alex", "17", 0);
        let mut c = agent("C", "James", "42", 0);
        a.updated_at = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        b.updated_at = Utc.with_ymd_and_hms(2024, 1, 12, 0, 0, 0).unwrap();
        c.updated_at = Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap();

        let recent = recent_agents(&[a, b, c], 2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].name, "B");
        assert_eq!(recent[1].name, "C");
    }

    #[test]
    fn test_build_reports_numbers_chronologically() {
        let agents = vec![agent("A", "Martha", "68", 5), agent("B", "Alex", "17", 2)];
        let runs = vec![
            finished_run(&agents[1], 12, 45),
            finished_run(&agents[0], 8, 83),
        ];

        let reports = build_reports(&agents, &runs);
        assert_eq!(reports.len(), 2);
        // Most recent first, but numbering follows start order
        assert_eq!(reports[0].title, "Test Report #2");
        assert_eq!(reports[0].agent, "B");
        assert_eq!(reports[0].duration, "45m");
        assert_eq!(reports[1].title, "Test Report #1");
        assert_eq!(reports[1].persona, "Martha, 68");
        assert_eq!(reports[1].duration, "1h 23m");
        assert_eq!(reports[1].issues_found, 5);
    }

    #[test]
    fn test_build_reports_skips_open_runs_and_orphans() {
        let agents = vec![agent("A", "Martha", "68", 5)];
        let mut open = finished_run(&agents[0], 8, 30);
        open.status = RunStatus::Running;
        open.ended_at = None;

        let orphan_owner = agent("Gone", "Ghost", "0", 0);
        let orphan = finished_run(&orphan_owner, 9, 30);

        let reports = build_reports(&agents, &[open, orphan]);
        assert!(reports.is_empty());
    }

    #[test]
    fn test_persona_label_handles_missing_parts() {
        let full = agent("A", "Martha", "68", 0);
        assert_eq!(persona_label(&full), "Martha, 68");

        let no_age = agent("B", "Alex", "", 0);
        assert_eq!(persona_label(&no_age), "Alex");

        let empty = agent("C", "", "", 0);
        assert_eq!(persona_label(&empty), "(unnamed)");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::minutes(45)), "45m");
        assert_eq!(format_duration(Duration::minutes(83)), "1h 23m");
        assert_eq!(format_duration(Duration::minutes(130)), "2h 10m");
        assert_eq!(format_duration(Duration::seconds(20)), "0m");
    }
}
