//! The three-step agent creation wizard.
//!
//! Drives a `WizardSession` from terminal prompts: basic info, persona,
//! then configuration. Every mutation goes through the session's
//! operations, so the guards (duplicate traits, minimum scenario/step
//! counts, clamped navigation) behave identically here and in any other
//! front end. One-shot flags skip the prompts entirely for scripting.

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};

use uxprobe_core::wizard::{WizardSession, WizardStep};
use uxprobe_types::agent::CreateAgentRequest;
use uxprobe_types::draft::{DraftField, TechLevel};

use crate::state::AppState;

/// Create a new agent via the interactive wizard or one-shot flags.
///
/// # Examples
///
/// ```bash
/// # Interactive wizard
/// uxp create agent
///
/// # One-shot with flags
/// uxp create agent --name "Checkout Prober" --target-url https://example-store.com
/// ```
pub async fn create_agent(
    state: &AppState,
    name: Option<String>,
    description: Option<String>,
    target_url: Option<String>,
    json: bool,
) -> Result<()> {
    let request = match name {
        Some(name) => one_shot_request(name, description, target_url),
        None => run_wizard()?,
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message("Creating agent...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let agent = state.agent_service.create_agent(request).await?;

    spinner.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&agent)?);
        return Ok(());
    }

    println!();
    println!("  {} Agent created!", style("✓").green().bold());
    println!();
    println!("  {}  {}", style("Name:").bold(), style(&agent.name).cyan());
    println!("  {}  {}", style("Slug:").bold(), &agent.slug);
    println!(
        "  {}  {}",
        style("ID:").bold(),
        style(agent.id.to_string()).dim()
    );
    println!();
    println!(
        "  Start a test: {}",
        style(format!("uxp start {}", agent.slug)).yellow()
    );
    println!();

    Ok(())
}

/// Build a submission straight from flags, no prompts. Unset fields keep
/// their draft defaults.
fn one_shot_request(
    name: String,
    description: Option<String>,
    target_url: Option<String>,
) -> CreateAgentRequest {
    let mut session = WizardSession::new();
    session.set_field(DraftField::Name, name);
    if let Some(description) = description {
        session.set_field(DraftField::Description, description);
    }
    if let Some(url) = target_url {
        session.set_field(DraftField::TargetUrl, url);
    }
    session.submit()
}

/// Walk the three wizard steps interactively until the user submits.
fn run_wizard() -> Result<CreateAgentRequest> {
    let mut session = WizardSession::new();

    println!();
    println!("  {}", style("Create New Agent").bold());

    loop {
        println!();
        println!(
            "  {} {}",
            style(format!("Step {}/3:", session.step().number())).dim(),
            style(session.step().to_string()).bold()
        );
        println!();

        let nav = match session.step() {
            WizardStep::BasicInfo => basic_info_step(&mut session)?,
            WizardStep::Persona => persona_step(&mut session)?,
            WizardStep::Configuration => configuration_step(&mut session)?,
        };

        match nav {
            Nav::Next => session.next_step(),
            Nav::Back => session.previous_step(),
            Nav::Submit => return Ok(session.submit()),
        }
    }
}

enum Nav {
    Next,
    Back,
    Submit,
}

fn basic_info_step(session: &mut WizardSession) -> Result<Nav> {
    let name: String = Input::new()
        .with_prompt("Agent name")
        .with_initial_text(session.draft().name.clone())
        .allow_empty(true)
        .interact_text()?;
    session.set_field(DraftField::Name, name);

    let description: String = Input::new()
        .with_prompt("What will this agent test?")
        .with_initial_text(session.draft().description.clone())
        .allow_empty(true)
        .interact_text()?;
    session.set_field(DraftField::Description, description);

    Ok(Nav::Next)
}

fn persona_step(session: &mut WizardSession) -> Result<Nav> {
    let name: String = Input::new()
        .with_prompt("Persona name")
        .with_initial_text(session.draft().persona.name.clone())
        .allow_empty(true)
        .interact_text()?;
    session.set_field(DraftField::PersonaName, name);

    let age: String = Input::new()
        .with_prompt("Age")
        .with_initial_text(session.draft().persona.age.clone())
        .allow_empty(true)
        .interact_text()?;
    session.set_field(DraftField::PersonaAge, age);

    let levels = [
        TechLevel::Unspecified,
        TechLevel::Beginner,
        TechLevel::Intermediate,
        TechLevel::Advanced,
    ];
    let labels: Vec<String> = levels.iter().map(|l| l.to_string()).collect();
    let picked = Select::new()
        .with_prompt("Tech proficiency level")
        .items(&labels)
        .default(0)
        .interact()?;
    session.set_field(DraftField::PersonaTechLevel, labels[picked].clone());

    // Trait tag entry: blank finishes, duplicates are reported and skipped
    println!("  {}", style("Traits (blank to finish)").dim());
    loop {
        let raw: String = Input::new()
            .with_prompt("Add trait")
            .allow_empty(true)
            .interact_text()?;
        if raw.trim().is_empty() {
            break;
        }
        if !session.add_trait(&raw) {
            println!("  {} already added", style("i").blue());
        }
    }

    while !session.draft().persona.traits.is_empty()
        && Confirm::new()
            .with_prompt("Remove a trait?")
            .default(false)
            .interact()?
    {
        let traits = session.draft().persona.traits.clone();
        let picked = Select::new().items(&traits).default(0).interact()?;
        let removed = session.remove_trait(picked)?;
        println!("  {} removed '{removed}'", style("✓").green());
    }

    match nav_choice(&["Next", "Back"])? {
        0 => Ok(Nav::Next),
        _ => Ok(Nav::Back),
    }
}

fn configuration_step(session: &mut WizardSession) -> Result<Nav> {
    let url: String = Input::new()
        .with_prompt("Target URL")
        .with_initial_text(session.draft().configuration.target_url.clone())
        .allow_empty(true)
        .interact_text()?;
    session.set_field(DraftField::TargetUrl, url);

    edit_scenarios(session)?;

    let wait: String = Input::new()
        .with_prompt("Wait time between actions (seconds)")
        .with_initial_text(session.draft().configuration.wait_time.clone())
        .allow_empty(true)
        .interact_text()?;
    session.set_field(DraftField::WaitTime, wait);

    let max: String = Input::new()
        .with_prompt("Maximum test duration (minutes)")
        .with_initial_text(session.draft().configuration.max_duration.clone())
        .allow_empty(true)
        .interact_text()?;
    session.set_field(DraftField::MaxDuration, max);

    match nav_choice(&["Create agent", "Back"])? {
        0 => Ok(Nav::Submit),
        _ => Ok(Nav::Back),
    }
}

fn edit_scenarios(session: &mut WizardSession) -> Result<()> {
    loop {
        let count = session.draft().configuration.scenarios.len();
        let mut items: Vec<String> = (0..count)
            .map(|i| {
                let s = &session.draft().configuration.scenarios[i];
                if s.description.is_empty() {
                    format!("Edit scenario {} (untitled, {} steps)", i + 1, s.steps.len())
                } else {
                    format!("Edit scenario {} ({}, {} steps)", i + 1, s.description, s.steps.len())
                }
            })
            .collect();
        items.push("Add scenario".to_string());
        items.push("Remove a scenario".to_string());
        items.push("Done with scenarios".to_string());

        let picked = Select::new()
            .with_prompt("Test scenarios")
            .items(&items)
            .default(0)
            .interact()?;

        if picked < count {
            edit_scenario(session, picked)?;
        } else if picked == count {
            session.add_scenario();
        } else if picked == count + 1 {
            let index = Select::new()
                .with_prompt("Remove which scenario?")
                .items(&scenario_labels(session))
                .default(0)
                .interact()?;
            if !session.remove_scenario(index) {
                println!(
                    "  {} an agent keeps at least one scenario",
                    style("i").blue()
                );
            }
        } else {
            return Ok(());
        }
    }
}

fn edit_scenario(session: &mut WizardSession, index: usize) -> Result<()> {
    let description: String = Input::new()
        .with_prompt("Scenario description")
        .with_initial_text(
            session.draft().configuration.scenarios[index]
                .description
                .clone(),
        )
        .allow_empty(true)
        .interact_text()?;
    session.update_scenario_description(index, description)?;

    loop {
        let steps = session.draft().configuration.scenarios[index].steps.clone();
        let mut items: Vec<String> = steps
            .iter()
            .enumerate()
            .map(|(j, step)| {
                if step.is_empty() {
                    format!("Edit step {} (empty)", j + 1)
                } else {
                    format!("Edit step {} ({step})", j + 1)
                }
            })
            .collect();
        items.push("Add step".to_string());
        items.push("Remove a step".to_string());
        items.push("Done with steps".to_string());

        let picked = Select::new()
            .with_prompt("Steps")
            .items(&items)
            .default(0)
            .interact()?;

        if picked < steps.len() {
            let text: String = Input::new()
                .with_prompt(format!("Step {}", picked + 1))
                .with_initial_text(steps[picked].clone())
                .allow_empty(true)
                .interact_text()?;
            session.update_step(index, picked, text)?;
        } else if picked == steps.len() {
            session.add_step(index)?;
        } else if picked == steps.len() + 1 {
            let target = Select::new()
                .with_prompt("Remove which step?")
                .items(&steps)
                .default(0)
                .interact()?;
            if !session.remove_step(index, target)? {
                println!(
                    "  {} a scenario keeps at least one step",
                    style("i").blue()
                );
            }
        } else {
            return Ok(());
        }
    }
}

fn scenario_labels(session: &WizardSession) -> Vec<String> {
    session
        .draft()
        .configuration
        .scenarios
        .iter()
        .enumerate()
        .map(|(i, s)| {
            if s.description.is_empty() {
                format!("Scenario {}", i + 1)
            } else {
                format!("Scenario {}: {}", i + 1, s.description)
            }
        })
        .collect()
}

fn nav_choice(options: &[&str]) -> Result<usize> {
    Ok(Select::new().items(options).default(0).interact()?)
}
