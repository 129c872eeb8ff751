//! Wizard session state: the draft accumulator and step navigation.

use uxprobe_types::agent::CreateAgentRequest;
use uxprobe_types::draft::{AgentDraft, DraftField, ScenarioDraft};
use uxprobe_types::error::DraftError;

use std::fmt;

/// The three wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    BasicInfo,
    Persona,
    Configuration,
}

impl WizardStep {
    /// 1-based step number, matching the step indicator shown to the user.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::BasicInfo => 1,
            WizardStep::Persona => 2,
            WizardStep::Configuration => 3,
        }
    }

    /// Resolve a requested step number, clamping out-of-range values to the
    /// nearest valid step.
    pub fn from_number(n: i64) -> Self {
        match n {
            ..=1 => WizardStep::BasicInfo,
            2 => WizardStep::Persona,
            _ => WizardStep::Configuration,
        }
    }

    fn next(self) -> Self {
        match self {
            WizardStep::BasicInfo => WizardStep::Persona,
            WizardStep::Persona | WizardStep::Configuration => WizardStep::Configuration,
        }
    }

    fn previous(self) -> Self {
        match self {
            WizardStep::BasicInfo | WizardStep::Persona => WizardStep::BasicInfo,
            WizardStep::Configuration => WizardStep::Persona,
        }
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        WizardStep::BasicInfo
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardStep::BasicInfo => write!(f, "basic info"),
            WizardStep::Persona => write!(f, "persona"),
            WizardStep::Configuration => write!(f, "configuration"),
        }
    }
}

/// One agent-creation session: a draft plus the current wizard step.
///
/// Mutation operations either apply the change or no-op when a structural
/// invariant would be violated; nothing here validates field content. The
/// two invariants maintained across any call sequence:
///
/// - `configuration.scenarios` never drops below one scenario
/// - every scenario's `steps` never drops below one step
#[derive(Debug, Clone, Default)]
pub struct WizardSession {
    draft: AgentDraft,
    step: WizardStep,
}

impl WizardSession {
    /// Start a fresh session: default draft, step 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the in-progress draft.
    pub fn draft(&self) -> &AgentDraft {
        &self.draft
    }

    /// The step the wizard is currently on.
    pub fn step(&self) -> WizardStep {
        self.step
    }

    // --- scalar fields ---

    /// Replace a scalar draft field. No content validation: empty strings
    /// and non-numeric text are stored as-is. An unparseable tech level
    /// falls back to unspecified rather than erroring.
    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Name => self.draft.name = value,
            DraftField::Description => self.draft.description = value,
            DraftField::PersonaName => self.draft.persona.name = value,
            DraftField::PersonaAge => self.draft.persona.age = value,
            DraftField::PersonaTechLevel => {
                self.draft.persona.tech_level = value.parse().unwrap_or_default();
            }
            DraftField::TargetUrl => self.draft.configuration.target_url = value,
            DraftField::WaitTime => self.draft.configuration.wait_time = value,
            DraftField::MaxDuration => self.draft.configuration.max_duration = value,
        }
    }

    // --- persona traits ---

    /// Add a trait. Returns `true` when appended; `false` (and no change)
    /// when the trimmed value is empty or already present (case-sensitive
    /// exact match).
    pub fn add_trait(&mut self, raw: &str) -> bool {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return false;
        }
        let traits = &mut self.draft.persona.traits;
        if traits.iter().any(|t| t == trimmed) {
            return false;
        }
        traits.push(trimmed.to_string());
        true
    }

    /// Remove the trait at `index`, returning it.
    ///
    /// Indices normally come from rendering the current list, so this only
    /// fails when a caller holds a stale index.
    pub fn remove_trait(&mut self, index: usize) -> Result<String, DraftError> {
        let traits = &mut self.draft.persona.traits;
        if index >= traits.len() {
            return Err(DraftError::IndexOutOfBounds {
                index,
                len: traits.len(),
            });
        }
        Ok(traits.remove(index))
    }

    // --- scenarios ---

    /// Append a fresh scenario (empty description, one empty step).
    /// Always succeeds; the scenario count is unbounded.
    pub fn add_scenario(&mut self) {
        self.draft.configuration.scenarios.push(ScenarioDraft::default());
    }

    /// Remove the scenario at `index`. Returns `false` without changing
    /// anything when only one scenario remains or the index is stale --
    /// a reported no-op, not an error.
    pub fn remove_scenario(&mut self, index: usize) -> bool {
        let scenarios = &mut self.draft.configuration.scenarios;
        if scenarios.len() <= 1 || index >= scenarios.len() {
            return false;
        }
        scenarios.remove(index);
        true
    }

    /// Replace a scenario's description.
    pub fn update_scenario_description(
        &mut self,
        scenario_index: usize,
        value: impl Into<String>,
    ) -> Result<(), DraftError> {
        let scenario = self.scenario_mut(scenario_index)?;
        scenario.description = value.into();
        Ok(())
    }

    // --- steps within a scenario ---

    /// Append an empty step to the identified scenario. Always succeeds for
    /// a valid scenario index.
    pub fn add_step(&mut self, scenario_index: usize) -> Result<(), DraftError> {
        let scenario = self.scenario_mut(scenario_index)?;
        scenario.steps.push(String::new());
        Ok(())
    }

    /// Remove a step from a scenario. Returns `Ok(false)` without changing
    /// anything when the scenario is down to its last step or the step index
    /// is stale.
    pub fn remove_step(
        &mut self,
        scenario_index: usize,
        step_index: usize,
    ) -> Result<bool, DraftError> {
        let scenario = self.scenario_mut(scenario_index)?;
        if scenario.steps.len() <= 1 || step_index >= scenario.steps.len() {
            return Ok(false);
        }
        scenario.steps.remove(step_index);
        Ok(true)
    }

    /// Replace a step's text.
    pub fn update_step(
        &mut self,
        scenario_index: usize,
        step_index: usize,
        value: impl Into<String>,
    ) -> Result<(), DraftError> {
        let scenario = self.scenario_mut(scenario_index)?;
        let len = scenario.steps.len();
        let step = scenario
            .steps
            .get_mut(step_index)
            .ok_or(DraftError::IndexOutOfBounds {
                index: step_index,
                len,
            })?;
        *step = value.into();
        Ok(())
    }

    fn scenario_mut(&mut self, index: usize) -> Result<&mut ScenarioDraft, DraftError> {
        let scenarios = &mut self.draft.configuration.scenarios;
        let len = scenarios.len();
        scenarios
            .get_mut(index)
            .ok_or(DraftError::IndexOutOfBounds { index, len })
    }

    // --- step navigation ---

    /// Jump to a step by number, clamped to the valid range.
    pub fn go_to_step(&mut self, n: i64) {
        self.step = WizardStep::from_number(n);
    }

    /// Advance one step. No-op on the last step. No field validation gates
    /// the transition; a user may advance with empty required fields.
    pub fn next_step(&mut self) {
        self.step = self.step.next();
    }

    /// Go back one step. No-op on the first step.
    pub fn previous_step(&mut self) {
        self.step = self.step.previous();
    }

    // --- submission ---

    /// Package the draft as the finalized submission payload, ending the
    /// session. Callable from any step; the rendering layer decides when to
    /// offer it.
    pub fn submit(self) -> CreateAgentRequest {
        tracing::debug!(step = %self.step, "wizard session submitted");
        CreateAgentRequest::from(self.draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uxprobe_types::draft::TechLevel;

    #[test]
    fn test_new_session_starts_at_step_one_with_default_draft() {
        let session = WizardSession::new();
        assert_eq!(session.step(), WizardStep::BasicInfo);
        assert_eq!(session.draft(), &AgentDraft::default());
    }

    #[test]
    fn test_set_field_accepts_anything() {
        let mut session = WizardSession::new();
        session.set_field(DraftField::Name, "Checkout Prober");
        session.set_field(DraftField::PersonaAge, "not a number");
        session.set_field(DraftField::WaitTime, "");

        assert_eq!(session.draft().name, "Checkout Prober");
        assert_eq!(session.draft().persona.age, "not a number");
        assert_eq!(session.draft().configuration.wait_time, "");
    }

    #[test]
    fn test_set_tech_level_parses_and_falls_back() {
        let mut session = WizardSession::new();
        session.set_field(DraftField::PersonaTechLevel, "advanced");
        assert_eq!(session.draft().persona.tech_level, TechLevel::Advanced);

        session.set_field(DraftField::PersonaTechLevel, "wizard-grade");
        assert_eq!(session.draft().persona.tech_level, TechLevel::Unspecified);
    }

    #[test]
    fn test_add_trait_rejects_duplicates() {
        let mut session = WizardSession::new();
        assert!(session.add_trait("careful"));
        assert!(!session.add_trait("careful"));
        assert_eq!(session.draft().persona.traits, vec!["careful"]);
    }

    #[test]
    fn test_add_trait_is_case_sensitive() {
        let mut session = WizardSession::new();
        assert!(session.add_trait("Careful"));
        assert!(session.add_trait("careful"));
        assert_eq!(session.draft().persona.traits.len(), 2);
    }

    #[test]
    fn test_add_trait_ignores_blank_input() {
        let mut session = WizardSession::new();
        assert!(!session.add_trait(""));
        assert!(!session.add_trait("   "));
        assert!(session.draft().persona.traits.is_empty());
    }

    #[test]
    fn test_add_trait_trims_before_comparing() {
        let mut session = WizardSession::new();
        assert!(session.add_trait("  patient  "));
        assert!(!session.add_trait("patient"));
        assert_eq!(session.draft().persona.traits, vec!["patient"]);
    }

    #[test]
    fn test_remove_trait_out_of_bounds() {
        let mut session = WizardSession::new();
        session.add_trait("methodical");

        let err = session.remove_trait(3).unwrap_err();
        assert!(matches!(err, DraftError::IndexOutOfBounds { index: 3, len: 1 }));

        let removed = session.remove_trait(0).unwrap();
        assert_eq!(removed, "methodical");
        assert!(session.draft().persona.traits.is_empty());
    }

    #[test]
    fn test_remove_scenario_never_drops_below_one() {
        let mut session = WizardSession::new();
        assert!(!session.remove_scenario(0));
        assert_eq!(session.draft().configuration.scenarios.len(), 1);

        session.add_scenario();
        session.add_scenario();
        assert!(session.remove_scenario(2));
        assert!(session.remove_scenario(0));
        // One left: every further removal is a no-op
        assert!(!session.remove_scenario(0));
        assert_eq!(session.draft().configuration.scenarios.len(), 1);
    }

    #[test]
    fn test_add_remove_scenario_round_trips() {
        let mut session = WizardSession::new();
        session
            .update_scenario_description(0, "Complete checkout flow")
            .unwrap();
        let before = session.draft().clone();

        session.add_scenario();
        assert!(session.remove_scenario(1));

        assert_eq!(session.draft(), &before);
    }

    #[test]
    fn test_step_floor_per_scenario() {
        let mut session = WizardSession::new();
        session.add_step(0).unwrap();
        assert_eq!(session.draft().configuration.scenarios[0].steps, vec!["", ""]);

        assert!(session.remove_step(0, 0).unwrap());
        assert_eq!(session.draft().configuration.scenarios[0].steps, vec![""]);

        // Last step: removal is a no-op
        assert!(!session.remove_step(0, 0).unwrap());
        assert_eq!(session.draft().configuration.scenarios[0].steps, vec![""]);
    }

    #[test]
    fn test_step_ops_reject_stale_scenario_index() {
        let mut session = WizardSession::new();
        assert!(session.add_step(5).is_err());
        assert!(session.remove_step(5, 0).is_err());
        assert!(session.update_step(5, 0, "x").is_err());
        assert!(session.update_scenario_description(5, "x").is_err());
    }

    #[test]
    fn test_update_step_replaces_in_place() {
        let mut session = WizardSession::new();
        session.add_step(0).unwrap();
        session.update_step(0, 1, "Proceed to checkout").unwrap();
        assert_eq!(
            session.draft().configuration.scenarios[0].steps,
            vec!["", "Proceed to checkout"]
        );
    }

    #[test]
    fn test_navigation_clamps_at_both_ends() {
        let mut session = WizardSession::new();
        session.previous_step();
        assert_eq!(session.step(), WizardStep::BasicInfo);

        session.go_to_step(1);
        session.next_step();
        session.next_step();
        session.next_step();
        assert_eq!(session.step(), WizardStep::Configuration);

        session.go_to_step(99);
        assert_eq!(session.step(), WizardStep::Configuration);
        session.go_to_step(-4);
        assert_eq!(session.step(), WizardStep::BasicInfo);
    }

    #[test]
    fn test_navigation_never_gates_on_content() {
        // Advancing with every field still empty is allowed
        let mut session = WizardSession::new();
        session.next_step();
        session.next_step();
        assert_eq!(session.step(), WizardStep::Configuration);
        assert!(session.draft().name.is_empty());
    }

    #[test]
    fn test_submit_packages_draft_verbatim_from_any_step() {
        let mut session = WizardSession::new();
        session.set_field(DraftField::Name, "Senior Shopper");
        session.add_trait("patient");
        session.update_step(0, 0, "Browse product catalog").unwrap();
        // Still on step 1 -- submission is not gated on reaching step 3
        assert_eq!(session.step(), WizardStep::BasicInfo);

        let request = session.submit();
        assert_eq!(request.name, "Senior Shopper");
        assert_eq!(request.persona.traits, vec!["patient"]);
        assert_eq!(
            request.configuration.scenarios[0].steps,
            vec!["Browse product catalog"]
        );
    }

    #[test]
    fn test_goals_and_preferences_stay_inert() {
        // No wizard operation touches these fields
        let mut session = WizardSession::new();
        session.add_trait("curious");
        session.add_scenario();
        session.set_field(DraftField::PersonaName, "Martha");
        assert!(session.draft().persona.goals.is_empty());
        assert!(session.draft().persona.preferences.is_empty());
    }

    #[test]
    fn test_from_number_mapping() {
        assert_eq!(WizardStep::from_number(1), WizardStep::BasicInfo);
        assert_eq!(WizardStep::from_number(2), WizardStep::Persona);
        assert_eq!(WizardStep::from_number(3), WizardStep::Configuration);
        assert_eq!(WizardStep::from_number(0), WizardStep::BasicInfo);
        assert_eq!(WizardStep::from_number(4), WizardStep::Configuration);
    }
}
