//! The agent-creation wizard.
//!
//! `WizardSession` owns the in-progress draft and the current step, and is
//! the only mutation path for draft state. Whatever layer renders the wizard
//! (the CLI here, anything else later) drives these operations and re-reads
//! the draft; it never touches fields directly.

pub mod session;

pub use session::{WizardSession, WizardStep};
