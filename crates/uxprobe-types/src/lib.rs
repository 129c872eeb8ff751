//! Shared domain types for uxprobe.
//!
//! This crate contains the core domain types used across the uxprobe
//! platform: Agent, AgentDraft, TestRun, Report, and their associated
//! error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod agent;
pub mod config;
pub mod draft;
pub mod error;
pub mod run;
