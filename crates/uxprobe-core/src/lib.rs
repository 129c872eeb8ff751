//! Business logic and repository trait definitions for uxprobe.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements. It depends only on `uxprobe-types` -- never on
//! `uxprobe-infra` or any storage/IO crate.

pub mod repository;
pub mod service;
pub mod wizard;
