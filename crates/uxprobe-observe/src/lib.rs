//! Observability setup for uxprobe.

pub mod tracing_setup;
