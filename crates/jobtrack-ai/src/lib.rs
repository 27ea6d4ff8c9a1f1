//! Job application tracking with an LLM-backed intake pipeline.
//!
//! The crate is split into the `intake` workflow (turning raw job description
//! text into a structured draft) and the `tracker` workflow (lifecycle,
//! persistence, and the HTTP surface). The `services/api` binary wires both
//! into a running service.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
