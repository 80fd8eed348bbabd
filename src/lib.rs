//! Deterministic timing and opportunity scoring for judicial guarantee
//! prospecting.
//!
//! The crate ingests a structured decision-tree assessment of a legal case
//! (produced by an external language-model extraction step) and converts it
//! into a numeric opportunity score, a timing classification, and an auditable
//! breakdown. The scoring core under [`scoring`] is pure and stateless; the
//! HTTP surface, CLI, configuration, and telemetry are glue around it.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
