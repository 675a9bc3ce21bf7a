//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `config.rs`: config file loading and resource source resolution.
//! - `consistency.rs`: whole-catalog audit behind `check`.
//! - `output.rs`: JSON/text output helpers and exit-code mapping.
//!
//! ## Conventions
//! - Keep command handlers thin; delegate to services.
//! - Findings are reported, never corrected.

pub mod config;
pub mod consistency;
pub mod output;
