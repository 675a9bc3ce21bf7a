//! Shared data model layer (structs/constants only).
//!
//! ## Files
//! - `models.rs`: report/output structs and the config file shape.
//! - `constants.rs`: bundled resource, exit codes, well-known identifiers.
//!
//! ## Compatibility note
//! Changes in these structs can affect `--json` outputs. Keep schema-impacting
//! changes synchronized with `docs/contracts/*`.

pub mod constants;
pub mod models;
