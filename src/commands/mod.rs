//! Command handler layer.
//!
//! ## Files
//! - `runtime.rs`: lookup/find/list/validate queries.
//! - `admin.rs`: check/dump over the whole catalog.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `catalog` and `services/*`.
//! - Keep behavior and output schema stable.

pub mod admin;
pub mod runtime;

pub use admin::handle_admin_commands;
pub use runtime::handle_runtime_commands;
