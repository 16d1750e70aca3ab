//! CLI commands
//!
//! Command implementations for the `rowmine` binary.

mod auth;
mod progress;
mod style;
mod submit;

pub use auth::{run_auth_setup, run_auth_test};
pub use submit::{SubmitArgs, run_submit};
