//! User interface module - terminal output for the release workflows.
//!
//! Reflex is non-interactive: every decision is made from the invocation
//! and the repository state, so this module only formats and prints.

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_dry_run_push, display_error, display_merge_summary,
    display_status, display_success,
};
