//! Workflow selection and orchestration
//!
//! [Action] is the closed set of workflows reflex can run; the
//! [orchestration] module sequences the git operations for each of them.

pub mod orchestration;

pub use orchestration::{run_workflow, ReleaseOrchestrator, WorkflowArgs, WorkflowResult};

use crate::error::{ReflexError, Result};
use std::fmt;

/// The release workflow selected for one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Open a testing branch off the development branch
    OpenRelease,
    /// Open a testing branch off the latest production release
    OpenHotfix,
    /// Merge, tag and propagate a testing branch, then delete it
    CloseRelease,
}

impl Action {
    /// Resolve the mutually exclusive mode flags into exactly one action
    ///
    /// # Returns
    /// * `Ok(Action)` - When exactly one flag is set
    /// * `Err(ReflexError::Usage)` - When no flag or several flags are set
    pub fn from_flags(release: bool, hotfix: bool, close: bool) -> Result<Self> {
        let selected: Vec<Action> = [
            (release, Action::OpenRelease),
            (hotfix, Action::OpenHotfix),
            (close, Action::CloseRelease),
        ]
        .into_iter()
        .filter_map(|(enabled, action)| enabled.then_some(action))
        .collect();

        match selected.as_slice() {
            [action] => Ok(*action),
            [] => Err(ReflexError::usage(
                "one of --release, --hotfix or --close is required",
            )),
            _ => Err(ReflexError::usage(
                "--release, --hotfix and --close are mutually exclusive",
            )),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::OpenRelease => write!(f, "open release"),
            Action::OpenHotfix => write!(f, "open hotfix"),
            Action::CloseRelease => write!(f, "close release"),
        }
    }
}
