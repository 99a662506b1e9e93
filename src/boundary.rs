use std::fmt;

/// Warnings raised while opening or closing a release.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Testing branches from earlier releases are still open upstream
    OpenTestingBranches { branches: Vec<String> },
    /// No release tag is reachable, so any well-formed version is accepted
    NoPriorRelease { reference: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::OpenTestingBranches { branches } => {
                write!(f, "The following testing branches are still open:")?;
                for branch in branches {
                    write!(f, "\n  * {}", branch)?;
                }
                Ok(())
            }
            BoundaryWarning::NoPriorRelease { reference } => {
                write!(
                    f,
                    "No release tag reachable from '{}'; skipping upgrade check",
                    reference
                )
            }
        }
    }
}
