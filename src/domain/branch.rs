use crate::domain::version::Version;
use regex::Regex;
use std::sync::LazyLock;

/// Name of the remote every pristine clone points at
pub const ORIGIN: &str = "origin";

/// Glob passed to `git branch --list --remote` when looking for testing branches
pub const TESTING_BRANCH_GLOB: &str = "origin/test-*";

/// Qualify a branch name with the origin remote (e.g., "develop" -> "origin/develop")
pub fn remote_ref(branch: &str) -> String {
    format!("{}/{}", ORIGIN, branch)
}

/// Ephemeral branch opened for each release candidate, named `test-<version>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestingBranch {
    pub name: String,
}

impl TestingBranch {
    /// Testing branch for a release version
    pub fn for_version(version: &Version) -> Self {
        TestingBranch {
            name: format!("test-{}", version),
        }
    }

    /// Upstream form of the branch (e.g., "origin/test-1.2.0")
    pub fn remote_name(&self) -> String {
        remote_ref(&self.name)
    }
}

static OPEN_TESTING_BRANCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^origin/test-\d+(\.\d+){2}$").expect("testing branch pattern is valid")
});

/// Check whether a remote branch name is an open `test-X.Y.Z` branch
pub fn is_open_testing_branch(remote_branch: &str) -> bool {
    OPEN_TESTING_BRANCH.is_match(remote_branch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_ref() {
        assert_eq!(remote_ref("main"), "origin/main");
    }

    #[test]
    fn test_testing_branch_naming() {
        let branch = TestingBranch::for_version(&Version::parse("release-1.2.0").unwrap());
        assert_eq!(branch.name, "test-1.2.0");
        assert_eq!(branch.remote_name(), "origin/test-1.2.0");
    }

    #[test]
    fn test_open_testing_branch_detection() {
        assert!(is_open_testing_branch("origin/test-1.1.0"));
        assert!(is_open_testing_branch("origin/test-10.20.30"));
        assert!(!is_open_testing_branch("origin/test-1.1"));
        assert!(!is_open_testing_branch("origin/test-feature"));
        assert!(!is_open_testing_branch("origin/test-1.1.0-rc"));
        assert!(!is_open_testing_branch("test-1.1.0"));
    }
}
