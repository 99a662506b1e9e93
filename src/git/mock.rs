use crate::domain::remote_ref;
use crate::error::{ReflexError, Result};
use crate::git::Repository;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

/// Mock repository for testing without actual git operations
///
/// Records every git invocation and simulates the upstream state the
/// workflows depend on: remote branches appear on push and disappear on
/// empty-ref push, tags are unique, and tag reachability and `describe`
/// answer from a table keyed by target ref.
pub struct MockRepository {
    state: Mutex<MockState>,
}

#[derive(Default)]
struct MockState {
    calls: Vec<String>,
    remote_branches: Vec<String>,
    tags: HashSet<String>,
    releases: HashMap<String, String>,
    lightweight: HashMap<String, String>,
    failures: Vec<String>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            state: Mutex::new(MockState::default()),
        }
    }

    /// Seed upstream branches (e.g., "origin/develop")
    pub fn with_remote_branches(self, branches: &[&str]) -> Self {
        self.state()
            .remote_branches
            .extend(branches.iter().map(|b| b.to_string()));
        self
    }

    /// Make `describe <target>` answer with `tag` ("HEAD" when no target is given)
    pub fn with_release(self, target: &str, tag: &str) -> Self {
        self.state()
            .releases
            .insert(target.to_string(), tag.to_string());
        self
    }

    /// Make a lightweight `tag` reachable from `target`; `describe` ignores it
    pub fn with_lightweight_tag(self, target: &str, tag: &str) -> Self {
        self.state()
            .lightweight
            .insert(target.to_string(), tag.to_string());
        self
    }

    /// Seed an existing tag
    pub fn with_tag(self, name: &str) -> Self {
        self.state().tags.insert(name.to_string());
        self
    }

    /// Fail every git invocation whose arguments start with `prefix`
    pub fn failing_on(self, prefix: &str) -> Self {
        self.state().failures.push(prefix.to_string());
        self
    }

    /// Every git invocation so far, arguments joined by spaces
    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    /// Current simulated upstream branches
    pub fn remote_branches(&self) -> Vec<String> {
        self.state().remote_branches.clone()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn glob_matches(pattern: &str, name: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => name.starts_with(prefix),
        None => name == pattern,
    }
}

impl Repository for MockRepository {
    fn git(&self, args: &[&str]) -> Result<String> {
        let joined = args.join(" ");
        let mut state = self.state();
        state.calls.push(joined.clone());

        if state.failures.iter().any(|prefix| joined.starts_with(prefix)) {
            return Err(ReflexError::vcs(
                format!("git {}", joined),
                "fatal: simulated failure",
            ));
        }

        match args.first().copied() {
            Some("branch") => {
                let pattern = args.get(3).copied();
                let listed: Vec<String> = state
                    .remote_branches
                    .iter()
                    .filter(|branch| pattern.map_or(true, |p| glob_matches(p, branch)))
                    .map(|branch| format!("  {}", branch))
                    .collect();
                Ok(listed.join("\n"))
            }
            Some("describe") => {
                let mut target = None;
                let mut rest = args[1..].iter();
                while let Some(arg) = rest.next() {
                    match *arg {
                        "--match" => {
                            rest.next();
                        }
                        flag if flag.starts_with("--") => {}
                        positional => target = Some(positional),
                    }
                }

                state
                    .releases
                    .get(target.unwrap_or("HEAD"))
                    .cloned()
                    .ok_or_else(|| {
                        ReflexError::vcs(
                            format!("git {}", joined),
                            "fatal: simulated describe failure",
                        )
                    })
            }
            Some("tag") if args.contains(&"--merged") => {
                // tag --list --format=%(objecttype) --merged <target> [pattern]
                let target = args.get(4).copied().unwrap_or("HEAD");
                let pattern = args.get(5).copied();
                let matching = |tag: &&String| pattern.map_or(true, |p| glob_matches(p, tag));

                let mut types = Vec::new();
                if state.releases.get(target).filter(matching).is_some() {
                    types.push("tag");
                }
                if state.lightweight.get(target).filter(matching).is_some() {
                    types.push("commit");
                }
                Ok(types.join("\n"))
            }
            Some("tag") if args.get(1) == Some(&"--list") => {
                let name = args.get(2).copied().unwrap_or_default();
                Ok(if state.tags.contains(name) {
                    name.to_string()
                } else {
                    String::new()
                })
            }
            Some("tag") => {
                let name = args.get(4).copied().unwrap_or_default().to_string();
                if !state.tags.insert(name.clone()) {
                    return Err(ReflexError::vcs(
                        format!("git {}", joined),
                        format!("fatal: tag '{}' already exists", name),
                    ));
                }
                Ok(String::new())
            }
            Some("push") => {
                let refspec = args.get(2).copied().unwrap_or_default();
                if let Some(deleted) = refspec.strip_prefix(':') {
                    let deleted = remote_ref(deleted);
                    state.remote_branches.retain(|branch| *branch != deleted);
                } else if !state.tags.contains(refspec) {
                    let pushed = remote_ref(refspec);
                    if !state.remote_branches.contains(&pushed) {
                        state.remote_branches.push(pushed);
                    }
                }
                Ok(String::new())
            }
            _ => Ok(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_records_calls() {
        let repo = MockRepository::new();
        repo.git(&["fetch", "origin"]).unwrap();
        repo.git(&["status"]).unwrap();

        assert_eq!(repo.calls(), vec!["fetch origin", "status"]);
    }

    #[test]
    fn test_mock_repository_push_creates_and_deletes_branches() {
        let repo = MockRepository::new();
        repo.git(&["push", "origin", "test-1.0.0"]).unwrap();
        assert_eq!(repo.remote_branches(), vec!["origin/test-1.0.0"]);

        repo.git(&["push", "origin", ":test-1.0.0"]).unwrap();
        assert!(repo.remote_branches().is_empty());
    }

    #[test]
    fn test_mock_repository_tag_push_does_not_create_branch() {
        let repo = MockRepository::new().with_tag("release-1.0.0");
        repo.git(&["push", "origin", "release-1.0.0"]).unwrap();
        assert!(repo.remote_branches().is_empty());
    }

    #[test]
    fn test_mock_repository_failures() {
        let repo = MockRepository::new().failing_on("push origin develop");
        assert!(repo.git(&["push", "origin", "main"]).is_ok());
        assert!(matches!(
            repo.git(&["push", "origin", "develop"]),
            Err(ReflexError::VcsCommand { .. })
        ));
    }

    #[test]
    fn test_mock_repository_default() {
        let repo = MockRepository::default();
        assert!(repo.calls().is_empty());
        assert!(repo.remote_branches().is_empty());
    }

    #[test]
    fn test_mock_repository_tag_reachability() {
        let repo = MockRepository::new()
            .with_release("develop", "release-1.0.0")
            .with_lightweight_tag("main", "release-0.9.0");

        let listed = repo
            .git(&["tag", "--list", "--format=%(objecttype)", "--merged", "develop", "release-*"])
            .unwrap();
        assert_eq!(listed, "tag");

        let listed = repo
            .git(&["tag", "--list", "--format=%(objecttype)", "--merged", "main", "release-*"])
            .unwrap();
        assert_eq!(listed, "commit");

        let listed = repo
            .git(&["tag", "--list", "--format=%(objecttype)", "--merged", "develop", "test-*"])
            .unwrap();
        assert!(listed.is_empty());
    }

    #[test]
    fn test_glob_matches() {
        assert!(glob_matches("origin/test-*", "origin/test-1.0.0"));
        assert!(!glob_matches("origin/test-*", "origin/develop"));
        assert!(glob_matches("origin/main", "origin/main"));
    }
}
