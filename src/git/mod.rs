//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the git primitives
//! the release workflows need, allowing for a real disposable clone driven
//! through the `git` binary and a mock implementation for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. Implementors supply a
//! single primitive, [Repository::git], which runs one git subcommand and
//! returns its trimmed standard output. Every other operation is a default
//! method that translates to one (occasionally two) git invocations, so the
//! exact command lines are identical across implementations.
//!
//! - [repository::PristineRepo]: a temporary clone of a remote repository
//! - [mock::MockRepository]: an in-memory simulation for testing
//!
//! # Usage
//!
//! ```no_run
//! # use reflex::git::{PristineRepo, Repository};
//! # fn example() -> reflex::Result<()> {
//! let repo = PristineRepo::open("git@example.com:team/app.git")?;
//! let latest = repo.last_release(Some("origin/main"))?;
//! println!("latest release: {:?}", latest);
//! repo.close()?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::PristineRepo;

use crate::domain::{remote_ref, ORIGIN, RELEASE_TAG_PATTERN};
use crate::error::{ReflexError, Result};

/// Object type `git tag --format=%(objecttype)` reports for annotated tags
const ANNOTATED_TAG_TYPE: &str = "tag";

/// Common git operation trait for abstraction
///
/// ## Thread Safety
///
/// All implementors must be `Send + Sync`. A single repository is still only
/// ever driven by one workflow at a time.
///
/// ## Error Handling
///
/// [Repository::git] reports a non-zero exit as
/// [ReflexError::VcsCommand] carrying the command line and captured stderr.
/// The default methods answer existence questions (duplicate tags, missing
/// releases) by listing refs first rather than by reading git's messages,
/// which are localised.
pub trait Repository: Send + Sync {
    /// Run a git subcommand in the working copy
    ///
    /// # Arguments
    /// * `args` - Arguments following `git` (e.g., `["fetch", "origin"]`)
    ///
    /// # Returns
    /// * `Ok(String)` - Trimmed standard output
    /// * `Err(ReflexError::VcsCommand)` - If git exits non-zero
    fn git(&self, args: &[&str]) -> Result<String>;

    /// List remote branches, optionally filtered by a glob pattern
    ///
    /// Branch names are trimmed and returned in the order git reports them
    /// (e.g., `["origin/develop", "origin/main"]`).
    fn branches(&self, pattern: Option<&str>) -> Result<Vec<String>> {
        let mut args = vec!["branch", "--list", "--remote"];
        if let Some(pattern) = pattern {
            args.push(pattern);
        }

        let output = self.git(&args)?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Check whether a fully qualified remote branch (e.g., "origin/test-1.0.0") exists
    fn branch_exists(&self, full_name: &str) -> Result<bool> {
        Ok(self.branches(None)?.iter().any(|branch| branch == full_name))
    }

    /// Check out a branch, creating it when it has no upstream counterpart
    ///
    /// # Arguments
    /// * `name` - Local branch name
    /// * `reset_to` - Optional ref to hard-reset the branch to afterwards
    fn checkout(&self, name: &str, reset_to: Option<&str>) -> Result<()> {
        if self.branch_exists(&remote_ref(name))? {
            self.git(&["checkout", name])?;
        } else {
            self.git(&["checkout", "-b", name])?;
        }

        if let Some(target) = reset_to {
            self.git(&["reset", "--hard", target])?;
        }
        Ok(())
    }

    /// Create an annotated tag at `target` (or HEAD)
    ///
    /// # Returns
    /// * `Ok(())` - Tag created locally
    /// * `Err(ReflexError::DuplicateGitReference)` - If the tag already exists
    fn tag(&self, name: &str, message: &str, target: Option<&str>) -> Result<()> {
        if !self.git(&["tag", "--list", name])?.is_empty() {
            return Err(ReflexError::duplicate(format!(
                "tag '{}' already exists",
                name
            )));
        }

        let mut args = vec!["tag", "--annotate", "--message", message, name];
        if let Some(target) = target {
            args.push(target);
        }
        self.git(&args)?;
        Ok(())
    }

    /// Check whether an annotated tag (optionally matching `pattern`) is
    /// reachable from `target` (or HEAD)
    fn has_annotated_tag(&self, target: Option<&str>, pattern: Option<&str>) -> Result<bool> {
        let mut args = vec![
            "tag",
            "--list",
            "--format=%(objecttype)",
            "--merged",
            target.unwrap_or("HEAD"),
        ];
        if let Some(pattern) = pattern {
            args.push(pattern);
        }

        let output = self.git(&args)?;
        Ok(output.lines().any(|line| line.trim() == ANNOTATED_TAG_TYPE))
    }

    /// Find the most recent annotated tag reachable from `target` (or HEAD)
    ///
    /// Reachability is checked by listing tags first, so an untagged history
    /// (or one carrying only lightweight tags) is reported as `None` without
    /// interpreting `git describe` failures.
    ///
    /// # Arguments
    /// * `target` - Ref to describe, defaults to HEAD
    /// * `pattern` - Optional `--match` glob restricting candidate tags
    ///
    /// # Returns
    /// * `Ok(Some(tag))` - The nearest matching tag
    /// * `Ok(None)` - If no matching annotated tag is reachable
    fn last_tag(&self, target: Option<&str>, pattern: Option<&str>) -> Result<Option<String>> {
        if !self.has_annotated_tag(target, pattern)? {
            return Ok(None);
        }

        let mut args = vec!["describe", "--abbrev=0"];
        if let Some(pattern) = pattern {
            args.push("--match");
            args.push(pattern);
        }
        if let Some(target) = target {
            args.push(target);
        }
        Ok(Some(self.git(&args)?))
    }

    /// Most recent `release-*` tag reachable from `target`
    fn last_release(&self, target: Option<&str>) -> Result<Option<String>> {
        self.last_tag(target, Some(RELEASE_TAG_PATTERN))
    }

    /// Merge `source` into the current branch, always creating a merge commit
    fn merge_no_ff(&self, source: &str) -> Result<()> {
        self.git(&["merge", "--no-ff", "--no-edit", source])?;
        Ok(())
    }

    /// Push a branch, tag or refspec to origin
    fn push(&self, refspec: &str) -> Result<()> {
        self.git(&["push", ORIGIN, refspec])?;
        Ok(())
    }

    /// Delete a branch upstream by pushing an empty ref
    fn delete_remote_branch(&self, name: &str) -> Result<()> {
        self.push(&format!(":{}", name))
    }

    /// Set the committer identity used for merge commits and annotated tags
    fn configure_identity(&self, name: &str, email: &str) -> Result<()> {
        self.git(&["config", "user.name", name])?;
        self.git(&["config", "user.email", email])?;
        Ok(())
    }
}
