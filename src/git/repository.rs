use crate::domain::ORIGIN;
use crate::error::{ReflexError, Result};
use crate::git::Repository;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Disposable clone of a remote repository driven through the `git` binary
///
/// The clone lives in a fresh temporary directory that is removed when the
/// handle is closed or dropped, so every exit path of a workflow (success,
/// failed validation, failed git command) cleans up after itself.
pub struct PristineRepo {
    dir: TempDir,
    clone_uri: String,
}

impl PristineRepo {
    /// Clone `clone_uri` into a fresh temporary directory and fetch origin
    ///
    /// # Returns
    /// * `Ok(PristineRepo)` - Clone ready for use
    /// * `Err(ReflexError::VcsCommand)` - If the clone or fetch fails
    /// * `Err(ReflexError::Io)` - If the temporary directory cannot be created
    pub fn open(clone_uri: &str) -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("reflex-").tempdir()?;
        let clone_uri = resolve_clone_uri(clone_uri);
        let repo = PristineRepo { dir, clone_uri };

        let target = repo.path().to_string_lossy().into_owned();
        repo.git(&["clone", &repo.clone_uri, &target])?;
        repo.git(&["fetch", ORIGIN])?;

        tracing::info!(uri = %repo.clone_uri, dir = %target, "cloned pristine repository");
        Ok(repo)
    }

    /// Working directory of the clone
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// URI the clone was created from
    pub fn clone_uri(&self) -> &str {
        &self.clone_uri
    }

    /// Remove the clone, reporting any failure to delete the directory
    pub fn close(self) -> Result<()> {
        let path = self.path().to_path_buf();
        self.dir.close()?;
        tracing::debug!(dir = %path.display(), "removed pristine repository");
        Ok(())
    }
}

/// Local paths are made absolute because git runs inside the temporary directory
fn resolve_clone_uri(clone_uri: &str) -> String {
    let path = PathBuf::from(clone_uri);
    if path.exists() {
        if let Ok(absolute) = path.canonicalize() {
            return absolute.to_string_lossy().into_owned();
        }
    }
    clone_uri.to_string()
}

impl Repository for PristineRepo {
    fn git(&self, args: &[&str]) -> Result<String> {
        let command_line = format!("git {}", args.join(" "));
        tracing::debug!(command = %command_line, dir = %self.path().display(), "running git");

        // Untranslated messages keep captured stderr stable across hosts
        let output = Command::new("git")
            .args(args)
            .current_dir(self.path())
            .env("LC_ALL", "C")
            .env("LANGUAGE", "C")
            .output()
            .map_err(|e| ReflexError::vcs(&command_line, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::debug!(
                command = %command_line,
                code = ?output.status.code(),
                %stderr,
                "git failed"
            );
            return Err(ReflexError::vcs(command_line, stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
