//! Release workflow orchestration logic
//!
//! Each workflow is a fixed sequence of git operations with a single
//! validation gate that runs before anything is created or pushed. The
//! first failure aborts the workflow; operations that already ran are not
//! undone.

use crate::boundary::BoundaryWarning;
use crate::cli::Action;
use crate::config::Config;
use crate::domain::branch::TESTING_BRANCH_GLOB;
use crate::domain::{
    is_open_testing_branch, remote_ref, validate_upgrade, ReleaseTag, TestingBranch, Version,
    ORIGIN,
};
use crate::error::{ReflexError, Result};
use crate::git::{PristineRepo, Repository};
use crate::ui;

/// Arguments for one reflex invocation
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
/// This decoupling allows the workflow to be called programmatically
/// without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowArgs {
    /// Remote repository to clone
    pub repo: String,

    /// Target version (e.g. "1.2.0" or "release-1.2.0")
    pub version: String,

    /// Workflow to run
    pub action: Action,

    /// Run everything in the clone but skip pushes
    pub dry_run: bool,
}

/// Result of a successful workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The workflow that ran
    pub action: Action,

    /// Normalised version (prefix stripped)
    pub version: String,

    /// The testing branch opened or closed
    pub testing_branch: String,

    /// The release tag created when closing
    pub release_tag: Option<String>,

    /// Branches the release was merged into, production first
    pub merged_into: Vec<String>,

    /// Whether changes were pushed to origin
    pub pushed: bool,

    /// Non-fatal issues reported along the way
    pub warnings: Vec<BoundaryWarning>,
}

/// Sequences repository operations for the open/hotfix/close workflows
pub struct ReleaseOrchestrator<'a, R: Repository> {
    repo: &'a R,
    config: &'a Config,
    dry_run: bool,
}

impl<'a, R: Repository> ReleaseOrchestrator<'a, R> {
    /// Create an orchestrator over a repository and branch configuration
    pub fn new(repo: &'a R, config: &'a Config) -> Self {
        ReleaseOrchestrator {
            repo,
            config,
            dry_run: false,
        }
    }

    /// Skip every push to origin while still running all local steps
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run the workflow for `action`
    pub fn dispatch(&self, action: Action, version: &str) -> Result<WorkflowResult> {
        match action {
            Action::OpenRelease => self.open_release(version),
            Action::OpenHotfix => self.open_hotfix(version),
            Action::CloseRelease => self.close_release(version),
        }
    }

    /// Open a testing branch off the primary development branch
    pub fn open_release(&self, version: &str) -> Result<WorkflowResult> {
        let source = self.config.primary_development_branch()?;
        ui::display_status(&format!("Creating new release branch off of {}.", source));

        self.repo.checkout(source, Some(&remote_ref(source)))?;
        self.create_testing_branch(source, version, Action::OpenRelease)
    }

    /// Open a testing branch off the latest release shipped on production
    pub fn open_hotfix(&self, version: &str) -> Result<WorkflowResult> {
        let production = &self.config.production_branch;
        let production_ref = remote_ref(production);

        let release = self
            .repo
            .last_release(Some(&production_ref))?
            .ok_or_else(|| {
                ReflexError::missing(format!(
                    "no release tag reachable from '{}' to branch a hotfix from",
                    production_ref
                ))
            })?;
        ui::display_status(&format!("Creating new hotfix branch off of {}.", release));

        self.repo.checkout(production, Some(&release))?;
        self.create_testing_branch(&release, version, Action::OpenHotfix)
    }

    /// Validate `version` against `source` and push a new `test-<version>` branch
    ///
    /// # Arguments
    /// * `source` - Ref the testing branch starts from (branch or tag)
    /// * `version` - Target version
    /// * `action` - Workflow recorded in the result
    ///
    /// # Returns
    /// * `Err(ReflexError::InvalidUpgradePath)` - Version is not newer than the last release
    /// * `Err(ReflexError::DuplicateGitReference)` - Testing branch already exists upstream
    pub fn create_testing_branch(
        &self,
        source: &str,
        version: &str,
        action: Action,
    ) -> Result<WorkflowResult> {
        let parsed = Version::parse(version)?;
        let mut warnings = Vec::new();
        self.check_upgrade(source, version, &mut warnings)?;

        let testing = TestingBranch::for_version(&parsed);

        let open_branches: Vec<String> = self
            .repo
            .branches(Some(TESTING_BRANCH_GLOB))?
            .into_iter()
            .filter(|branch| is_open_testing_branch(branch))
            .collect();
        if !open_branches.is_empty() {
            self.warn(
                BoundaryWarning::OpenTestingBranches {
                    branches: open_branches,
                },
                &mut warnings,
            );
        }

        if self.repo.branch_exists(&testing.remote_name())? {
            return Err(ReflexError::duplicate(format!(
                "Oops! Looks like {} already exists!",
                testing.name
            )));
        }

        self.repo.checkout(&testing.name, Some(source))?;
        self.publish(&testing.name)?;

        ui::display_success(&format!(
            "Successfully opened release branch '{}' for testing.",
            testing.name
        ));
        tracing::info!(branch = %testing.name, %source, "opened testing branch");

        Ok(WorkflowResult {
            action,
            version: parsed.to_string(),
            testing_branch: testing.name,
            release_tag: None,
            merged_into: Vec::new(),
            pushed: !self.dry_run,
            warnings,
        })
    }

    /// Merge the testing branch into production, tag it, merge production
    /// into every development branch, push everything and delete the
    /// testing branch upstream.
    ///
    /// # Returns
    /// * `Err(ReflexError::InvalidUpgradePath)` - Version is not newer than production's release
    /// * `Err(ReflexError::InvalidGitReference)` - No testing branch exists for the version
    pub fn close_release(&self, version: &str) -> Result<WorkflowResult> {
        let parsed = Version::parse(version)?;
        let testing = TestingBranch::for_version(&parsed);
        let release_tag = ReleaseTag::for_version(&parsed);
        let production = self.config.production_branch.as_str();
        let production_ref = remote_ref(production);

        ui::display_status(&format!("Closing {}.", testing.name));

        self.repo.checkout(production, Some(&production_ref))?;
        let mut warnings = Vec::new();
        self.check_upgrade(production, &release_tag.name, &mut warnings)?;

        if !self.repo.branch_exists(&testing.remote_name())? {
            return Err(ReflexError::missing(format!(
                "testing branch '{}' does not exist",
                testing.remote_name()
            )));
        }

        // Merge into branches locally first; nothing is pushed until all merges succeed.
        self.repo.checkout(production, Some(&production_ref))?;
        self.repo.merge_no_ff(&testing.remote_name())?;
        self.repo
            .tag(&release_tag.name, &release_tag.message(), None)?;

        for development in &self.config.development_branches {
            self.repo
                .checkout(development, Some(&remote_ref(development)))?;
            self.repo.merge_no_ff(production)?;
        }

        self.publish(production)?;
        self.publish(&release_tag.name)?;
        for development in &self.config.development_branches {
            self.publish(development)?;
        }

        self.delete_upstream(&testing.name)?;

        let mut merged_into = vec![production.to_string()];
        merged_into.extend(self.config.development_branches.iter().cloned());

        ui::display_merge_summary(&release_tag.name, &merged_into);
        ui::display_success(&format!(
            "Successfully closed release branch '{}' as '{}' on {}.",
            testing.name, release_tag.name, production
        ));
        tracing::info!(tag = %release_tag.name, branch = %testing.name, "closed release");

        Ok(WorkflowResult {
            action: Action::CloseRelease,
            version: parsed.to_string(),
            testing_branch: testing.name,
            release_tag: Some(release_tag.name),
            merged_into,
            pushed: !self.dry_run,
            warnings,
        })
    }

    /// Gate: `version` must upgrade the latest release reachable from `reference`
    fn check_upgrade(
        &self,
        reference: &str,
        version: &str,
        warnings: &mut Vec<BoundaryWarning>,
    ) -> Result<()> {
        match self.repo.last_release(Some(reference))? {
            Some(latest) => {
                tracing::debug!(%latest, %version, "validating upgrade path");
                validate_upgrade(&latest, version)
            }
            None => {
                self.warn(
                    BoundaryWarning::NoPriorRelease {
                        reference: reference.to_string(),
                    },
                    warnings,
                );
                Ok(())
            }
        }
    }

    fn warn(&self, warning: BoundaryWarning, warnings: &mut Vec<BoundaryWarning>) {
        ui::display_boundary_warning(&warning);
        warnings.push(warning);
    }

    fn publish(&self, refspec: &str) -> Result<()> {
        if self.dry_run {
            ui::display_dry_run_push(refspec, ORIGIN);
            return Ok(());
        }
        ui::display_status(&format!("Pushing {} to {}", refspec, ORIGIN));
        self.repo.push(refspec)
    }

    fn delete_upstream(&self, branch: &str) -> Result<()> {
        if self.dry_run {
            ui::display_dry_run_push(&format!(":{}", branch), ORIGIN);
            return Ok(());
        }
        ui::display_status(&format!("Deleting {} from {}", branch, ORIGIN));
        self.repo.delete_remote_branch(branch)
    }
}

/// Main reflex workflow
///
/// Clones the remote into a temporary directory, runs the selected
/// workflow against it and removes the clone afterwards. The clone is
/// removed on every path: explicitly on completion, and by drop when an
/// earlier step returns an error.
///
/// # Arguments
///
/// * `args` - Workflow arguments (repo, version, action, dry_run)
/// * `config` - Branch configuration
///
/// # Returns
///
/// Result describing what was opened or closed, or the first error hit
pub fn run_workflow(args: &WorkflowArgs, config: &Config) -> Result<WorkflowResult> {
    config.validate()?;

    ui::display_status(&format!("Cloning {}", args.repo));
    let repo = PristineRepo::open(&args.repo)?;
    if let Some(identity) = &config.identity {
        repo.configure_identity(&identity.name, &identity.email)?;
    }

    let outcome = ReleaseOrchestrator::new(&repo, config)
        .dry_run(args.dry_run)
        .dispatch(args.action, &args.version);

    // A workflow failure is more useful to report than a cleanup failure.
    let closed = repo.close();
    let result = outcome?;
    closed?;
    Ok(result)
}
