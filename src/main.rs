use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use reflex::cli::{run_workflow, Action, WorkflowArgs};
use reflex::config;
use reflex::ui;

#[derive(clap::Parser)]
#[command(
    name = "reflex",
    version,
    about = "Repository release automation for git-flow style release and hotfix branches"
)]
struct Args {
    #[arg(value_name = "VERSION", help = "Version to open or close (e.g. 1.2.0)")]
    target_version: String,

    #[arg(long, help = "Create a release branch")]
    release: bool,

    #[arg(long, help = "Create a hotfix branch")]
    hotfix: bool,

    #[arg(long, help = "Close and tag a release/hotfix branch")]
    close: bool,

    #[arg(long, env = "REPO", help = "Path or URL of the git repo to perform actions on")]
    repo: String,

    #[arg(
        long,
        env = "REFLEX_PRODUCTION_BRANCH",
        help = "Production branch [default: main]"
    )]
    production_branch: Option<String>,

    #[arg(
        long = "development-branch",
        env = "REFLEX_DEVELOPMENT_BRANCHES",
        value_delimiter = ',',
        help = "Development branch, repeatable [default: develop]"
    )]
    development_branches: Vec<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Run every step in the temporary clone without pushing")]
    dry_run: bool,

    #[arg(short, long, help = "Log every git command")]
    verbose: bool,
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version are reported through clap as well
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "reflex=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(args: Args) -> Result<()> {
    let action = Action::from_flags(args.release, args.hotfix, args.close)?;

    let config = config::load_config(args.config.as_deref())
        .context("Error loading config")?
        .with_overrides(args.production_branch, args.development_branches);

    let workflow = WorkflowArgs {
        repo: args.repo,
        version: args.target_version,
        action,
        dry_run: args.dry_run,
    };

    let result = run_workflow(&workflow, &config)
        .with_context(|| format!("Failed to {} {}", action, workflow.version))?;

    if !result.pushed {
        ui::display_status("Dry run complete; nothing was pushed.");
    }
    Ok(())
}
