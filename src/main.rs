use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use git_bump::cli::orchestration::{run_bump_workflow, BumpWorkflowArgs};
use git_bump::config;
use git_bump::domain::{BumpKind, PlanOptions, TagPattern};
use git_bump::git::GitCli;
use git_bump::manifest::VersionStore;
use git_bump::{ui, Error, StepError};

#[derive(clap::Parser)]
#[command(
    name = "git-bump",
    version,
    about = "Bump the project version, then commit, tag and push the release"
)]
struct Args {
    #[arg(
        value_name = "BUMP",
        help = "patch, minor, major, or an explicit version such as 1.4.0-rc.1"
    )]
    bump: String,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(long, help = "Create the commit and tag locally without pushing")]
    no_push: bool,

    #[arg(long, help = "Write the version and tag without committing")]
    no_commit: bool,

    #[arg(long, value_name = "NAME", help = "Tag name to use instead of the configured pattern")]
    tag_name: Option<String>,

    #[arg(short = 'C', long, default_value = ".", value_name = "DIR", help = "Project root")]
    project_root: PathBuf,

    #[arg(short, long, value_name = "PATH", help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, value_name = "PATH", help = "Manifest path relative to the project root")]
    manifest: Option<PathBuf>,

    #[arg(long, value_name = "NAME", help = "Remote to push to")]
    remote: Option<String>,

    #[arg(long, help = "Refuse explicit versions that are not greater than the current one")]
    strict_explicit: bool,

    #[arg(long, help = "Log every git invocation")]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = if let Some(step_err) = err.downcast_ref::<StepError>() {
                ui::display_step_error(step_err);
                step_err.exit_code()
            } else if let Some(bump_err) = err.downcast_ref::<Error>() {
                ui::display_error(&format!("{:#}", err));
                bump_err.exit_code()
            } else {
                ui::display_error(&format!("{:#}", err));
                1
            };
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn init_tracing(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("git_bump=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(args: Args) -> Result<()> {
    let bump: BumpKind = args
        .bump
        .parse()
        .map_err(Error::from)
        .with_context(|| format!("invalid bump '{}'", args.bump))?;

    let mut config = config::load_config(&args.project_root, args.config.as_deref())
        .context("failed to load configuration")?;
    if let Some(manifest) = args.manifest {
        config.manifest = manifest;
    }
    if let Some(remote) = args.remote {
        config.remote = remote;
    }
    if args.strict_explicit {
        config.require_increasing_explicit = true;
    }

    let store = VersionStore::new(&args.project_root, &config.manifest, &config.version_key)?;
    let scm = GitCli::new(&args.project_root);

    let workflow_args = BumpWorkflowArgs {
        bump,
        options: PlanOptions {
            tag_name: args.tag_name,
            tag_pattern: TagPattern::new(config.tag_pattern.as_str())?,
            commit_message: config.commit_message,
            remote: config.remote,
            annotated_tags: config.annotated_tags,
            require_increasing_explicit: config.require_increasing_explicit,
            dry_run: args.dry_run,
            no_push: args.no_push,
            no_commit: args.no_commit,
        },
    };

    let outcome = run_bump_workflow(&workflow_args, &store, &scm, &mut ui::report_progress)?;
    ui::display_outcome(&outcome);
    Ok(())
}
