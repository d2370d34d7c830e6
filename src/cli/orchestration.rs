//! Bump workflow orchestration
//!
//! A single linear pass:
//!
//! `check working tree -> read current version -> resolve plan -> [dry run: report, stop]
//!  -> write version -> commit -> tag -> [no push: stop] -> push`
//!
//! Every decision is made while resolving the plan; the remaining steps only
//! read it. The first failing step ends the run and is reported in the
//! returned [StepError]. Completed steps are NOT rolled back: a failed push
//! leaves the local commit and tag in place and the recovery is to re-run the
//! push by hand.

use tracing::{debug, info};

use crate::boundary::BoundaryWarning;
use crate::domain::{BumpKind, BumpPlan, PlanOptions, Step};
use crate::error::{Error, PreconditionError, StepError};
use crate::git::SourceControl;
use crate::manifest::VersionStore;

/// Arguments for the bump workflow
///
/// Mirrors the CLI Args but decoupled from clap so the workflow can be
/// driven programmatically.
#[derive(Debug, Clone)]
pub struct BumpWorkflowArgs {
    pub bump: BumpKind,
    pub options: PlanOptions,
}

/// Progress notifications emitted while the workflow runs
#[derive(Debug, Clone, PartialEq)]
pub enum Progress<'a> {
    /// The resolved plan, emitted once before any mutation
    Planned(&'a BumpPlan),
    Started(Step),
    Completed(Step),
    Warning(BoundaryWarning),
}

/// Result of a successful bump workflow
#[derive(Debug, Clone, PartialEq)]
pub struct BumpOutcome {
    pub plan: BumpPlan,
    /// Mutating steps actually performed, empty for a dry run
    pub performed: Vec<Step>,
}

impl BumpOutcome {
    pub fn pushed(&self) -> bool {
        self.performed.contains(&Step::Push)
    }
}

/// Run the bump workflow against a version store and source control
///
/// # Returns
/// * `Ok(BumpOutcome)` - The plan and the steps performed
/// * `Err(StepError)` - The step that failed and why
pub fn run_bump_workflow<S: SourceControl + ?Sized>(
    args: &BumpWorkflowArgs,
    store: &VersionStore,
    scm: &S,
    progress: &mut dyn FnMut(Progress<'_>),
) -> Result<BumpOutcome, StepError> {
    let dry_run = args.options.dry_run;

    if !dry_run {
        let state = scm
            .state()
            .map_err(|e| StepError::new(Step::CheckWorkingTree, e))?;
        if state.is_dirty {
            return Err(StepError::new(
                Step::CheckWorkingTree,
                PreconditionError::DirtyWorkingTree,
            ));
        }
        if state.is_detached() {
            progress(Progress::Warning(BoundaryWarning::DetachedHead));
        }
    }

    let current = store
        .read()
        .map_err(|e| StepError::new(Step::ReadCurrentVersion, e))?;
    debug!(version = %current, manifest = %store.path().display(), "read current version");

    let (plan, warnings) = BumpPlan::resolve(&current, &args.bump, &args.options)
        .map_err(|e| StepError::new(Step::ResolvePlan, e))?;
    for warning in warnings {
        progress(Progress::Warning(warning));
    }
    progress(Progress::Planned(&plan));

    if dry_run {
        // Read-only and only for warnings; the entry precondition applies to mutating runs
        match scm.state() {
            Ok(state) => {
                if state.is_dirty {
                    progress(Progress::Warning(BoundaryWarning::DirtyWorkingTree));
                }
                if state.is_detached() {
                    progress(Progress::Warning(BoundaryWarning::DetachedHead));
                }
            }
            Err(e) => debug!(error = %e, "could not query repository state during dry run"),
        }
        info!(from = %plan.from(), to = %plan.to(), tag = plan.tag_name(), "dry run complete");
        return Ok(BumpOutcome {
            plan,
            performed: Vec::new(),
        });
    }

    let mut performed = Vec::new();

    perform(Step::WriteVersion, &mut performed, progress, || {
        store.write(plan.to())
    })?;

    if !plan.no_commit() {
        perform(Step::Commit, &mut performed, progress, || {
            scm.commit(plan.commit_message(), &[store.path()])
        })?;
    }

    perform(Step::Tag, &mut performed, progress, || {
        scm.tag(plan.tag_name(), plan.annotated_tag(), plan.commit_message())
    })?;

    if plan.no_push() {
        progress(Progress::Warning(BoundaryWarning::PushSkipped {
            remote: plan.remote().to_string(),
            tag: plan.tag_name().to_string(),
        }));
    } else {
        perform(Step::Push, &mut performed, progress, || {
            scm.push(plan.remote(), Some(plan.tag_name()))
        })?;
    }

    info!(from = %plan.from(), to = %plan.to(), tag = plan.tag_name(), "bump complete");
    Ok(BumpOutcome { plan, performed })
}

fn perform<E: Into<Error>>(
    step: Step,
    performed: &mut Vec<Step>,
    progress: &mut dyn FnMut(Progress<'_>),
    op: impl FnOnce() -> Result<(), E>,
) -> Result<(), StepError> {
    progress(Progress::Started(step));
    op().map_err(|e| StepError::new(step, e))?;
    performed.push(step);
    progress(Progress::Completed(step));
    Ok(())
}
