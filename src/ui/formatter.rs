//! Pure formatting functions for UI output.
//!
//! `format_*` functions build strings and are unit tested; `display_*`
//! functions print them. Styling goes through `console`, which drops the
//! colours when the stream is not a terminal.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::cli::orchestration::BumpOutcome;
use crate::domain::{BumpPlan, Step};
use crate::error::StepError;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Describe what a step does for this plan
pub fn format_step(step: Step, plan: &BumpPlan) -> String {
    match step {
        Step::WriteVersion => format!("Write version {} to manifest", plan.to()),
        Step::Commit => format!("Commit \"{}\"", plan.commit_message()),
        Step::Tag => {
            let kind = if plan.annotated_tag() {
                "annotated tag"
            } else {
                "tag"
            };
            format!("Create {} {}", kind, plan.tag_name())
        }
        Step::Push => format!("Push HEAD and {} to {}", plan.tag_name(), plan.remote()),
        other => other.name().to_string(),
    }
}

/// Format the resolved plan, listing the steps that will (or would) run.
pub fn format_plan(plan: &BumpPlan) -> String {
    let mut out = String::new();
    let heading = if plan.dry_run() {
        "Dry run: no changes will be made"
    } else {
        "Release plan"
    };
    out.push_str(&format!("{}\n", style(heading).bold()));
    out.push_str(&format!("  From: {}\n", style(plan.from()).red()));
    out.push_str(&format!("  To:   {}\n", style(plan.to()).green()));
    out.push_str(&format!("  Tag:  {}\n", style(plan.tag_name()).cyan()));

    let verb = if plan.dry_run() { "Would run" } else { "Steps" };
    out.push_str(&format!("{}:\n", style(verb).underlined()));
    for (i, step) in plan.steps().into_iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, format_step(step, plan)));
    }
    out
}

/// Display the resolved plan.
pub fn display_plan(plan: &BumpPlan) {
    print!("{}", format_plan(plan));
}

/// Format the final summary line of a run.
pub fn format_outcome(outcome: &BumpOutcome) -> String {
    let plan = &outcome.plan;
    if plan.dry_run() {
        format!(
            "Dry run complete: {} -> {} (tag {})",
            plan.from(),
            plan.to(),
            plan.tag_name()
        )
    } else if outcome.pushed() {
        format!(
            "Released {} and pushed tag {} to {}",
            plan.to(),
            plan.tag_name(),
            plan.remote()
        )
    } else {
        format!("Released {} with local tag {}", plan.to(), plan.tag_name())
    }
}

/// Display the final summary of a run.
pub fn display_outcome(outcome: &BumpOutcome) {
    println!("\n{} {}\n", style("✓").green(), format_outcome(outcome));
}

/// Display a failed step and its cause.
pub fn display_step_error(err: &StepError) {
    display_error(&format!("{} step failed: {}", err.step, err.source));
    if err.step == Step::Push {
        display_status("Commit and tag were kept locally; re-run the push once the remote is fixed");
    }
}
