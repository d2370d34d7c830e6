//! User interface module - progress reporting and formatting.
//!
//! Separates concerns:
//! - `formatter` - Formatting functions
//! - This module - Mapping workflow progress onto terminal output

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_error, display_outcome, display_plan, display_status,
    display_step_error, display_success, format_outcome, format_plan, format_step,
};

use crate::cli::orchestration::Progress;

/// Print one workflow progress event.
///
/// Suitable as the progress callback of
/// [run_bump_workflow](crate::cli::orchestration::run_bump_workflow).
pub fn report_progress(event: Progress<'_>) {
    match event {
        Progress::Planned(plan) => display_plan(plan),
        Progress::Started(step) => display_status(&format!("{}...", step)),
        Progress::Completed(step) => display_success(&format!("{} done", step)),
        Progress::Warning(warning) => display_boundary_warning(&warning),
    }
}
