use std::fmt;

use crate::domain::Version;

/// Warnings that occur around the edges of a bump.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// A numeric bump dropped the current pre-release/build labels
    PrereleaseDiscarded { from: Version },
    /// Explicit target is not greater than the current version
    ExplicitNotIncreasing { from: Version, to: Version },
    /// Working tree is dirty; only reported for dry runs
    DirtyWorkingTree,
    /// HEAD is not on a branch
    DetachedHead,
    /// Push was suppressed; the tag stays local
    PushSkipped { remote: String, tag: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::PrereleaseDiscarded { from } => {
                write!(
                    f,
                    "Current version '{}' has pre-release/build labels; they are dropped by this bump",
                    from
                )
            }
            BoundaryWarning::ExplicitNotIncreasing { from, to } => {
                write!(
                    f,
                    "Explicit version '{}' is not greater than current version '{}'",
                    to, from
                )
            }
            BoundaryWarning::DirtyWorkingTree => {
                write!(
                    f,
                    "Working tree has uncommitted changes; a real run would be refused"
                )
            }
            BoundaryWarning::DetachedHead => {
                write!(f, "HEAD is detached; the release commit will not be on a branch")
            }
            BoundaryWarning::PushSkipped { remote, tag } => {
                write!(
                    f,
                    "Push skipped; publish later with: git push {} HEAD refs/tags/{}",
                    remote, tag
                )
            }
        }
    }
}
