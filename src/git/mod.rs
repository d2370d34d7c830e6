//! Source-control capability
//!
//! The orchestrator only ever talks to the [SourceControl] trait. Two
//! implementations exist:
//!
//! - [cli::GitCli]: shells out to the `git` executable inside an explicit project root
//! - [mock::MockRepository]: in-memory double that records every call
//!
//! ```rust
//! # use git_bump::git::SourceControl;
//! # fn example<S: SourceControl>(scm: &S) -> Result<(), git_bump::error::ScmError> {
//! if !scm.is_dirty()? {
//!     scm.tag("v1.0.0", true, "release 1.0.0")?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod mock;

pub use cli::GitCli;
pub use mock::{MockRepository, Operation, ScmCall};

use std::path::Path;

use crate::error::ScmError;

/// Working-tree state, queried fresh before each bump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryState {
    pub is_dirty: bool,
    /// Current branch name, or `HEAD` when detached
    pub current_branch: String,
}

impl RepositoryState {
    pub fn is_detached(&self) -> bool {
        self.current_branch == "HEAD"
    }
}

/// Source-control operations needed to publish a release
///
/// Every method blocks until the underlying operation has finished.
/// Implementations map their failures onto [ScmError]; they never retry.
pub trait SourceControl {
    /// Query dirty state and current branch
    fn state(&self) -> Result<RepositoryState, ScmError>;

    /// True if tracked files have uncommitted changes; untracked files do not count
    fn is_dirty(&self) -> Result<bool, ScmError> {
        Ok(self.state()?.is_dirty)
    }

    /// Stage `paths` and create a commit
    ///
    /// `paths` are absolute or relative to the process working directory,
    /// as returned by [VersionStore::path](crate::manifest::VersionStore::path).
    ///
    /// # Returns
    /// * `Err(ScmError::NothingToCommit)` - If staging left nothing to commit
    fn commit(&self, message: &str, paths: &[&Path]) -> Result<(), ScmError>;

    /// Create a tag on HEAD
    ///
    /// # Returns
    /// * `Err(ScmError::TagAlreadyExists)` - Existing tags are never overwritten
    fn tag(&self, name: &str, annotated: bool, message: &str) -> Result<(), ScmError>;

    /// Push HEAD, and the tag when given, to `remote`
    ///
    /// # Returns
    /// * `Err(ScmError::NoRemote)` - If the remote is not configured
    /// * `Err(ScmError::RemoteRejected)` - If the remote refused a ref
    fn push(&self, remote: &str, tag: Option<&str>) -> Result<(), ScmError>;
}
