use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::ScmError;
use crate::git::{RepositoryState, SourceControl};

/// One recorded call on [MockRepository]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScmCall {
    State,
    Commit {
        message: String,
        paths: Vec<PathBuf>,
    },
    Tag {
        name: String,
        annotated: bool,
        message: String,
    },
    Push {
        remote: String,
        tag: Option<String>,
    },
}

/// Operations a failure can be injected into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    State,
    Commit,
    Tag,
    Push,
}

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    dirty: bool,
    branch: String,
    remotes: Vec<String>,
    tags: RefCell<Vec<String>>,
    commits: RefCell<Vec<String>>,
    calls: RefCell<Vec<ScmCall>>,
    failures: HashMap<Operation, ScmError>,
}

impl MockRepository {
    /// Create a clean repository on `main` with an `origin` remote
    pub fn new() -> Self {
        MockRepository {
            dirty: false,
            branch: "main".to_string(),
            remotes: vec!["origin".to_string()],
            tags: RefCell::new(Vec::new()),
            commits: RefCell::new(Vec::new()),
            calls: RefCell::new(Vec::new()),
            failures: HashMap::new(),
        }
    }

    pub fn with_dirty(mut self, dirty: bool) -> Self {
        self.dirty = dirty;
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Add a tag that already exists before the run
    pub fn with_tag(self, name: impl Into<String>) -> Self {
        self.tags.borrow_mut().push(name.into());
        self
    }

    pub fn without_remotes(mut self) -> Self {
        self.remotes.clear();
        self
    }

    /// Make `operation` fail with `error`
    pub fn fail_on(mut self, operation: Operation, error: ScmError) -> Self {
        self.failures.insert(operation, error);
        self
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<ScmCall> {
        self.calls.borrow().clone()
    }

    /// Commit, tag and push calls only
    pub fn mutating_calls(&self) -> Vec<ScmCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| !matches!(call, ScmCall::State))
            .cloned()
            .collect()
    }

    pub fn tags(&self) -> Vec<String> {
        self.tags.borrow().clone()
    }

    pub fn commits(&self) -> Vec<String> {
        self.commits.borrow().clone()
    }

    fn injected(&self, operation: Operation) -> Result<(), ScmError> {
        match self.failures.get(&operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceControl for MockRepository {
    fn state(&self) -> Result<RepositoryState, ScmError> {
        self.calls.borrow_mut().push(ScmCall::State);
        self.injected(Operation::State)?;
        Ok(RepositoryState {
            is_dirty: self.dirty,
            current_branch: self.branch.clone(),
        })
    }

    fn commit(&self, message: &str, paths: &[&Path]) -> Result<(), ScmError> {
        self.calls.borrow_mut().push(ScmCall::Commit {
            message: message.to_string(),
            paths: paths.iter().map(|p| p.to_path_buf()).collect(),
        });
        self.injected(Operation::Commit)?;
        self.commits.borrow_mut().push(message.to_string());
        Ok(())
    }

    fn tag(&self, name: &str, annotated: bool, message: &str) -> Result<(), ScmError> {
        self.calls.borrow_mut().push(ScmCall::Tag {
            name: name.to_string(),
            annotated,
            message: message.to_string(),
        });
        self.injected(Operation::Tag)?;
        if self.tags.borrow().iter().any(|t| t == name) {
            return Err(ScmError::TagAlreadyExists {
                tag: name.to_string(),
            });
        }
        self.tags.borrow_mut().push(name.to_string());
        Ok(())
    }

    fn push(&self, remote: &str, tag: Option<&str>) -> Result<(), ScmError> {
        self.calls.borrow_mut().push(ScmCall::Push {
            remote: remote.to_string(),
            tag: tag.map(str::to_string),
        });
        self.injected(Operation::Push)?;
        if !self.remotes.iter().any(|r| r == remote) {
            return Err(ScmError::NoRemote {
                remote: remote.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_default_state() {
        let repo = MockRepository::default();
        let state = repo.state().unwrap();
        assert!(!state.is_dirty);
        assert_eq!(state.current_branch, "main");
        assert_eq!(repo.calls(), vec![ScmCall::State]);
        assert!(repo.mutating_calls().is_empty());
    }

    #[test]
    fn test_mock_repository_tag_collision() {
        let repo = MockRepository::new().with_tag("v1.0.0");

        let err = repo.tag("v1.0.0", true, "release").unwrap_err();
        assert_eq!(
            err,
            ScmError::TagAlreadyExists {
                tag: "v1.0.0".to_string()
            }
        );
        assert_eq!(repo.tags(), vec!["v1.0.0".to_string()]);

        repo.tag("v1.0.1", false, "release").unwrap();
        assert_eq!(repo.tags().len(), 2);
    }

    #[test]
    fn test_mock_repository_push_without_remote() {
        let repo = MockRepository::new().without_remotes();
        assert_eq!(
            repo.push("origin", Some("v1.0.0")).unwrap_err(),
            ScmError::NoRemote {
                remote: "origin".to_string()
            }
        );
    }

    #[test]
    fn test_mock_repository_injected_failure() {
        let repo = MockRepository::new().fail_on(Operation::Commit, ScmError::NothingToCommit);
        assert_eq!(
            repo.commit("msg", &[Path::new("Cargo.toml")]).unwrap_err(),
            ScmError::NothingToCommit
        );
        assert!(repo.commits().is_empty());
        assert_eq!(repo.mutating_calls().len(), 1);
    }
}
