use std::path::PathBuf;

use thiserror::Error;

use crate::domain::{Step, Version};

/// Malformed version or bump-kind text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty version string")]
    Empty,

    #[error("invalid version '{input}': expected MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]")]
    Format { input: String },

    #[error("invalid {component} component '{value}' in version '{input}'")]
    Component {
        input: String,
        component: &'static str,
        value: String,
    },

    #[error("invalid pre-release '{value}' in version '{input}': {reason}")]
    Prerelease {
        input: String,
        value: String,
        reason: String,
    },

    #[error("invalid build metadata '{value}' in version '{input}': {reason}")]
    Build {
        input: String,
        value: String,
        reason: String,
    },
}

/// Failures locating, reading or rewriting the version manifest
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("manifest not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("manifest {} has no '{key}' field", path.display())]
    MissingField { path: PathBuf, key: String },

    #[error("manifest {} is malformed: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("manifest {} holds an invalid version: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("I/O error on manifest {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Conditions that must hold before a mutating run may start
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("working tree has uncommitted changes; commit or stash them first")]
    DirtyWorkingTree,

    #[error("explicit version {to} is not greater than current version {from}")]
    NotIncreasing { from: Version, to: Version },
}

/// Source-control operation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScmError {
    #[error("nothing to commit")]
    NothingToCommit,

    #[error("tag '{tag}' already exists")]
    TagAlreadyExists { tag: String },

    #[error("remote '{remote}' rejected the push: {detail}")]
    RemoteRejected { remote: String, detail: String },

    #[error("no remote named '{remote}'")]
    NoRemote { remote: String },

    #[error("`{command}` failed: {detail}")]
    ExecutionFailed { command: String, detail: String },
}

/// Unified error type for git-bump operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Version parsing error: {0}")]
    Parse(#[from] ParseError),

    #[error("Version store error: {0}")]
    Store(#[from] StoreError),

    #[error("Precondition failed: {0}")]
    Precondition(#[from] PreconditionError),

    #[error("Source control error: {0}")]
    Scm(#[from] ScmError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Results in git-bump
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Process exit code for this failure category
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Parse(_) => 3,
            Error::Store(_) => 4,
            Error::Precondition(_) => 5,
            Error::Scm(_) => 6,
            Error::Config(_) => 7,
        }
    }
}

/// A failure annotated with the orchestrator step that was in progress
#[derive(Error, Debug)]
#[error("step '{step}' failed: {source}")]
pub struct StepError {
    pub step: Step,
    #[source]
    pub source: Error,
}

impl StepError {
    pub fn new(step: Step, source: impl Into<Error>) -> Self {
        StepError {
            step,
            source: source.into(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.source.exit_code()
    }
}
