use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::debug;

use crate::error::ScmError;
use crate::git::{RepositoryState, SourceControl};

/// [SourceControl] backed by the `git` executable
///
/// Every invocation runs as `git -C <root> ...`, so the process working
/// directory is never consulted.
pub struct GitCli {
    root: PathBuf,
    program: String,
}

impl GitCli {
    /// Operate on the repository containing `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        GitCli {
            root: root.into(),
            program: "git".to_string(),
        }
    }

    /// Use a different executable instead of `git` on PATH
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Express `path` the way `git -C <root>` resolves it
    ///
    /// Paths under the root become root-relative; other relative paths are
    /// anchored at the process working directory.
    fn pathspec(&self, path: &Path) -> PathBuf {
        if let Ok(relative) = path.strip_prefix(&self.root) {
            return relative.to_path_buf();
        }
        if path.is_relative() {
            if let Ok(cwd) = std::env::current_dir() {
                return cwd.join(path);
            }
        }
        path.to_path_buf()
    }

    fn command_line(&self, args: &[&str]) -> String {
        format!("{} {}", self.program, args.join(" "))
    }

    /// Run git and return its output whatever the exit status
    fn run(&self, args: &[&str]) -> Result<Output, ScmError> {
        debug!(program = %self.program, root = %self.root.display(), ?args, "running");

        let output = Command::new(&self.program)
            .arg("-C")
            .arg(&self.root)
            .args(args)
            .output()
            .map_err(|e| ScmError::ExecutionFailed {
                command: self.command_line(args),
                detail: format!("cannot execute {}: {}", self.program, e),
            })?;

        debug!(?args, status = ?output.status.code(), "finished");
        Ok(output)
    }

    /// Run git and fail unless it exits with status 0
    fn run_checked(&self, args: &[&str]) -> Result<String, ScmError> {
        let output = self.run(args)?;
        if !output.status.success() {
            return Err(self.failure(args, &output));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn failure(&self, args: &[&str], output: &Output) -> ScmError {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = match output.status.code() {
            Some(code) => format!("exit code {}: {}", code, stderr.trim()),
            None => format!("terminated by signal: {}", stderr.trim()),
        };
        ScmError::ExecutionFailed {
            command: self.command_line(args),
            detail,
        }
    }
}

impl SourceControl for GitCli {
    fn state(&self) -> Result<RepositoryState, ScmError> {
        let status = self.run_checked(&["status", "--porcelain", "--untracked-files=no"])?;

        // symbolic-ref exits 1 on a detached HEAD and also works on an unborn branch
        let head_args = ["symbolic-ref", "--short", "-q", "HEAD"];
        let head = self.run(&head_args)?;
        let current_branch = match head.status.code() {
            Some(0) => String::from_utf8_lossy(&head.stdout).trim().to_string(),
            Some(1) => "HEAD".to_string(),
            _ => return Err(self.failure(&head_args, &head)),
        };

        Ok(RepositoryState {
            is_dirty: !status.trim().is_empty(),
            current_branch,
        })
    }

    fn commit(&self, message: &str, paths: &[&Path]) -> Result<(), ScmError> {
        if !paths.is_empty() {
            let path_strings: Vec<String> = paths
                .iter()
                .map(|p| self.pathspec(p).to_string_lossy().into_owned())
                .collect();
            let mut add_args = vec!["add", "--"];
            add_args.extend(path_strings.iter().map(String::as_str));
            self.run_checked(&add_args)?;
        }

        let staged_args = ["diff", "--cached", "--quiet"];
        let staged = self.run(&staged_args)?;
        match staged.status.code() {
            Some(0) => return Err(ScmError::NothingToCommit),
            Some(1) => {}
            _ => return Err(self.failure(&staged_args, &staged)),
        }

        self.run_checked(&["commit", "-m", message])?;
        Ok(())
    }

    fn tag(&self, name: &str, annotated: bool, message: &str) -> Result<(), ScmError> {
        let reference = format!("refs/tags/{}", name);
        let exists_args = ["show-ref", "--verify", "--quiet", reference.as_str()];
        let exists = self.run(&exists_args)?;
        match exists.status.code() {
            Some(0) => {
                return Err(ScmError::TagAlreadyExists {
                    tag: name.to_string(),
                })
            }
            Some(1) => {}
            _ => return Err(self.failure(&exists_args, &exists)),
        }

        if annotated {
            self.run_checked(&["tag", "-a", name, "-m", message])?;
        } else {
            self.run_checked(&["tag", name])?;
        }
        Ok(())
    }

    fn push(&self, remote: &str, tag: Option<&str>) -> Result<(), ScmError> {
        let remote_args = ["remote", "get-url", remote];
        if !self.run(&remote_args)?.status.success() {
            return Err(ScmError::NoRemote {
                remote: remote.to_string(),
            });
        }

        let tag_ref = tag.map(|t| format!("refs/tags/{}", t));
        let mut args = vec!["push", "--porcelain", remote, "HEAD"];
        if let Some(tag_ref) = &tag_ref {
            args.push(tag_ref.as_str());
        }

        let output = self.run(&args)?;
        if output.status.success() {
            return Ok(());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        // Porcelain output flags each rejected ref with a leading '!'
        let rejected: Vec<&str> = stdout
            .lines()
            .filter(|line| line.starts_with('!'))
            .collect();
        if !rejected.is_empty() || stderr.contains("[rejected]") || stderr.contains("[remote rejected]") {
            let detail = if rejected.is_empty() {
                stderr.trim().to_string()
            } else {
                rejected.join("; ")
            };
            return Err(ScmError::RemoteRejected {
                remote: remote.to_string(),
                detail,
            });
        }

        Err(self.failure(&args, &output))
    }
}
