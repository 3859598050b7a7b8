//! Best-effort publication of the question file to a remote history.
//!
//! A sync runs only after a successful save and can never undo it. Failures
//! come back as a [`SyncOutcome`] for the shell to show as a warning.

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

/// Result of one sync attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub success: bool,
    pub message: String,
}

impl SyncOutcome {
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Pushes the persisted state somewhere else.
///
/// Implementations must not panic and must not retry forever; the call blocks
/// the user action that triggered it.
pub trait SyncBackend {
    fn sync(&self, commit_message: &str) -> SyncOutcome;
}

/// Errors from the git-backed sync. Never escape as `Err`; see [`GitSync::sync`].
#[derive(Debug, Error)]
pub enum GitSyncError {
    #[error("could not run git {step}: {source}")]
    Spawn {
        step: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not inside a git repository", .0.display())]
    NotARepository(PathBuf),

    #[error("git {step} failed: {stderr}")]
    CommandFailed { step: &'static str, stderr: String },
}

/// Commits the question file and pushes it with the `git` command line.
///
/// Last writer wins: there is no pull, merge or lock.
#[derive(Debug, Clone)]
pub struct GitSync {
    file: PathBuf,
    program: PathBuf,
    remote: Option<String>,
    branch: Option<String>,
}

impl GitSync {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            program: PathBuf::from("git"),
            remote: None,
            branch: None,
        }
    }

    /// Run this executable instead of `git` from `PATH`.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    #[must_use]
    pub fn with_remote(mut self, remote: Option<String>) -> Self {
        self.remote = remote;
        self
    }

    #[must_use]
    pub fn with_branch(mut self, branch: Option<String>) -> Self {
        self.branch = branch;
        self
    }

    fn work_dir(&self) -> &Path {
        match self.file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn run(&self, step: &'static str, args: &[&str]) -> Result<String, GitSyncError> {
        tracing::debug!(step, ?args, "Running git");
        let output = Command::new(&self.program)
            .args(args)
            .current_dir(self.work_dir())
            .output()
            .map_err(|e| GitSyncError::Spawn { step, source: e })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
            Err(GitSyncError::CommandFailed {
                step,
                stderr: if stderr.is_empty() { stdout } else { stderr },
            })
        }
    }

    fn commit_and_push(&self, commit_message: &str) -> Result<String, GitSyncError> {
        match self.run("rev-parse", &["rev-parse", "--is-inside-work-tree"]) {
            Ok(_) => {}
            Err(GitSyncError::CommandFailed { .. }) => {
                return Err(GitSyncError::NotARepository(self.work_dir().to_path_buf()));
            }
            Err(e) => return Err(e),
        }

        let file_name = self
            .file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file.to_string_lossy().into_owned());

        self.run("add", &["add", "--", &file_name])?;
        self.run("commit", &["commit", "-m", commit_message, "--", &file_name])?;

        let mut push_args = vec!["push"];
        if let Some(remote) = &self.remote {
            push_args.push(remote);
            if let Some(branch) = &self.branch {
                push_args.push(branch);
            }
        }
        self.run("push", &push_args)?;
        Ok(format!("Pushed \"{commit_message}\""))
    }
}

impl SyncBackend for GitSync {
    fn sync(&self, commit_message: &str) -> SyncOutcome {
        match self.commit_and_push(commit_message) {
            Ok(message) => {
                tracing::info!("{message}");
                SyncOutcome::succeeded(message)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Sync failed; local save kept");
                SyncOutcome::failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_outside_repository_fails_softly() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("questions.json");
        std::fs::write(&file, "[]").unwrap();

        let outcome = GitSync::new(&file).sync("Add question 1");
        assert!(!outcome.success);
        assert!(!outcome.message.is_empty());
    }

    #[test]
    fn test_missing_git_is_reported_as_spawn_failure() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("questions.json");
        std::fs::write(&file, "[]").unwrap();
        let sync = GitSync::new(&file).with_program(dir.path().join("no-such-git"));

        let err = sync.commit_and_push("Add question 1").unwrap_err();
        assert!(matches!(err, GitSyncError::Spawn { step: "rev-parse", .. }));

        let outcome = sync.sync("Add question 1");
        assert!(!outcome.success);
        assert!(outcome.message.starts_with("could not run git rev-parse"));
    }

    #[test]
    fn test_work_dir_for_bare_file_name() {
        let sync = GitSync::new("questions.json");
        assert_eq!(sync.work_dir(), Path::new("."));
        let sync = GitSync::new("/srv/bank/questions.json");
        assert_eq!(sync.work_dir(), Path::new("/srv/bank"));
    }
}
