// ABOUTME: Git-backed sync collaborator that pulls before reading and commits and pushes after writing
// ABOUTME: Shells out to the git binary inside the data directory's repository
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info, instrument};

use super::SyncCollaborator;
use crate::errors::{AppError, AppResult};
use crate::models::LedgerDate;

/// Sync through the git repository that contains the data directory
#[derive(Debug, Clone)]
pub struct GitSync {
    work_dir: PathBuf,
    remote: String,
    branch: String,
}

impl GitSync {
    /// Collaborator running git inside `work_dir`
    #[must_use]
    pub fn new(work_dir: impl Into<PathBuf>, remote: String, branch: String) -> Self {
        Self {
            work_dir: work_dir.into(),
            remote,
            branch,
        }
    }

    /// Commit message used when publishing a day's ledger
    #[must_use]
    pub fn commit_message(date: LedgerDate) -> String {
        format!("Update calorie tracker for {}", date.iso())
    }

    /// Run one git command and fail with its stderr on a non-zero exit
    async fn git<I, S>(&self, args: I) -> AppResult<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        if !self.work_dir.is_dir() {
            return Err(AppError::sync(format!(
                "data directory {} does not exist",
                self.work_dir.display()
            )));
        }

        let mut command = Command::new("git");
        command
            .args(args)
            .current_dir(&self.work_dir)
            .env("GIT_TERMINAL_PROMPT", "0");
        debug!(command = ?command.as_std(), "Running git");

        let output = command
            .output()
            .await
            .map_err(|e| AppError::sync(format!("Failed to run git: {e}")).with_source(e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::sync(format!(
                "git exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_owned())
    }

    /// Path of a ledger file as git sees it from inside `work_dir`
    ///
    /// Ledger paths are built from the data directory, so they carry the same
    /// prefix as `work_dir` and must not be resolved against it a second time.
    fn pathspec(&self, path: &Path) -> AppResult<PathBuf> {
        if let Ok(relative) = path.strip_prefix(&self.work_dir) {
            if !relative.as_os_str().is_empty() {
                return Ok(relative.to_path_buf());
            }
        }
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        path.file_name().map(PathBuf::from).ok_or_else(|| {
            AppError::sync(format!("{} does not name a ledger file", path.display()))
        })
    }
}

#[async_trait]
impl SyncCollaborator for GitSync {
    fn name(&self) -> &'static str {
        "git"
    }

    #[instrument(skip(self), fields(remote = %self.remote, branch = %self.branch))]
    async fn refresh(&self) -> AppResult<()> {
        self.git(["pull", self.remote.as_str(), self.branch.as_str()])
            .await?;
        info!("Pulled latest ledger data");
        Ok(())
    }

    #[instrument(skip(self), fields(remote = %self.remote, branch = %self.branch))]
    async fn publish(&self, path: &Path, date: LedgerDate) -> AppResult<()> {
        let pathspec = self.pathspec(path)?;
        self.git([OsStr::new("add"), OsStr::new("--"), pathspec.as_os_str()])
            .await?;
        self.git(["commit", "-m", Self::commit_message(date).as_str()])
            .await?;
        self.git(["push", self.remote.as_str(), self.branch.as_str()])
            .await?;
        info!(path = %path.display(), "Published ledger");
        Ok(())
    }
}
