// ABOUTME: Best-effort synchronization of the data directory with a remote store
// ABOUTME: Defines the collaborator contract, a git-backed implementation and a disabled no-op
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Sync Collaborator
//!
//! The tracker asks the collaborator to refresh local storage before reading and to
//! publish a changed ledger file after writing. Both calls may fail; the tracker
//! logs the failure and carries on, so ledger correctness never depends on sync.

mod git;

pub use git::GitSync;

use async_trait::async_trait;
use std::path::Path;
use tracing::info;

use crate::config::SyncConfig;
use crate::errors::AppResult;
use crate::models::LedgerDate;

/// Mirror of the data directory to and from a remote store
#[async_trait]
pub trait SyncCollaborator: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Bring local storage up to date with the remote
    async fn refresh(&self) -> AppResult<()>;

    /// Publish the ledger file written for `date`
    async fn publish(&self, path: &Path, date: LedgerDate) -> AppResult<()>;
}

/// Collaborator that never touches a remote
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledSync;

#[async_trait]
impl SyncCollaborator for DisabledSync {
    fn name(&self) -> &'static str {
        "disabled"
    }

    async fn refresh(&self) -> AppResult<()> {
        Ok(())
    }

    async fn publish(&self, _path: &Path, _date: LedgerDate) -> AppResult<()> {
        Ok(())
    }
}

/// Build the collaborator selected by configuration
#[must_use]
pub fn from_config(config: &SyncConfig, data_dir: &Path) -> Box<dyn SyncCollaborator> {
    if config.enabled {
        info!(
            remote = %config.remote,
            branch = %config.branch,
            "Git sync enabled"
        );
        Box::new(GitSync::new(data_dir, config.remote.clone(), config.branch.clone()))
    } else {
        info!("Sync disabled");
        Box::new(DisabledSync)
    }
}
