// ABOUTME: Tests for the git sync collaborator and sync selection from configuration
// ABOUTME: Failures must surface as sync errors that callers can log and ignore
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use calorie_tracker::config::SyncConfig;
use calorie_tracker::errors::ErrorCode;
use calorie_tracker::ledger::LedgerStore;
use calorie_tracker::sync::{self, GitSync, SyncCollaborator};
use common::{entry, init_test_logging, test_date};
use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Run git in `dir` and return trimmed stdout, panicking on failure
fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .expect("git is installed");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_owned()
}

/// Working repository on `main` with a bare `origin` next to it
fn repo_with_remote(base: &Path) -> (PathBuf, PathBuf) {
    let remote = base.join("remote.git");
    let work = base.join("work");
    std::fs::create_dir_all(&remote).unwrap();
    std::fs::create_dir_all(&work).unwrap();

    git(&remote, &["init", "--bare", "--quiet"]);
    git(&work, &["init", "--quiet"]);
    git(&work, &["checkout", "--quiet", "-b", "main"]);
    git(&work, &["config", "user.name", "Tracker Test"]);
    git(&work, &["config", "user.email", "tracker@example.com"]);
    git(&work, &["config", "commit.gpgsign", "false"]);
    git(&work, &["config", "pull.rebase", "false"]);
    git(&work, &["remote", "add", "origin", remote.to_str().unwrap()]);
    (work, remote)
}

/// Restores the process working directory when dropped
struct CwdGuard(PathBuf);

impl CwdGuard {
    fn enter(dir: &Path) -> Self {
        let previous = env::current_dir().unwrap();
        env::set_current_dir(dir).unwrap();
        Self(previous)
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.0);
    }
}

#[tokio::test]
async fn test_refresh_outside_a_repository_fails() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let git = GitSync::new(dir.path(), "origin".to_owned(), "main".to_owned());

    let error = git.refresh().await.unwrap_err();

    assert_eq!(error.code, ErrorCode::SyncFailed);
}

#[tokio::test]
async fn test_missing_directory_fails_without_running_git() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("tracker");
    let git = GitSync::new(&missing, "origin".to_owned(), "main".to_owned());

    let error = git
        .publish(&missing.join("25-03-07.json"), test_date())
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::SyncFailed);
    assert!(error.message.contains("does not exist"));
}

#[tokio::test]
async fn test_disabled_sync_is_a_no_op() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let config = SyncConfig {
        enabled: false,
        ..SyncConfig::default()
    };

    let collaborator = sync::from_config(&config, dir.path());

    assert_eq!(collaborator.name(), "disabled");
    collaborator.refresh().await.unwrap();
    collaborator
        .publish(&dir.path().join("25-03-07.json"), test_date())
        .await
        .unwrap();
}

#[test]
fn test_enabled_sync_uses_git() {
    let dir = TempDir::new().unwrap();
    let collaborator = sync::from_config(&SyncConfig::default(), dir.path());
    assert_eq!(collaborator.name(), "git");
}

#[tokio::test]
#[serial]
async fn test_publish_with_relative_data_dir_reaches_remote() {
    init_test_logging();
    let base = TempDir::new().unwrap();
    let (work, remote) = repo_with_remote(base.path());
    let _cwd = CwdGuard::enter(&work);

    let data_dir = Path::new("tracker");
    let store = LedgerStore::open(data_dir).unwrap();
    let collaborator = sync::from_config(&SyncConfig::default(), data_dir);
    let date = test_date();

    let path = store.append(date, entry("1 apple", 95.0)).unwrap();
    collaborator.publish(&path, date).await.unwrap();

    assert_eq!(
        git(&remote, &["log", "-1", "--format=%s", "main"]),
        "Update calorie tracker for 2025-03-07"
    );
    assert_eq!(
        git(&remote, &["ls-tree", "-r", "--name-only", "main"]),
        "tracker/25-03-07.json"
    );

    store.append(date, entry("1 pear", 100.0)).unwrap();
    collaborator.publish(&path, date).await.unwrap();
    assert_eq!(git(&remote, &["rev-list", "--count", "main"]), "2");

    collaborator.refresh().await.unwrap();
    assert_eq!(store.load(date).len(), 2);
}
