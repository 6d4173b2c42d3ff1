// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, scratch data directories, and scripted estimator and sync doubles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `calorie_tracker`

use async_trait::async_trait;
use calorie_tracker::config::{DailyLimit, SyncConfig, TrackerConfig};
use calorie_tracker::errors::{AppError, AppResult};
use calorie_tracker::llm::NutritionEstimator;
use calorie_tracker::models::{FoodEntry, LedgerDate, NutritionEstimate};
use calorie_tracker::sync::SyncCollaborator;
use chrono::NaiveDate;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Fixed day used across tests
pub fn test_date() -> LedgerDate {
    LedgerDate::new(NaiveDate::from_ymd_opt(2025, 3, 7).unwrap())
}

/// Estimate with the given macros
pub fn estimate(proteins: f64, carbs: f64, fat: f64, calories: f64) -> NutritionEstimate {
    NutritionEstimate::new(proteins, carbs, fat, calories).unwrap()
}

/// Entry with only calories set, stamped at noon on the test day
pub fn entry(description: &str, calories: f64) -> FoodEntry {
    let timestamp = test_date().date().and_hms_opt(12, 0, 0).unwrap();
    FoodEntry::at(timestamp, description, estimate(0.0, 0.0, 0.0, calories)).unwrap()
}

/// Configuration pointing at `data_dir` with sync off
pub fn test_config(data_dir: &Path, limit: u32) -> TrackerConfig {
    TrackerConfig {
        daily_limit: DailyLimit::new(limit).unwrap(),
        data_dir: data_dir.to_path_buf(),
        sync: SyncConfig {
            enabled: false,
            ..SyncConfig::default()
        },
        ..TrackerConfig::default()
    }
}

/// Estimator that replays queued results and remembers what it was asked
#[derive(Default)]
pub struct ScriptedEstimator {
    replies: Mutex<VecDeque<AppResult<NutritionEstimate>>>,
    asked: Arc<Mutex<Vec<String>>>,
}

impl ScriptedEstimator {
    pub fn new(replies: Vec<AppResult<NutritionEstimate>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            asked: Arc::default(),
        }
    }

    /// Handle on the descriptions seen so far, usable after the estimator is boxed
    pub fn asked(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.asked)
    }
}

#[async_trait]
impl NutritionEstimator for ScriptedEstimator {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn estimate(&self, description: &str) -> AppResult<NutritionEstimate> {
        self.asked.lock().unwrap().push(description.to_owned());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::internal("no scripted reply left")))
    }
}

/// Sync collaborator that records calls and can be told to fail
#[derive(Default)]
pub struct RecordingSync {
    pub fail_refresh: bool,
    pub fail_publish: bool,
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingSync {
    pub fn failing() -> Self {
        Self {
            fail_refresh: true,
            fail_publish: true,
            ..Self::default()
        }
    }

    /// Handle on the recorded calls, usable after the collaborator is boxed
    pub fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl SyncCollaborator for RecordingSync {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn refresh(&self) -> AppResult<()> {
        self.calls.lock().unwrap().push("refresh".to_owned());
        if self.fail_refresh {
            return Err(AppError::sync("remote unreachable"));
        }
        Ok(())
    }

    async fn publish(&self, path: &Path, date: LedgerDate) -> AppResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("publish {} {date}", path.display()));
        if self.fail_publish {
            return Err(AppError::sync("push rejected"));
        }
        Ok(())
    }
}
