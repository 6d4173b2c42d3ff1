// ABOUTME: Run orchestration: refresh, estimate each food item, append to the ledger, summarize, publish
// ABOUTME: Strictly sequential; a failed item is reported and the remaining items still run
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Calorie Tracker
//!
//! One run processes its items in order. Each item is estimated, turned into an
//! entry and appended before the next item starts, so every append sees the
//! previous one on disk. Nothing is recorded for an item whose estimate failed.
//! After the last item the day is summarized and, if anything was saved, the
//! ledger file is published once through the sync collaborator.

use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::config::TrackerConfig;
use crate::errors::{AppError, AppResult};
use crate::ledger::LedgerStore;
use crate::llm::{NutritionEstimator, OllamaEstimator};
use crate::models::{FoodEntry, LedgerDate};
use crate::summary::{summarize, DailySummary};
use crate::sync::{self, SyncCollaborator};

/// Progress of a single item, reported while the run is in flight
#[derive(Debug)]
pub enum ItemProgress<'a> {
    /// Estimation is about to start
    Started {
        /// 1-based position in the run
        index: usize,
        /// Number of items in the run
        total: usize,
        /// Food description as entered
        description: &'a str,
    },
    /// The entry was appended to the ledger
    Recorded {
        /// 1-based position in the run
        index: usize,
        /// Entry as stored
        entry: &'a FoodEntry,
        /// Ledger file written
        path: &'a Path,
        /// Entries in the ledger after this append
        entries_today: usize,
    },
    /// Nothing was recorded for this item
    Failed {
        /// 1-based position in the run
        index: usize,
        /// Food description as entered
        description: &'a str,
        /// Why the item failed
        error: &'a AppError,
    },
}

/// An item that could not be recorded
#[derive(Debug)]
pub struct ItemFailure {
    /// Food description as entered
    pub description: String,
    /// Why it failed
    pub error: AppError,
}

/// Outcome of a logging run
#[derive(Debug)]
pub struct RunReport {
    /// Day the run recorded into
    pub date: LedgerDate,
    /// Entries recorded by this run, in order
    pub recorded: Vec<FoodEntry>,
    /// Items that were not recorded, in order
    pub failures: Vec<ItemFailure>,
    /// Ledger file written, if anything was recorded
    pub saved_to: Option<PathBuf>,
    /// Day totals after the run
    pub summary: DailySummary,
    /// Publish failure, if publishing was attempted and failed
    pub sync_error: Option<AppError>,
}

impl RunReport {
    /// Whether the ledger file was handed to the sync collaborator successfully
    #[must_use]
    pub const fn published(&self) -> bool {
        self.saved_to.is_some() && self.sync_error.is_none()
    }

    /// Process exit code: zero, or the code of the first failed item
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        self.failures.first().map_or(0, |f| f.error.exit_code())
    }
}

/// The day's entries and totals without recording anything
#[derive(Debug)]
pub struct StatusReport {
    /// Entries recorded so far, oldest first
    pub entries: Vec<FoodEntry>,
    /// Day totals
    pub summary: DailySummary,
    /// Set when the ledger file was unreadable and treated as empty
    pub warning: Option<AppError>,
}

/// Calorie tracker wired to its store, estimator and sync collaborator
pub struct CalorieTracker {
    config: TrackerConfig,
    store: LedgerStore,
    estimator: Box<dyn NutritionEstimator>,
    sync: Box<dyn SyncCollaborator>,
}

impl CalorieTracker {
    /// Tracker with explicit collaborators
    #[must_use]
    pub fn new(
        config: TrackerConfig,
        estimator: Box<dyn NutritionEstimator>,
        sync: Box<dyn SyncCollaborator>,
    ) -> Self {
        let store = LedgerStore::new(config.data_dir.clone());
        Self {
            config,
            store,
            estimator,
            sync,
        }
    }

    /// Tracker using the Ollama estimator and the configured sync
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client cannot
    /// be built.
    pub fn from_config(config: TrackerConfig) -> AppResult<Self> {
        config.validate()?;
        let estimator = OllamaEstimator::new(config.estimator.clone())?;
        let sync = sync::from_config(&config.sync, &config.data_dir);
        Ok(Self::new(config, Box::new(estimator), sync))
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Ledger store in use
    #[must_use]
    pub const fn store(&self) -> &LedgerStore {
        &self.store
    }

    /// Ask the sync collaborator to bring local storage up to date
    ///
    /// The data directory is created first so the collaborator has somewhere to
    /// work. The failure is logged and returned for display only; callers carry on.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the data directory cannot be created, or the
    /// collaborator's `SyncFailed` error.
    pub async fn refresh(&self) -> AppResult<()> {
        self.store.ensure_root()?;
        self.sync.refresh().await.inspect_err(|e| {
            warn!(sync = self.sync.name(), "Refresh failed, using local data: {e}");
        })
    }

    /// Entries and totals for `date`
    #[must_use]
    pub fn status(&self, date: LedgerDate) -> StatusReport {
        let (entries, warning) = match self.store.try_load(date) {
            Ok(entries) => (entries, None),
            Err(e) => {
                warn!(date = %date, "Ledger unreadable, showing no entries: {e}");
                (Vec::new(), Some(e))
            }
        };
        let summary = DailySummary::from_entries(date, &entries, self.config.daily_limit);
        StatusReport {
            entries,
            summary,
            warning,
        }
    }

    /// Estimate one description and append it to the ledger for `date`
    ///
    /// # Errors
    ///
    /// Returns the estimator's error, `EmptyInput` for a blank description, or a
    /// storage error if the ledger cannot be written. Nothing is recorded on error.
    pub async fn record(
        &self,
        date: LedgerDate,
        description: &str,
    ) -> AppResult<(FoodEntry, PathBuf)> {
        if description.trim().is_empty() {
            return Err(AppError::empty_input());
        }
        let nutrition = self.estimator.estimate(description).await?;
        let entry = FoodEntry::new(description, nutrition)?;
        let path = self.store.append(date, entry.clone())?;
        Ok((entry, path))
    }

    /// Record every description in order, then summarize and publish
    ///
    /// `on_progress` is called as each item starts and finishes.
    #[instrument(
        skip(self, date, foods, on_progress),
        fields(date = %date, items = foods.len(), estimator = self.estimator.name())
    )]
    pub async fn log_foods<F>(
        &self,
        date: LedgerDate,
        foods: &[String],
        mut on_progress: F,
    ) -> RunReport
    where
        F: FnMut(ItemProgress<'_>),
    {
        let total = foods.len();
        let mut recorded = Vec::with_capacity(total);
        let mut failures = Vec::new();
        let mut saved_to = None;

        for (offset, description) in foods.iter().enumerate() {
            let index = offset + 1;
            on_progress(ItemProgress::Started {
                index,
                total,
                description,
            });

            match self.record(date, description).await {
                Ok((entry, path)) => {
                    let entries_today = self.store.load(date).len();
                    info!(
                        index,
                        calories = entry.nutrition.calories(),
                        entries_today,
                        "Recorded food entry"
                    );
                    on_progress(ItemProgress::Recorded {
                        index,
                        entry: &entry,
                        path: &path,
                        entries_today,
                    });
                    recorded.push(entry);
                    saved_to = Some(path);
                }
                Err(error) => {
                    warn!(index, "Item not recorded: {error}");
                    on_progress(ItemProgress::Failed {
                        index,
                        description,
                        error: &error,
                    });
                    failures.push(ItemFailure {
                        description: description.clone(),
                        error,
                    });
                }
            }
        }

        let summary = summarize(&self.store, date, self.config.daily_limit);

        let sync_error = match &saved_to {
            Some(path) => self.sync.publish(path, date).await.err().inspect(|e| {
                warn!(sync = self.sync.name(), "Publish failed: {e}");
            }),
            None => None,
        };

        RunReport {
            date,
            recorded,
            failures,
            saved_to,
            summary,
            sync_error,
        }
    }
}
