// ABOUTME: Main library entry point for the calorie tracker
// ABOUTME: Estimates nutrition with a local language model and keeps a per-day JSON ledger
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![deny(unsafe_code)]

//! # Calorie Tracker
//!
//! A personal calorie tracker. Each food description ("200g ramen noodles") is sent
//! to a locally hosted language model, the reply is parsed into protein, carbs, fat
//! and calories, and the entry is appended to that day's JSON ledger. After the run
//! the day is summarized against a daily limit and the ledger is optionally
//! committed and pushed with git.
//!
//! ## Architecture
//!
//! - **Config**: limits, endpoints and sync settings from the environment
//! - **LLM**: the estimator contract, the Ollama client and the reply parser
//! - **Ledger**: one JSON file per day, written atomically
//! - **Summary**: consumed and remaining calories with a budget tier
//! - **Sync**: best-effort git pull and push around the run
//! - **Tracker**: the sequential run loop tying these together
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use calorie_tracker::config::TrackerConfig;
//! use calorie_tracker::errors::AppResult;
//! use calorie_tracker::models::LedgerDate;
//! use calorie_tracker::tracker::CalorieTracker;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> AppResult<()> {
//!     let tracker = CalorieTracker::from_config(TrackerConfig::from_env()?)?;
//!     let foods = vec!["2 slices pizza".to_owned()];
//!     let report = tracker.log_foods(LedgerDate::today(), &foods, |_| {}).await;
//!     println!("Remaining: {:.1}", report.summary.remaining);
//!     Ok(())
//! }
//! ```

/// Configuration management
pub mod config;

/// Unified error handling system with standard error codes
pub mod errors;

/// Daily ledger persistence
pub mod ledger;

/// Nutrition estimation through a local language model
pub mod llm;

/// Logging configuration and tracing setup
pub mod logging;

/// Domain types: dates, estimates, entries and ledgers
pub mod models;

/// Daily totals against the calorie limit
pub mod summary;

/// Remote synchronization of the data directory
pub mod sync;

/// Run orchestration
pub mod tracker;
