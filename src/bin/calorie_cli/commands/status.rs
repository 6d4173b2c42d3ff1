// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Read-only view of a day's entries and calorie budget
// ABOUTME: Used on its own with --status and as the opening screen of a logging run

use calorie_tracker::models::LedgerDate;
use calorie_tracker::tracker::{CalorieTracker, StatusReport};

use crate::helpers::display;

/// Pull remote data if enabled, then print the day's entries
pub async fn refresh_and_show(tracker: &CalorieTracker, date: LedgerDate) -> StatusReport {
    let sync_enabled = tracker.config().sync.enabled;
    if sync_enabled {
        println!("📥 Pulling latest data...");
    }
    let refreshed = tracker.refresh().await;
    if sync_enabled {
        display::pull_result(&refreshed);
    } else if let Err(e) = &refreshed {
        display::error(e);
    }

    let status = tracker.status(date);
    if let Some(warning) = &status.warning {
        display::ledger_warning(&tracker.store().path_for(date), warning);
    }
    display::existing_entries(date, &status.entries);
    status
}

/// Show today's entries and the summary without recording anything
pub async fn show(tracker: &CalorieTracker, date: LedgerDate) -> u8 {
    let status = refresh_and_show(tracker, date).await;
    display::daily_summary(&status.summary);
    0
}
