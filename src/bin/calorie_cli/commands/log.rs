// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Logging run for calorie-tracker
// ABOUTME: Shows the day so far, records each food item, then prints the summary and sync result

use calorie_tracker::errors::AppResult;
use calorie_tracker::models::LedgerDate;
use calorie_tracker::tracker::CalorieTracker;
use tracing::info;

use super::status;
use crate::helpers::{display, input};

/// Record `foods` for `date`, prompting for one item when the list is empty
///
/// Returns the exit code of the run: zero, or the code of the first item that
/// could not be recorded.
///
/// # Errors
///
/// Returns `EmptyInput` when the interactive answer is blank.
pub async fn run(
    tracker: &CalorieTracker,
    date: LedgerDate,
    foods: Vec<String>,
) -> AppResult<u8> {
    let status = status::refresh_and_show(tracker, date).await;
    display::current_status(&status.summary);

    display::header();
    let foods = if foods.is_empty() {
        vec![input::prompt_food().await?]
    } else {
        display::item_list(&foods);
        foods
    };

    let report = tracker.log_foods(date, &foods, display::progress).await;
    info!(
        recorded = report.recorded.len(),
        failed = report.failures.len(),
        "Run finished"
    );

    display::daily_summary(&report.summary);
    display::publish_result(&report, tracker.config().sync.enabled);
    display::failures(&report);

    Ok(report.exit_code())
}
