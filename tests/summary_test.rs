// ABOUTME: Tests for the daily summary calculation against the calorie limit
// ABOUTME: Covers on-track, near-limit and over-limit days and macro totals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use calorie_tracker::config::DailyLimit;
use calorie_tracker::ledger::LedgerStore;
use calorie_tracker::models::FoodEntry;
use calorie_tracker::summary::{summarize, BudgetTier, DailySummary};
use common::{entry, estimate, init_test_logging, test_date};
use tempfile::TempDir;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_first_entry_of_the_day_is_on_track() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let store = LedgerStore::new(dir.path());
    let date = test_date();

    store.append(date, entry("ramen", 550.2)).unwrap();
    let summary = summarize(&store, date, DailyLimit::new(3000).unwrap());

    assert!(approx(summary.consumed, 550.2));
    assert!(approx(summary.remaining, 2449.8));
    assert_eq!(summary.tier, BudgetTier::OnTrack);
    assert_eq!(summary.entry_count, 1);
}

#[test]
fn test_closing_in_on_the_limit() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let store = LedgerStore::new(dir.path());
    let date = test_date();
    let limit = DailyLimit::new(2000).unwrap();
    store.append(date, entry("lunch", 1850.0)).unwrap();

    store.append(date, entry("snack", 100.0)).unwrap();
    let summary = summarize(&store, date, limit);

    assert!(approx(summary.consumed, 1950.0));
    assert!(approx(summary.remaining, 50.0));
    assert_eq!(summary.tier, BudgetTier::NearLimit);
}

#[test]
fn test_over_the_limit_reports_excess() {
    let entries = vec![entry("breakfast", 900.0), entry("dinner", 1200.0)];

    let summary = DailySummary::from_entries(test_date(), &entries, DailyLimit::new(2000).unwrap());

    assert!(approx(summary.remaining, -100.0));
    assert_eq!(summary.tier, BudgetTier::OverLimit);
    assert!(approx(summary.excess(), 100.0));
}

#[test]
fn test_empty_day_uses_whole_limit() {
    let summary = DailySummary::from_entries(test_date(), &[], DailyLimit::default());

    assert!(approx(summary.consumed, 0.0));
    assert!(approx(summary.remaining, 3000.0));
    assert_eq!(summary.tier, BudgetTier::OnTrack);
    assert!(approx(summary.excess(), 0.0));
}

#[test]
fn test_macros_are_summed() {
    let timestamp = test_date().date().and_hms_opt(9, 30, 0).unwrap();
    let entries = vec![
        FoodEntry::at(timestamp, "eggs", estimate(12.0, 1.0, 10.0, 140.0)).unwrap(),
        FoodEntry::at(timestamp, "toast", estimate(4.0, 20.0, 1.5, 110.0)).unwrap(),
    ];

    let summary = DailySummary::from_entries(test_date(), &entries, DailyLimit::default());

    assert!(approx(summary.proteins, 16.0));
    assert!(approx(summary.carbs, 21.0));
    assert!(approx(summary.fat, 11.5));
    assert!(approx(summary.consumed, 250.0));
}
