// ABOUTME: Daily calorie summary: consumed, remaining against the limit, and budget tier
// ABOUTME: Pure calculation over ledger entries with fixed near-limit threshold
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Daily Summary
//!
//! `remaining = limit - consumed` and may be negative. The tier used for display
//! depends only on `remaining`:
//!
//! | remaining            | tier        |
//! |----------------------|-------------|
//! | `< 0`                | over limit  |
//! | `0 ..< 200`          | near limit  |
//! | `>= 200`             | on track    |

use serde::Serialize;

use crate::config::DailyLimit;
use crate::ledger::LedgerStore;
use crate::models::{sum_calories, FoodEntry, LedgerDate};

/// Remaining calories below which the day counts as near the limit
pub const NEAR_LIMIT_THRESHOLD: f64 = 200.0;

/// Where the day stands against the limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetTier {
    /// More consumed than the limit allows
    OverLimit,
    /// Within the limit but less than the threshold left
    NearLimit,
    /// Comfortably within the limit
    OnTrack,
}

impl BudgetTier {
    /// Tier for a given remaining budget
    #[must_use]
    pub fn from_remaining(remaining: f64) -> Self {
        if remaining < 0.0 {
            Self::OverLimit
        } else if remaining < NEAR_LIMIT_THRESHOLD {
            Self::NearLimit
        } else {
            Self::OnTrack
        }
    }
}

/// Totals for one day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    /// Day summarized
    pub date: LedgerDate,
    /// Limit the day is measured against
    pub limit: u32,
    /// Sum of calories over all entries
    pub consumed: f64,
    /// `limit - consumed`, negative when over
    pub remaining: f64,
    /// Number of entries recorded
    pub entry_count: usize,
    /// Total protein in grams
    pub proteins: f64,
    /// Total carbohydrates in grams
    pub carbs: f64,
    /// Total fat in grams
    pub fat: f64,
    /// Display tier
    pub tier: BudgetTier,
}

impl DailySummary {
    /// Summarize a list of entries against `limit`
    #[must_use]
    pub fn from_entries(date: LedgerDate, entries: &[FoodEntry], limit: DailyLimit) -> Self {
        let consumed = sum_calories(entries);
        let remaining = limit.as_f64() - consumed;
        let (proteins, carbs, fat) = entries.iter().fold((0.0, 0.0, 0.0), |(p, c, f), e| {
            (
                p + e.nutrition.proteins(),
                c + e.nutrition.carbs(),
                f + e.nutrition.fat(),
            )
        });

        Self {
            date,
            limit: limit.kcal(),
            consumed,
            remaining,
            entry_count: entries.len(),
            proteins,
            carbs,
            fat,
            tier: BudgetTier::from_remaining(remaining),
        }
    }

    /// Calories over the limit, zero when within it
    #[must_use]
    pub fn excess(&self) -> f64 {
        (-self.remaining).max(0.0)
    }
}

/// Summarize what the store holds for `date`
#[must_use]
pub fn summarize(store: &LedgerStore, date: LedgerDate, limit: DailyLimit) -> DailySummary {
    DailySummary::from_entries(date, &store.load(date), limit)
}
