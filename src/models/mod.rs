// ABOUTME: Core data models for the calorie tracker
// ABOUTME: Re-exports the daily ledger, food entry and nutrition estimate types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `NutritionEstimate`: protein, carbs, fat and calories for one food item
//! - `FoodEntry`: a timestamped, described estimate
//! - `DailyLedger`: the ordered entries of one day and their derived calorie total
//! - `LedgerDate`: the `YY-MM-DD` key a ledger is stored under

mod nutrition;

pub use nutrition::{sum_calories, DailyLedger, FoodEntry, LedgerDate, NutritionEstimate};
