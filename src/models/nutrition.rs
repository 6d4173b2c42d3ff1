// ABOUTME: Food intake models for the daily calorie ledger
// ABOUTME: NutritionEstimate, FoodEntry, DailyLedger and the YY-MM-DD LedgerDate key
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{AppError, AppResult};

/// Day key format used for file names and the `date` field
const LEDGER_DATE_FORMAT: &str = "%y-%m-%d";

/// Calendar day identifying one ledger, rendered as `YY-MM-DD`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LedgerDate(NaiveDate);

impl LedgerDate {
    /// Wrap a calendar date
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Today in the local timezone
    #[must_use]
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Underlying calendar date
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.0
    }

    /// File name of the ledger stored for this day
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{self}.json")
    }

    /// Long `YYYY-MM-DD` form used in commit messages
    #[must_use]
    pub fn iso(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for LedgerDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(LEDGER_DATE_FORMAT))
    }
}

impl FromStr for LedgerDate {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, LEDGER_DATE_FORMAT)
            .map(Self)
            .map_err(|e| AppError::invalid_input(format!("invalid ledger date '{s}': {e}")))
    }
}

impl Serialize for LedgerDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LedgerDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Macro-nutrients and energy estimated for one food item
///
/// Values are grams for the three macros and kilocalories for `calories`.
/// The type is `Copy` and exposes no setters; once built it never changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionEstimate {
    proteins: f64,
    carbs: f64,
    fat: f64,
    calories: f64,
}

impl NutritionEstimate {
    /// Build an estimate, rejecting negative or non-finite values
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error if any value is negative, NaN or infinite.
    pub fn new(proteins: f64, carbs: f64, fat: f64, calories: f64) -> AppResult<Self> {
        for (name, value) in [
            ("proteins", proteins),
            ("carbs", carbs),
            ("fat", fat),
            ("calories", calories),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::invalid_input(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(Self {
            proteins,
            carbs,
            fat,
            calories,
        })
    }

    /// Protein in grams
    #[must_use]
    pub const fn proteins(&self) -> f64 {
        self.proteins
    }

    /// Carbohydrates in grams
    #[must_use]
    pub const fn carbs(&self) -> f64 {
        self.carbs
    }

    /// Fat in grams
    #[must_use]
    pub const fn fat(&self) -> f64 {
        self.fat
    }

    /// Energy in kilocalories
    #[must_use]
    pub const fn calories(&self) -> f64 {
        self.calories
    }
}

/// One recorded food item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    /// Local time the item was recorded
    pub timestamp: NaiveDateTime,
    /// What was eaten, including the amount
    #[serde(rename = "food")]
    pub description: String,
    /// Estimated nutrition for the item
    pub nutrition: NutritionEstimate,
}

impl FoodEntry {
    /// Create an entry stamped with the current local time
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` if the description is blank.
    pub fn new(description: impl Into<String>, nutrition: NutritionEstimate) -> AppResult<Self> {
        Self::at(Local::now().naive_local(), description, nutrition)
    }

    /// Create an entry with an explicit timestamp
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` if the description is blank.
    pub fn at(
        timestamp: NaiveDateTime,
        description: impl Into<String>,
        nutrition: NutritionEstimate,
    ) -> AppResult<Self> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(AppError::empty_input());
        }
        Ok(Self {
            timestamp,
            description,
            nutrition,
        })
    }
}

/// All food recorded on one calendar day
///
/// `total_calories` is derived: every constructor recomputes it from `entries`,
/// and the value read from disk is discarded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyLedger {
    entries: Vec<FoodEntry>,
    total_calories: f64,
    date: LedgerDate,
}

impl DailyLedger {
    /// Ledger for a day with no entries yet
    #[must_use]
    pub const fn empty(date: LedgerDate) -> Self {
        Self {
            entries: Vec::new(),
            total_calories: 0.0,
            date,
        }
    }

    /// Ledger built from an existing entry list
    #[must_use]
    pub fn from_entries(date: LedgerDate, entries: Vec<FoodEntry>) -> Self {
        let total_calories = sum_calories(&entries);
        Self {
            entries,
            total_calories,
            date,
        }
    }

    /// Append an entry at the end and refresh the total
    pub fn push(&mut self, entry: FoodEntry) {
        self.entries.push(entry);
        self.total_calories = sum_calories(&self.entries);
    }

    /// Day this ledger belongs to
    #[must_use]
    pub const fn date(&self) -> LedgerDate {
        self.date
    }

    /// Entries in recording order
    #[must_use]
    pub fn entries(&self) -> &[FoodEntry] {
        &self.entries
    }

    /// Consume the ledger, keeping its entries
    #[must_use]
    pub fn into_entries(self) -> Vec<FoodEntry> {
        self.entries
    }

    /// Sum of calories over all entries
    #[must_use]
    pub const fn total_calories(&self) -> f64 {
        self.total_calories
    }
}

/// On-disk shape of a ledger; the stored total is accepted but never trusted
#[derive(Deserialize)]
struct StoredLedger {
    entries: Vec<FoodEntry>,
    #[serde(default, rename = "total_calories")]
    _total_calories: Option<f64>,
    date: LedgerDate,
}

impl<'de> Deserialize<'de> for DailyLedger {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let stored = StoredLedger::deserialize(deserializer)?;
        Ok(Self::from_entries(stored.date, stored.entries))
    }
}

/// Sum of calories over a slice of entries
#[must_use]
pub fn sum_calories(entries: &[FoodEntry]) -> f64 {
    entries.iter().map(|e| e.nutrition.calories()).sum()
}
