// ABOUTME: Positional extraction of protein, carbs, fat and calories from free-text replies
// ABOUTME: Takes the first four decimal numbers in reading order and ignores the rest
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Reply Parsing
//!
//! The model is asked for four numbers in a fixed order. Extraction is purely
//! positional: the first number is protein, the second carbs, the third fat and
//! the fourth calories, whatever labels surround them. A reply that mentions any
//! other number before the four values (a portion size, a year) shifts every field.

use regex::Regex;
use std::sync::OnceLock;

use crate::errors::{AppError, AppResult};
use crate::models::NutritionEstimate;

/// Unsigned decimal: optional integer part, optional fraction, at least one digit
const NUMBER_PATTERN: &str = r"\d*\.?\d+";

/// Number of values the reply must contain
pub const EXPECTED_VALUES: usize = 4;

static NUMBER_RE: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

fn number_regex() -> AppResult<&'static Regex> {
    NUMBER_RE
        .get_or_init(|| Regex::new(NUMBER_PATTERN))
        .as_ref()
        .map_err(|e| AppError::internal(format!("number pattern failed to compile: {e}")))
}

/// Every decimal number in `text`, left to right
///
/// # Errors
///
/// Returns an internal error only if the number pattern cannot be compiled.
pub fn extract_numbers(text: &str) -> AppResult<Vec<f64>> {
    let re = number_regex()?;
    Ok(re
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect())
}

/// Build an estimate from the first four numbers of a model reply
///
/// # Errors
///
/// Returns `EstimateParseFailed` if fewer than four numbers are present or the
/// values cannot form a valid estimate.
pub fn parse_nutrition_reply(reply: &str) -> AppResult<NutritionEstimate> {
    let numbers = extract_numbers(reply)?;
    let &[proteins, carbs, fat, calories, ..] = numbers.as_slice() else {
        return Err(AppError::estimate_parse(format!(
            "expected {EXPECTED_VALUES} numbers from the model, got {}: {numbers:?}",
            numbers.len()
        )));
    };

    NutritionEstimate::new(proteins, carbs, fat, calories)
        .map_err(|e| AppError::estimate_parse(e.message.clone()).with_source(e))
}
