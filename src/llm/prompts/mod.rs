// ABOUTME: Prompt templates for nutrition estimation loaded at compile time
// ABOUTME: Renders the single-item prompt asking for protein, carbs, fat and calories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompts
//!
//! Templates live in markdown files next to this module so they can be edited
//! without touching code.

/// Placeholder replaced by the food description
const FOOD_PLACEHOLDER: &str = "{food}";

/// Template asking for four numbers in the order protein, carbs, fat, calories
pub const NUTRITION_ESTIMATE_PROMPT: &str = include_str!("nutrition_estimate.md");

/// Render the estimation prompt for one food description
#[must_use]
pub fn nutrition_estimate_prompt(food_description: &str) -> String {
    NUTRITION_ESTIMATE_PROMPT
        .trim_end()
        .replace(FOOD_PLACEHOLDER, food_description.trim())
}
