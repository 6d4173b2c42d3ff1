// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Interactive input for calorie-tracker
// ABOUTME: Prompts once for a food description when none was given on the command line

use std::io::Write;

use calorie_tracker::errors::{AppError, AppResult};
use tokio::io::{self, AsyncBufReadExt, BufReader};

const PROMPT: &str =
    "What did you eat? (include amount, e.g., '200g ramen noodles', '2 slices pizza'): ";

/// Ask for exactly one food description
///
/// End of input and blank answers are both `EmptyInput`.
pub async fn prompt_food() -> AppResult<String> {
    print!("{PROMPT}");
    std::io::stdout().flush()?;

    let mut line = String::new();
    BufReader::new(io::stdin())
        .read_line(&mut line)
        .await
        .map_err(|e| AppError::invalid_input(format!("could not read input: {e}")).with_source(e))?;

    let description = line.trim();
    if description.is_empty() {
        return Err(AppError::empty_input());
    }
    Ok(description.to_owned())
}
