// ABOUTME: Nutrition estimator abstraction over a locally hosted language model
// ABOUTME: Defines the estimator contract and exposes the Ollama implementation and reply parser
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Nutrition Estimator
//!
//! An estimator turns one free-text food description ("200g ramen noodles") into a
//! [`NutritionEstimate`]. The production implementation asks a local Ollama server;
//! tests drive the run loop with scripted estimators through the same trait.
//!
//! ## Example
//!
//! ```rust,no_run
//! use calorie_tracker::config::EstimatorConfig;
//! use calorie_tracker::errors::AppResult;
//! use calorie_tracker::llm::{NutritionEstimator, OllamaEstimator};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> AppResult<()> {
//!     let estimator = OllamaEstimator::new(EstimatorConfig::default())?;
//!     let estimate = estimator.estimate("2 slices pizza").await?;
//!     println!("{} kcal", estimate.calories());
//!     Ok(())
//! }
//! ```

mod ollama;
pub mod parser;
pub mod prompts;

pub use ollama::OllamaEstimator;
pub use parser::{extract_numbers, parse_nutrition_reply};
pub use prompts::nutrition_estimate_prompt;

use async_trait::async_trait;

use crate::errors::AppResult;
use crate::models::NutritionEstimate;

/// Estimator contract
///
/// One call per food item, no retries. Failures are `EstimationFailed` for
/// transport or service problems and `EstimateParseFailed` when the reply does
/// not hold four numbers.
#[async_trait]
pub trait NutritionEstimator: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Estimate nutrition for one food description
    async fn estimate(&self, description: &str) -> AppResult<NutritionEstimate>;
}
