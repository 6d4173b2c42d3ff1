// ABOUTME: Ollama generate-endpoint client that turns a food description into a nutrition estimate
// ABOUTME: Single non-streaming request per item, bounded timeout, positional reply parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Ollama Estimator
//!
//! Sends one `POST /api/generate` request per food item:
//!
//! ```json
//! { "model": "qwen3:8b", "prompt": "...", "stream": false }
//! ```
//!
//! and reads the `response` text field of the reply. The request is never
//! retried; a failure surfaces immediately to the caller.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, instrument};

use super::parser::parse_nutrition_reply;
use super::prompts::nutrition_estimate_prompt;
use super::NutritionEstimator;
use crate::config::EstimatorConfig;
use crate::errors::{AppError, AppResult};
use crate::models::NutritionEstimate;

/// Upper bound on establishing the TCP connection
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Longest slice of an error body echoed back to the user
const ERROR_BODY_PREVIEW_CHARS: usize = 200;

/// Generate request body
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

/// Generate reply body; only the text is used
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Error body returned by Ollama on failure
#[derive(Debug, Deserialize)]
struct OllamaErrorResponse {
    error: String,
}

/// Nutrition estimator backed by a local Ollama server
pub struct OllamaEstimator {
    client: Client,
    config: EstimatorConfig,
}

impl OllamaEstimator {
    /// Create an estimator for the configured endpoint and model
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: EstimatorConfig) -> AppResult<Self> {
        let connect_timeout = config
            .timeout
            .min(Duration::from_secs(CONNECT_TIMEOUT_SECS));
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        info!(
            endpoint = %config.endpoint,
            model = %config.model,
            timeout_secs = config.timeout.as_secs(),
            "Initialized Ollama estimator"
        );

        Ok(Self { client, config })
    }

    /// Settings this estimator was built with
    #[must_use]
    pub const fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Send the prompt and return the model's raw text reply
    async fn generate(&self, prompt: String) -> AppResult<String> {
        let body = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            error!("Failed to read estimation response: {e}");
            AppError::estimation(format!("Failed to read response: {e}")).with_source(e)
        })?;

        if !status.is_success() {
            return Err(Self::parse_error_response(status, &text));
        }

        let reply: GenerateResponse = serde_json::from_str(&text).map_err(|e| {
            AppError::estimation(format!("Unexpected response format: {e}")).with_source(e)
        })?;
        Ok(reply.response)
    }

    /// Map a transport failure to a diagnostic message
    fn transport_error(&self, e: &reqwest::Error) -> AppError {
        error!("Failed to send request to {}: {e}", self.config.endpoint);
        if e.is_timeout() {
            AppError::estimation(format!(
                "No reply from {} within {} seconds",
                self.config.endpoint,
                self.config.timeout.as_secs()
            ))
        } else if e.is_connect() {
            AppError::estimation(format!(
                "Cannot connect to the estimation service. Is Ollama running at {}?",
                self.config.endpoint
            ))
        } else {
            AppError::estimation(format!("Request failed: {e}"))
        }
    }

    /// Parse error response from the service
    fn parse_error_response(status: StatusCode, body: &str) -> AppError {
        let detail = serde_json::from_str::<OllamaErrorResponse>(body).map_or_else(
            |_| body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect::<String>(),
            |e| e.error,
        );

        match status.as_u16() {
            404 => AppError::estimation(format!("Model or endpoint not found: {detail}")),
            502..=504 => AppError::estimation(format!(
                "Estimation service is not responding ({status}): {detail}"
            )),
            _ => AppError::estimation(format!("Service returned {status}: {detail}")),
        }
    }
}

#[async_trait]
impl NutritionEstimator for OllamaEstimator {
    fn name(&self) -> &'static str {
        "ollama"
    }

    #[instrument(skip(self), fields(model = %self.config.model))]
    async fn estimate(&self, description: &str) -> AppResult<NutritionEstimate> {
        let prompt = nutrition_estimate_prompt(description);
        debug!(prompt_len = prompt.len(), "Sending estimation request");

        let reply = self.generate(prompt).await?;
        debug!(reply = %reply, "Received estimation reply");

        parse_nutrition_reply(&reply)
    }
}
