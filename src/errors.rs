// ABOUTME: Unified error type for the calorie tracker with per-kind exit codes
// ABOUTME: Covers estimation, parsing, ledger corruption, sync, input, storage and config failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible operation in the crate returns [`AppResult`]. The error carries an
//! [`ErrorCode`] that decides how the top-level run reports it: which message
//! prefix the user sees and which process exit code the binary returns.
//!
//! Recoverable kinds ([`ErrorCode::CorruptLedger`], [`ErrorCode::SyncFailed`]) are
//! downgraded to warnings by their callers and never end a run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// The estimation service could not be reached or answered with a failure
    #[serde(rename = "ESTIMATION_FAILED")]
    EstimationFailed,
    /// The estimation reply did not contain four numbers
    #[serde(rename = "ESTIMATE_PARSE_FAILED")]
    EstimateParseFailed,
    /// A stored daily ledger could not be read or decoded
    #[serde(rename = "CORRUPT_LEDGER")]
    CorruptLedger,
    /// Pulling from or publishing to the remote store failed
    #[serde(rename = "SYNC_FAILED")]
    SyncFailed,
    /// Interactive input was blank
    #[serde(rename = "EMPTY_INPUT")]
    EmptyInput,
    /// A value supplied by the caller is invalid
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput,
    /// Writing the ledger to disk failed
    #[serde(rename = "STORAGE_ERROR")]
    StorageError,
    /// Configuration is missing or invalid
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid,
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}

impl ErrorCode {
    /// Process exit code reported by the binary for this error kind
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::EmptyInput | Self::InvalidInput => 2,
            Self::EstimationFailed | Self::EstimateParseFailed => 3,
            Self::StorageError => 4,
            // Recovered kinds only surface when a caller chooses to fail on them
            Self::CorruptLedger => 5,
            Self::SyncFailed => 6,
            // EX_CONFIG from sysexits.h
            Self::ConfigInvalid => 78,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::EstimationFailed => "Nutrition estimation failed",
            Self::EstimateParseFailed => "Could not read nutrition values from the estimate",
            Self::CorruptLedger => "Daily ledger is unreadable",
            Self::SyncFailed => "Synchronization failed",
            Self::EmptyInput => "Food description cannot be empty",
            Self::InvalidInput => "The provided input is invalid",
            Self::StorageError => "Storage operation failed",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
        }
    }

    /// Whether the error is a failure of the estimation step for one food item
    #[must_use]
    pub const fn is_estimation_failure(&self) -> bool {
        matches!(self, Self::EstimationFailed | Self::EstimateParseFailed)
    }

    /// Whether callers are expected to log the error and carry on
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::CorruptLedger | Self::SyncFailed)
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Exit code the binary should return for this error
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.code.exit_code()
    }

    /// Estimation service failure (network, timeout, non-success status)
    pub fn estimation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::EstimationFailed, message)
    }

    /// Estimation reply could not be parsed
    pub fn estimate_parse(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::EstimateParseFailed, message)
    }

    /// Stored ledger is unreadable or malformed
    pub fn corrupt_ledger(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CorruptLedger, message)
    }

    /// Remote pull or publish failed
    pub fn sync(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SyncFailed, message)
    }

    /// Blank interactive input
    #[must_use]
    pub fn empty_input() -> Self {
        Self::new(ErrorCode::EmptyInput, "no food description was entered")
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::storage(error.to_string()).with_source(error)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::internal(format!("JSON serialization failed: {error}")).with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
