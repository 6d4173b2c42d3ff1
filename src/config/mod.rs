// ABOUTME: Configuration module for the calorie tracker
// ABOUTME: Re-exports the run configuration and its environment loader
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment-based configuration
pub mod environment;

pub use environment::{DailyLimit, EstimatorConfig, SyncConfig, TrackerConfig};
