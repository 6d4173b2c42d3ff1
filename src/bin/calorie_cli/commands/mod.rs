// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for calorie-tracker
// ABOUTME: Provides the logging run and the read-only status view

pub mod log;
pub mod status;
