// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports helper modules for calorie-tracker
// ABOUTME: Provides access to console display and interactive input

pub mod display;
pub mod input;
