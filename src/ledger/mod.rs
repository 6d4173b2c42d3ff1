// ABOUTME: Daily ledger persistence module
// ABOUTME: Re-exports the file-backed store used by the tracker and the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// JSON file store, one document per day
pub mod store;

pub use store::LedgerStore;
