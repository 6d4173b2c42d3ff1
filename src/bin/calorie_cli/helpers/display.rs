// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Console output for calorie-tracker
// ABOUTME: Renders entries, per-item progress, the daily summary and sync results on stdout

use std::path::Path;

use calorie_tracker::errors::AppError;
use calorie_tracker::models::{FoodEntry, LedgerDate};
use calorie_tracker::summary::{BudgetTier, DailySummary};
use calorie_tracker::tracker::{ItemProgress, RunReport};

const RULE_WIDTH: usize = 40;

fn rule(c: char) -> String {
    c.to_string().repeat(RULE_WIDTH)
}

/// Banner shown before input is collected
pub fn header() {
    println!("🍽️  Calorie Tracker");
    println!("{}", rule('='));
}

/// Result of pulling remote data before the run
pub fn pull_result(result: &Result<(), AppError>) {
    match result {
        Ok(()) => println!("✅ Successfully pulled latest data"),
        Err(e) => {
            println!("⚠️  Warning: Could not pull latest data: {}", e.message);
            println!("📝 Continuing with local data...");
        }
    }
}

/// Warning for a ledger file that could not be read
pub fn ledger_warning(path: &Path, error: &AppError) {
    println!(
        "⚠️  Warning: Could not read existing data from {}: {}",
        path.display(),
        error.message
    );
}

fn entry_lines(index: usize, entry: &FoodEntry) {
    let n = &entry.nutrition;
    println!(
        "{index}. [{}] {}",
        entry.timestamp.format("%H:%M"),
        entry.description
    );
    println!(
        "   🥩 {:.1}g protein, 🍞 {:.1}g carbs, 🥑 {:.1}g fat, 🔥 {:.1} cal",
        n.proteins(),
        n.carbs(),
        n.fat(),
        n.calories()
    );
}

/// Entries already recorded for the day
pub fn existing_entries(date: LedgerDate, entries: &[FoodEntry]) {
    if entries.is_empty() {
        println!("\n📋 No entries found for today ({date})");
    } else {
        println!("\n📋 Existing entries for today ({date}):");
        println!("{}", rule('-'));
        for (i, entry) in entries.iter().enumerate() {
            entry_lines(i + 1, entry);
        }
    }
    println!("{}", rule('-'));
}

/// One-line status shown when something was already eaten today
pub fn current_status(summary: &DailySummary) {
    if summary.consumed > 0.0 {
        println!(
            "🔥 Current status: {:.1}/{} calories consumed",
            summary.consumed, summary.limit
        );
        println!("💚 Remaining: {:.1} calories", summary.remaining);
        println!();
    }
}

/// Items about to be processed
pub fn item_list(foods: &[String]) {
    println!("Processing {} food items:", foods.len());
    for (i, food) in foods.iter().enumerate() {
        println!("  {}. {food}", i + 1);
    }
}

/// Per-item progress while the run is in flight
pub fn progress(event: ItemProgress<'_>) {
    match event {
        ItemProgress::Started {
            index,
            total,
            description,
        } => {
            println!("\n🔄 Processing item {index}/{total}: {description}");
            println!("🤖 Estimating nutrition...");
        }
        ItemProgress::Recorded {
            entry,
            path,
            entries_today,
            ..
        } => {
            let n = &entry.nutrition;
            println!(
                "📊 {:.1}g protein, {:.1}g carbs, {:.1}g fat",
                n.proteins(),
                n.carbs(),
                n.fat()
            );
            println!("💾 Saved to {}", path.display());
            println!("📊 Total entries today: {entries_today}");
            println!("✅ Added: {:.1} calories", n.calories());
        }
        ItemProgress::Failed { error, .. } => {
            println!("❌ Not recorded: {}", error.message);
        }
    }
}

/// Daily totals against the limit
pub fn daily_summary(summary: &DailySummary) {
    println!("\n{}", rule('='));
    println!("📈 Daily Calorie Summary");
    println!("{}", rule('='));
    println!("🎯 Daily Limit: {} calories", summary.limit);
    println!("🔥 Consumed: {:.1} calories", summary.consumed);
    println!("💚 Remaining: {:.1} calories", summary.remaining);

    match summary.tier {
        BudgetTier::OverLimit => println!(
            "⚠️  You've exceeded your daily limit by {:.1} calories!",
            summary.excess()
        ),
        BudgetTier::NearLimit => println!("⚡ You're almost at your daily limit!"),
        BudgetTier::OnTrack => println!("✅ You're doing great! Keep it up!"),
    }
}

/// Outcome of publishing the ledger after the run
pub fn publish_result(report: &RunReport, sync_enabled: bool) {
    if !sync_enabled || report.saved_to.is_none() {
        return;
    }
    println!(
        "\n🔄 Committing {} food entries to Git...",
        report.recorded.len()
    );
    match &report.sync_error {
        None => println!("✅ Successfully committed and pushed!"),
        Some(e) => {
            println!("⚠️  Git operation failed: {}", e.message);
            println!("You may need to manually commit and push the changes.");
        }
    }
}

/// Items that were not recorded, listed after the summary
pub fn failures(report: &RunReport) {
    if report.failures.is_empty() {
        return;
    }
    eprintln!("\n❌ {} item(s) not recorded:", report.failures.len());
    for failure in &report.failures {
        eprintln!("   • {}: {}", failure.description, failure.error);
    }
}

/// Top-level error
pub fn error(error: &AppError) {
    eprintln!("❌ Error: {error}");
}

/// Shown when the run is interrupted
pub fn farewell() {
    println!("\n👋 Goodbye!");
}
