// ABOUTME: File-backed daily ledger store with one JSON document per calendar day
// ABOUTME: Append-only writes through a temporary file and atomic rename; corrupt files read as empty
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Ledger Store
//!
//! Layout of the data directory:
//!
//! ```text
//! tracker/
//!   25-03-06.json
//!   25-03-07.json
//!   25-03-07.json.corrupt     (only after an unreadable file was replaced)
//!   25-03-07.json.corrupt.1   (the next one for the same day)
//! ```
//!
//! A file counts as unreadable when it cannot be read, does not parse as a
//! ledger, or carries a `date` field naming another day. The last case means the
//! file was copied or renamed by hand; its entries are not counted toward this
//! day and the file is moved aside like any other unreadable ledger.
//!
//! ## Concurrency
//!
//! The store assumes one writer. [`LedgerStore::append`] reads the whole day,
//! appends in memory and replaces the file, so two processes appending to the
//! same day at the same time race and the last rename wins: the other process's
//! entry is lost. Readers never see a half-written file because every write goes
//! to a temporary file in the same directory and is then renamed over the target.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, info, warn};

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{DailyLedger, FoodEntry, LedgerDate};

/// Suffix given to an unreadable ledger before it is replaced
const CORRUPT_SUFFIX: &str = "corrupt";

/// Per-day JSON ledger files under one root directory
#[derive(Debug, Clone)]
pub struct LedgerStore {
    root: PathBuf,
}

impl LedgerStore {
    /// Store rooted at `root`; the directory is created on first write
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at `root`, creating the directory now
    ///
    /// # Errors
    ///
    /// Returns a storage error if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> AppResult<Self> {
        let store = Self::new(root);
        store.ensure_root()?;
        Ok(store)
    }

    /// Directory holding the ledger files
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the ledger file for `date`
    #[must_use]
    pub fn path_for(&self, date: LedgerDate) -> PathBuf {
        self.root.join(date.file_name())
    }

    /// Read the ledger for `date`, surfacing corruption
    ///
    /// Returns `Ok(None)` when no file exists for the day.
    ///
    /// # Errors
    ///
    /// Returns `CorruptLedger` if the file exists but cannot be read, is not valid
    /// JSON in the ledger shape, or belongs to a different date.
    pub fn try_load_ledger(&self, date: LedgerDate) -> AppResult<Option<DailyLedger>> {
        let path = self.path_for(date);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::corrupt_ledger(format!(
                    "could not read {}: {e}",
                    path.display()
                ))
                .with_source(e))
            }
        };

        let ledger: DailyLedger = serde_json::from_slice(&bytes).map_err(|e| {
            AppError::corrupt_ledger(format!(
                "could not parse {}: {e}",
                path.display()
            ))
            .with_source(e)
        })?;

        if ledger.date() != date {
            return Err(AppError::corrupt_ledger(format!(
                "{} is dated {} instead of {date}",
                path.display(),
                ledger.date()
            )));
        }

        debug!(
            date = %date,
            entries = ledger.entries().len(),
            "Loaded daily ledger"
        );
        Ok(Some(ledger))
    }

    /// Entries recorded for `date`, surfacing corruption
    ///
    /// # Errors
    ///
    /// Returns `CorruptLedger` under the same conditions as [`Self::try_load_ledger`].
    pub fn try_load(&self, date: LedgerDate) -> AppResult<Vec<FoodEntry>> {
        Ok(self
            .try_load_ledger(date)?
            .map(DailyLedger::into_entries)
            .unwrap_or_default())
    }

    /// Entries recorded for `date`, oldest first
    ///
    /// A missing file yields an empty list. An unreadable file also yields an
    /// empty list; the problem is logged as a warning and never fails the caller.
    #[must_use]
    pub fn load(&self, date: LedgerDate) -> Vec<FoodEntry> {
        self.load_ledger(date).into_entries()
    }

    /// Whole ledger for `date`, empty when missing or unreadable
    #[must_use]
    pub fn load_ledger(&self, date: LedgerDate) -> DailyLedger {
        match self.try_load_ledger(date) {
            Ok(Some(ledger)) => ledger,
            Ok(None) => DailyLedger::empty(date),
            Err(e) => {
                warn!(date = %date, "Treating unreadable ledger as empty: {e}");
                DailyLedger::empty(date)
            }
        }
    }

    /// Append `entry` to the ledger for `date` and persist the whole day
    ///
    /// Prior entries keep their order and the calorie total is recomputed from
    /// the full entry list. If the existing file is unreadable it is moved aside
    /// to `<date>.json.corrupt` (or `.corrupt.N` when earlier backups exist) and
    /// the day restarts from this entry.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the directory, temporary file or rename fails.
    /// On error the previous file is left untouched.
    pub fn append(&self, date: LedgerDate, entry: FoodEntry) -> AppResult<PathBuf> {
        self.ensure_root()?;

        let mut ledger = match self.try_load_ledger(date) {
            Ok(Some(ledger)) => ledger,
            Ok(None) => DailyLedger::empty(date),
            Err(e) if e.code == ErrorCode::CorruptLedger => {
                warn!(date = %date, "Replacing unreadable ledger: {e}");
                self.preserve_corrupt(date)?;
                DailyLedger::empty(date)
            }
            Err(e) => return Err(e),
        };
        ledger.push(entry);

        let path = self.path_for(date);
        self.write_atomic(&path, &ledger)?;

        info!(
            date = %date,
            path = %path.display(),
            entries = ledger.entries().len(),
            total_calories = ledger.total_calories(),
            "Saved daily ledger"
        );
        Ok(path)
    }

    /// Create the data directory if it does not exist yet
    ///
    /// # Errors
    ///
    /// Returns a storage error if the directory cannot be created.
    pub fn ensure_root(&self) -> AppResult<()> {
        fs::create_dir_all(&self.root).map_err(|e| {
            AppError::storage(format!(
                "could not create data directory {}: {e}",
                self.root.display()
            ))
            .with_source(e)
        })
    }

    /// Serialize to a sibling temporary file, flush it to disk, then rename
    fn write_atomic(&self, path: &Path, ledger: &DailyLedger) -> AppResult<()> {
        let json = serde_json::to_vec_pretty(ledger)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let tmp_path = self
            .root
            .join(format!(".{file_name}.{}.tmp", process::id()));

        let written = File::create(&tmp_path).and_then(|mut file| {
            file.write_all(&json)?;
            file.write_all(b"\n")?;
            file.sync_all()
        });
        if let Err(e) = written.and_then(|()| fs::rename(&tmp_path, path)) {
            // Best effort; the temporary file is not part of the ledger
            let _ = fs::remove_file(&tmp_path);
            return Err(AppError::storage(format!(
                "could not write {}: {e}",
                path.display()
            ))
            .with_source(e));
        }
        Ok(())
    }

    fn preserve_corrupt(&self, date: LedgerDate) -> AppResult<()> {
        let path = self.path_for(date);
        if !path.exists() {
            return Ok(());
        }
        let backup = self.free_backup_path(date)?;
        fs::rename(&path, &backup).map_err(|e| {
            AppError::storage(format!(
                "could not move unreadable ledger {} aside: {e}",
                path.display()
            ))
            .with_source(e)
        })?;
        warn!(
            backup = %backup.display(),
            "Unreadable ledger preserved before overwrite"
        );
        Ok(())
    }

    /// First backup name for `date` that is not taken yet
    fn free_backup_path(&self, date: LedgerDate) -> AppResult<PathBuf> {
        let base = format!("{}.{CORRUPT_SUFFIX}", date.file_name());
        let first = self.root.join(&base);
        if !first.exists() {
            return Ok(first);
        }
        (1_u32..)
            .map(|n| self.root.join(format!("{base}.{n}")))
            .find(|candidate| !candidate.exists())
            .ok_or_else(|| AppError::storage(format!("no free backup name for {base}")))
    }
}
