//! Explicit cache of loaded statement sets
//!
//! Entries are keyed by data directory and validated against a fingerprint of
//! the three source files (size and modification time). A changed file causes
//! a reload on the next lookup; callers can also drop entries by hand.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::{debug, warn};

use super::line_item::StatementKind;
use super::FinancialStatements;
use crate::error::{AnalyticsError, Result};

/// Identity of one source file at the time it was read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStamp {
    pub len: u64,
    pub modified: Option<SystemTime>,
}

/// Identity of the three statement files in a data directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceFingerprint {
    pub income: FileStamp,
    pub balance: FileStamp,
    pub cashflow: FileStamp,
}

impl SourceFingerprint {
    /// Stat the default statement files in `dir`
    pub fn of_dir(dir: &Path) -> Result<Self> {
        Ok(Self {
            income: stamp(&dir.join(StatementKind::Income.default_file_name()))?,
            balance: stamp(&dir.join(StatementKind::Balance.default_file_name()))?,
            cashflow: stamp(&dir.join(StatementKind::CashFlow.default_file_name()))?,
        })
    }
}

fn stamp(path: &Path) -> Result<FileStamp> {
    let meta = fs::metadata(path).map_err(|source| AnalyticsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(FileStamp {
        len: meta.len(),
        modified: meta.modified().ok(),
    })
}

#[derive(Debug)]
struct CachedStatements {
    fingerprint: SourceFingerprint,
    statements: FinancialStatements,
}

/// Cache manager for statement directories
#[derive(Debug, Default)]
pub struct StatementCache {
    entries: HashMap<PathBuf, CachedStatements>,

    /// Statistics
    pub cache_hits: u64,
    pub cache_misses: u64,
}

impl StatementCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the statements for `dir`, loading them if absent or stale
    pub fn get_or_load(&mut self, dir: &Path) -> Result<&FinancialStatements> {
        let fingerprint = SourceFingerprint::of_dir(dir)?;

        let cached = self.entries.get(dir).map(|e| e.fingerprint);
        if cached == Some(fingerprint) {
            debug!("Statement cache hit for {}", dir.display());
            self.cache_hits += 1;
        } else {
            if cached.is_some() {
                warn!("Statements in {} changed on disk, reloading", dir.display());
            }
            self.cache_misses += 1;
            let statements = FinancialStatements::load_from(dir)?;
            self.entries.insert(
                dir.to_path_buf(),
                CachedStatements {
                    fingerprint,
                    statements,
                },
            );
        }

        Ok(&self.entries[dir].statements)
    }

    /// Get cached statements without touching the filesystem
    pub fn get(&self, dir: &Path) -> Option<&FinancialStatements> {
        self.entries.get(dir).map(|e| &e.statements)
    }

    /// Drop the entry for one directory
    pub fn invalidate(&mut self, dir: &Path) -> bool {
        self.entries.remove(dir).is_some()
    }

    /// Clear all cached data
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cache_hits = 0;
        self.cache_misses = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }
}
