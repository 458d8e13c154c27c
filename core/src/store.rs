use crate::report::{ValidationReport, ValidationRow};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRun {
    pub run_id: String,
    pub rows: Vec<ValidationRow>,
}

/// Keeps the rows of the most recent run for later export. Each `replace`
/// discards the previous run entirely.
#[derive(Debug, Default)]
pub struct ResultStore {
    latest: Mutex<Option<StoredRun>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&self, report: &ValidationReport) {
        *self.lock() = Some(StoredRun {
            run_id: report.run_id.clone(),
            rows: report.table.clone(),
        });
    }

    pub fn latest(&self) -> Option<StoredRun> {
        self.lock().clone()
    }

    /// Only the latest run is retained; older ids resolve to `None`.
    pub fn get(&self, run_id: &str) -> Option<StoredRun> {
        self.lock().as_ref().filter(|r| r.run_id == run_id).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, Option<StoredRun>> {
        // rows are written in one assignment; a poisoned guard still holds a whole run
        self.latest.lock().unwrap_or_else(|p| p.into_inner())
    }
}
