//! Per-user session state
//!
//! Category labels outlive runs; the export text belongs to the most recent
//! run and is reset whenever a new one starts.

use serde::Serialize;

use crate::abnt::CategoryLabels;
use crate::citation::BucketKey;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    labels: CategoryLabels,
    last_export: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labels(&self) -> &CategoryLabels {
        &self.labels
    }

    pub fn set_label(&mut self, key: BucketKey, label: &str) {
        self.labels.set(key, label);
    }

    pub fn remove_label(&mut self, key: &BucketKey) -> Option<String> {
        self.labels.remove(key)
    }

    /// Forget the previous run's output
    pub fn begin_run(&mut self) {
        self.last_export = None;
    }

    /// Keep a run's export text for download
    pub fn record_export(&mut self, export: String) {
        self.last_export = Some(export);
    }

    /// Export text of the last run, if it produced anything to download
    pub fn last_export(&self) -> Option<&str> {
        self.last_export
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }

    /// Drop the last run; labels are kept
    pub fn clear(&mut self) {
        self.begin_run();
    }
}
