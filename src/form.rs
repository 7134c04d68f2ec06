//! Shared form state for the distribution workflow.
//!
//! Holds the editable row list, the selected mode, and the per-attempt
//! submission status. Cloned handles share one state behind a mutex so a
//! UI task and the submission task observe the same form.

use crate::types::{DistributionMode, DistributionRow, RowField};
use anyhow::{anyhow, Result};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Live state of the current submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Pending { tx_hash: String },
}

#[derive(Debug)]
struct FormInner {
    rows: Vec<DistributionRow>,
    mode: DistributionMode,
    submitting: bool,
    state: SubmissionState,
}

/// In-memory distribution form: row list plus loading/status flags.
#[derive(Clone)]
pub struct DistributionForm {
    inner: Arc<Mutex<FormInner>>,
}

impl DistributionForm {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FormInner {
                rows: Vec::new(),
                mode: DistributionMode::default(),
                submitting: false,
                state: SubmissionState::Idle,
            })),
        }
    }

    /// Replace the entire row list (a CSV import never appends).
    pub async fn set_rows(&self, rows: Vec<DistributionRow>) {
        let mut inner = self.inner.lock().await;
        inner.rows = rows;
    }

    /// Append a blank row for manual entry.
    pub async fn add_row(&self) {
        let mut inner = self.inner.lock().await;
        inner.rows.push(DistributionRow::empty());
    }

    /// Edit one field of an existing row.
    pub async fn update_row(&self, index: usize, field: RowField, value: String) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let row = inner
            .rows
            .get_mut(index)
            .ok_or_else(|| anyhow!("no row at index {}", index))?;
        match field {
            RowField::Address => row.address = value,
            RowField::Amount => row.amount = value,
        }
        Ok(())
    }

    pub async fn remove_row(&self, index: usize) -> Result<()> {
        let mut inner = self.inner.lock().await;
        if index >= inner.rows.len() {
            return Err(anyhow!("no row at index {}", index));
        }
        inner.rows.remove(index);
        Ok(())
    }

    pub async fn clear_rows(&self) {
        let mut inner = self.inner.lock().await;
        inner.rows.clear();
    }

    pub async fn rows(&self) -> Vec<DistributionRow> {
        let inner = self.inner.lock().await;
        inner.rows.clone()
    }

    pub async fn len(&self) -> usize {
        let inner = self.inner.lock().await;
        inner.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn mode(&self) -> DistributionMode {
        let inner = self.inner.lock().await;
        inner.mode
    }

    pub async fn set_mode(&self, mode: DistributionMode) {
        let mut inner = self.inner.lock().await;
        inner.mode = mode;
    }

    /// Claim the submission slot. Returns false when a submission is
    /// already in flight; the busy flag serializes attempts per form.
    pub async fn begin_submission(&self) -> bool {
        let mut inner = self.inner.lock().await;
        if inner.submitting {
            return false;
        }
        inner.submitting = true;
        true
    }

    /// Release the submission slot and return the status to idle.
    pub async fn end_submission(&self) {
        let mut inner = self.inner.lock().await;
        inner.submitting = false;
        inner.state = SubmissionState::Idle;
    }

    pub async fn is_submitting(&self) -> bool {
        let inner = self.inner.lock().await;
        inner.submitting
    }

    pub async fn set_state(&self, state: SubmissionState) {
        let mut inner = self.inner.lock().await;
        inner.state = state;
    }

    pub async fn state(&self) -> SubmissionState {
        let inner = self.inner.lock().await;
        inner.state.clone()
    }
}

impl Default for DistributionForm {
    fn default() -> Self {
        Self::new()
    }
}
