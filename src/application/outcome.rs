use crate::application::submission::SubmissionResult;
use crate::domain::models::{ItemRejection, LoadOutcome, LoadReport};

/// Tracks the verdict of one load. Once failed, it stays failed.
#[derive(Debug)]
pub struct OutcomeAggregator {
    success: bool,
    batches_submitted: u64,
    rejections: Vec<ItemRejection>,
}

impl Default for OutcomeAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl OutcomeAggregator {
    pub fn new() -> Self {
        Self {
            success: true,
            batches_submitted: 0,
            rejections: Vec::new(),
        }
    }

    pub fn record_batch_failure(&mut self) {
        self.success = false;
    }

    pub fn record_submission(&mut self, result: SubmissionResult) {
        self.batches_submitted += 1;
        if result.errors {
            self.record_batch_failure();
        }
        self.rejections.extend(result.rejections);
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn finish(self, rows_read: u64) -> LoadReport {
        LoadReport {
            outcome: LoadOutcome::Completed { success: self.success },
            rows_read,
            batches_submitted: self.batches_submitted,
            rejections: self.rejections,
        }
    }

    pub fn abort(mut self, column: String, line: u64, rows_read: u64) -> LoadReport {
        self.record_batch_failure();
        LoadReport {
            outcome: LoadOutcome::Aborted { column, line },
            rows_read,
            batches_submitted: self.batches_submitted,
            rejections: self.rejections,
        }
    }
}
