//! Recording progress sink.

use a11y_analysis::{ProgressSink, ProgressStage};
use async_trait::async_trait;
use parking_lot::Mutex;

/// Captures progress checkpoints in the order they were reported.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    stages: Mutex<Vec<ProgressStage>>,
}

impl RecordingProgress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reported stages, in order.
    #[must_use]
    pub fn stages(&self) -> Vec<ProgressStage> {
        self.stages.lock().clone()
    }
}

#[async_trait]
impl ProgressSink for RecordingProgress {
    async fn report(&self, stage: ProgressStage) {
        self.stages.lock().push(stage);
    }
}
