use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Delay before a newly shown question is read out, so layout and math
/// typesetting can settle first.
pub const AUTO_NARRATION_DELAY: Duration = Duration::from_millis(500);

/// Tracks the single pending auto-narration.
///
/// Every `schedule` call supersedes the previous pending narration, as does
/// `cancel`. A superseded `PendingNarration` resolves to `None`.
#[derive(Debug, Clone)]
pub struct NarrationSchedule {
    epoch: Arc<AtomicU64>,
    delay: Duration,
}

impl Default for NarrationSchedule {
    fn default() -> Self {
        Self::new(AUTO_NARRATION_DELAY)
    }
}

impl NarrationSchedule {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            epoch: Arc::new(AtomicU64::new(0)),
            delay,
        }
    }

    /// Arm narration for the question at `index`.
    #[must_use]
    pub fn schedule(&self, index: usize) -> PendingNarration {
        let epoch = self.epoch.fetch_add(1, Ordering::AcqRel) + 1;
        PendingNarration {
            index,
            epoch,
            current: Arc::clone(&self.epoch),
            delay: self.delay,
        }
    }

    /// Invalidate whatever is pending.
    pub fn cancel(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
    }
}

#[derive(Debug)]
pub struct PendingNarration {
    index: usize,
    epoch: u64,
    current: Arc<AtomicU64>,
    delay: Duration,
}

impl PendingNarration {
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::Acquire) == self.epoch
    }

    /// Wait out the delay; yields the question index only if nothing
    /// superseded this narration in the meantime.
    pub async fn ready(self) -> Option<usize> {
        tokio::time::sleep(self.delay).await;
        self.is_current().then_some(self.index)
    }
}
