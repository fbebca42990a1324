use crate::config::MAX_SCANS_RANGE;
use crate::constants::CHANNEL_COUNT;
use crate::frame::Sample;
use std::collections::VecDeque;

/// Default bound on per-channel history length.
pub const DEFAULT_MAX_SCANS: usize = 30;

/// Bounded recent-history store for per-channel signal samples.
///
/// Each channel keeps its `max_scans` newest values, newest first,
/// together with a cached `best` aggregate. Since values are inverted
/// magnitudes, "best" is the *minimum* over the window: the strongest
/// signal observed recently. The display overlays the live head of the
/// window (`current_value`) with this held peak (`best_value`).
#[derive(Debug, Clone)]
pub struct SampleStore {
    history: Vec<VecDeque<u8>>,
    best: Vec<Option<u8>>,
    max_scans: usize,
}

impl Default for SampleStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SCANS)
    }
}

impl SampleStore {
    pub fn new(max_scans: usize) -> Self {
        Self {
            history: vec![VecDeque::new(); CHANNEL_COUNT],
            best: vec![None; CHANNEL_COUNT],
            max_scans: clamp_max_scans(max_scans),
        }
    }

    /// Record one decoded sample.
    ///
    /// Out-of-domain channel ids are protocol noise and dropped
    /// silently. The channel's `best` is recomputed over the bounded
    /// window on every insert, which is O(max_scans) and cheap.
    pub fn insert(&mut self, sample: Sample) {
        let Some(history) = self.history.get_mut(sample.channel as usize) else {
            return;
        };
        history.push_front(sample.value);
        history.truncate(self.max_scans);
        self.best[sample.channel as usize] = history.iter().copied().min();
    }

    /// Most recent sample for a channel, if any was ever received.
    pub fn current_value(&self, channel: u8) -> Option<u8> {
        self.history
            .get(channel as usize)
            .and_then(|h| h.front().copied())
    }

    /// Strongest (numerically smallest) sample in the channel's window.
    /// Absent exactly when the channel's history is empty.
    pub fn best_value(&self, channel: u8) -> Option<u8> {
        self.best.get(channel as usize).copied().flatten()
    }

    /// Full history window for a channel, newest first.
    pub fn scans(&self, channel: u8) -> Option<&VecDeque<u8>> {
        self.history.get(channel as usize)
    }

    /// Change the history bound for future insertions, clamped into
    /// [`MAX_SCANS_RANGE`]. Existing sequences are left untouched; a
    /// lowered bound takes effect the next time the affected channel
    /// receives a sample.
    pub fn set_max_scans(&mut self, max_scans: usize) {
        self.max_scans = clamp_max_scans(max_scans);
    }

    pub fn max_scans(&self) -> usize {
        self.max_scans
    }

    /// Empty every channel and clear the cached aggregates.
    pub fn reset(&mut self) {
        for history in &mut self.history {
            history.clear();
        }
        self.best.fill(None);
    }
}

fn clamp_max_scans(max_scans: usize) -> usize {
    max_scans.clamp(*MAX_SCANS_RANGE.start(), *MAX_SCANS_RANGE.end())
}
