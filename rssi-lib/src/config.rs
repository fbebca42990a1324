use crate::constants::CHANNEL_COUNT;
use std::ops::RangeInclusive;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Accepted inter-scan delay, milliseconds.
pub const DELAY_RANGE: RangeInclusive<u16> = 2..=1000;

/// Accepted samples-per-channel repeat count.
pub const SCAN_REPEAT_RANGE: RangeInclusive<u16> = 1..=100;

/// Accepted history bound for the sample store.
pub const MAX_SCANS_RANGE: RangeInclusive<usize> = 1..=100;

/// Scan settings serialized to the dongle by [`RssiDevice::resume`].
///
/// Owned by the caller and outliving connection cycles; the command
/// driver only reads it.
///
/// [`RssiDevice::resume`]: crate::device::RssiDevice::resume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScanConfig {
    pub delay_ms: u16,
    pub scan_repeat: u16,
    pub channel_min: u16,
    pub channel_max: u16,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            delay_ms: 10,
            scan_repeat: 1,
            channel_min: 0,
            channel_max: CHANNEL_COUNT as u16 - 1,
        }
    }
}

impl ScanConfig {
    /// The channel range normalized so min ≤ max regardless of the
    /// order the operator entered the bounds in.
    pub fn channel_bounds(&self) -> (u16, u16) {
        if self.channel_min <= self.channel_max {
            (self.channel_min, self.channel_max)
        } else {
            (self.channel_max, self.channel_min)
        }
    }

    /// Copy of `self` with every field clamped into its accepted range.
    pub fn clamped(&self) -> Self {
        Self {
            delay_ms: self
                .delay_ms
                .clamp(*DELAY_RANGE.start(), *DELAY_RANGE.end()),
            scan_repeat: self
                .scan_repeat
                .clamp(*SCAN_REPEAT_RANGE.start(), *SCAN_REPEAT_RANGE.end()),
            channel_min: self.channel_min.min(CHANNEL_COUNT as u16 - 1),
            channel_max: self.channel_max.min(CHANNEL_COUNT as u16 - 1),
        }
    }
}
