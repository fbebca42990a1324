use crate::constants::{FRAME_SIZE, PENDING_BUFFER_CAP, SYNC_BYTE};
use bytes::{Buf, BytesMut};
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One decoded telemetry record.
///
/// `value` is an inverted magnitude: a smaller number means a stronger
/// measured signal. Mapping the raw channel index to a logical channel
/// number or frequency is a presentation concern and not done here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sample {
    pub channel: u8,
    pub value: u8,
}

/// Incremental decoder for the dongle's framed byte stream.
///
/// The stream has no checksum and no length field; a frame is exactly
/// `[0xFF, channel, value]` with `0xFF` excluded from the data
/// positions. Bytes that do not resolve into a frame yet are buffered
/// across calls, so splitting the stream into chunks at arbitrary
/// points never changes the decoded output.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    pending: BytesMut,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a newly arrived chunk, returning the records it completed
    /// in arrival order.
    ///
    /// Malformed input never errors: a stray `0xFF` in a data position
    /// costs at most the one frame it corrupted, after which decoding
    /// resynchronizes on the next sync byte. Every loop pass consumes
    /// at least one buffered byte, so decoding a finite chunk always
    /// terminates.
    pub fn decode(&mut self, chunk: &[u8]) -> Vec<Sample> {
        self.pending.extend_from_slice(chunk);

        // Drop the oldest bytes once the pending buffer overflows its
        // cap. An unsynchronized stream must not grow it unbounded.
        if self.pending.len() > PENDING_BUFFER_CAP {
            let excess = self.pending.len() - PENDING_BUFFER_CAP;
            trace!("pending buffer over cap, dropping {excess} oldest bytes");
            self.pending.advance(excess);
        }

        let mut samples = Vec::new();
        while self.pending.len() >= FRAME_SIZE {
            let Some(pos) = self.pending.iter().position(|&b| b == SYNC_BYTE) else {
                // No sync byte anywhere: everything buffered is junk.
                self.pending.clear();
                break;
            };
            if pos > 0 {
                // Junk before the sync byte.
                self.pending.advance(pos);
                continue;
            }

            let channel = self.pending[1];
            if channel == SYNC_BYTE {
                // The sync we matched was stray data; the byte after it
                // is the real frame start.
                self.pending.advance(1);
                continue;
            }
            let value = self.pending[2];
            if value == SYNC_BYTE {
                // Half a frame, then a new sync. Drop the half frame
                // and resynchronize at that byte.
                self.pending.advance(2);
                continue;
            }

            self.pending.advance(FRAME_SIZE);
            samples.push(Sample { channel, value });
        }
        samples
    }

    /// Discard all buffered bytes. Called whenever the sample store is
    /// reset so a new connection cycle never inherits stale framing.
    pub fn reset(&mut self) {
        self.pending.clear();
    }

    /// Number of bytes waiting for the rest of their frame.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
