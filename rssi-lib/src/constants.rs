// Wire protocol constants for the RSSI dongle firmware

/// Start-of-record marker. Reserved: never valid in the channel or
/// value position of a frame.
pub const SYNC_BYTE: u8 = 0xFF;

/// Size of one telemetry frame: sync byte, channel, value (3 bytes)
pub const FRAME_SIZE: usize = 3;

/// Cap on the decoder's pending buffer (168 frames). Bounds memory
/// against an unsynchronized or stalled stream; oldest bytes drop first.
pub const PENDING_BUFFER_CAP: usize = 504;

/// Number of channel slots in the sample store. Exceeds the dongle's
/// real channel domain to leave headroom for out-of-range ids.
pub const CHANNEL_COUNT: usize = 168;
