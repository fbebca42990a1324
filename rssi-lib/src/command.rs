use crate::config::ScanConfig;
use std::fmt;

/// Configuration and control commands understood by the dongle
/// firmware. Each renders as one ASCII line terminated by `\r`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Lower bound of the scanned channel range.
    SetChannelMin(u16),
    /// Upper bound of the scanned channel range.
    SetChannelMax(u16),
    /// Inter-scan delay in milliseconds.
    SetDelay(u16),
    /// Samples taken per channel per scan pass.
    SetScanRepeat(u16),
    /// Begin streaming telemetry.
    Start,
    /// Halt streaming.
    Stop,
    /// Toggle the dongle's LED, a quick liveness check.
    ToggleLed,
    /// Operator-supplied diagnostic command, sent verbatim.
    Raw(String),
}

impl Command {
    /// Render the exact wire form of the command.
    pub fn to_line(&self) -> String {
        format!("{self}\r")
    }

    /// The full configure-and-start sequence for the given settings.
    ///
    /// The firmware applies channel-range commands relative to the
    /// currently effective delay/repeat state, so this exact order is
    /// a protocol requirement: delay, repeat, min, max, start.
    pub fn resume_sequence(config: &ScanConfig) -> [Command; 5] {
        let (channel_min, channel_max) = config.channel_bounds();
        [
            Command::SetDelay(config.delay_ms),
            Command::SetScanRepeat(config.scan_repeat),
            Command::SetChannelMin(channel_min),
            Command::SetChannelMax(channel_max),
            Command::Start,
        ]
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::SetChannelMin(channel) => write!(f, "set channel min {channel}"),
            Command::SetChannelMax(channel) => write!(f, "set channel max {channel}"),
            Command::SetDelay(delay) => write!(f, "set delay {delay}"),
            Command::SetScanRepeat(repeat) => write!(f, "set repeat {repeat}"),
            Command::Start => write!(f, "start"),
            Command::Stop => write!(f, "stop"),
            Command::ToggleLed => write!(f, "led"),
            Command::Raw(text) => write!(f, "{text}"),
        }
    }
}
