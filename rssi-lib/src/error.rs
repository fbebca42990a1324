use std::io;
use thiserror::Error;

/// The primary error type for the `rssi-lib` library.
///
/// Framing corruption, writes on a closed port and out-of-domain
/// channel ids are deliberately not represented here: the protocol
/// layer recovers from those locally and silently.
#[derive(Error, Debug)]
pub enum RssiError {
    #[error("serial port error: {0}")]
    Serial(#[from] tokio_serial::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("timeout during serial operation: {0}")]
    Timeout(#[from] tokio::time::error::Elapsed),
}
