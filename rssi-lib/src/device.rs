use crate::command::Command;
use crate::config::ScanConfig;
use crate::error::RssiError;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::time::timeout;
use tokio_serial::{SerialPortBuilderExt, SerialStream};
use tracing::{debug, info};

/// Baud rate of the dongle's CDC ACM port.
pub const BAUD_RATE: u32 = 115_200;

// Bound on a single write-then-drain cycle.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(1);

// Bound on the farewell "stop" during close. If the dongle does not
// drain it in time, the close proceeds anyway.
const CLOSE_TIMEOUT: Duration = Duration::from_secs(1);

/// One connection cycle against the dongle's serial port.
///
/// The port handle is owned exclusively by this object and invalidated
/// the moment [`close`](Self::close) runs, so a write from a
/// superseded cycle can never reach a newly opened connection. All
/// command writes are drained (flushed to the device) before the call
/// returns; the firmware has no acknowledgements, so draining is the
/// only way to keep commands from interleaving at its input parser.
/// The `&mut self` receivers keep at most one command in flight.
pub struct RssiDevice {
    port: Option<SerialStream>,
    path: String,
}

impl RssiDevice {
    /// Open the serial port at the fixed baud rate.
    pub async fn open(path: &str) -> Result<Self, RssiError> {
        #[allow(unused_mut)]
        let mut port = tokio_serial::new(path, BAUD_RATE).open_native_async()?;
        #[cfg(unix)]
        port.set_exclusive(false)?;
        info!("{path} is open");
        Ok(Self {
            port: Some(port),
            path: path.to_owned(),
        })
    }

    /// Wrap an already-open serial stream into a connection cycle.
    ///
    /// For callers that own port setup themselves, e.g. a
    /// pseudo-terminal standing in for the dongle.
    pub fn attach(port: SerialStream, path: &str) -> Self {
        Self {
            port: Some(port),
            path: path.to_owned(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.port.is_some()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Serialize one command and drain it to the device.
    ///
    /// A silent no-op when the port is closed: the driver never assumes
    /// transport lifetime, and callers track connection state on their
    /// own rather than through errors from this layer.
    pub async fn send(&mut self, command: Command) -> Result<(), RssiError> {
        let Some(port) = self.port.as_mut() else {
            debug!("port closed, dropping command: {command}");
            return Ok(());
        };
        info!("{command}");
        let line = command.to_line();
        timeout(DRAIN_TIMEOUT, async {
            port.write_all(line.as_bytes()).await?;
            port.flush().await
        })
        .await??;
        Ok(())
    }

    /// Configure the dongle and start it streaming.
    ///
    /// The firmware applies the channel-range commands relative to the
    /// currently effective delay/repeat state, so the order delay →
    /// repeat → min → max → start is a protocol requirement. Each
    /// command is fully drained before the next is written.
    pub async fn resume(&mut self, config: &ScanConfig) -> Result<(), RssiError> {
        for command in Command::resume_sequence(config) {
            self.send(command).await?;
        }
        Ok(())
    }

    /// Halt streaming.
    pub async fn pause(&mut self) -> Result<(), RssiError> {
        self.send(Command::Stop).await
    }

    /// Send an operator-supplied diagnostic command verbatim.
    pub async fn write_raw(&mut self, text: &str) -> Result<(), RssiError> {
        self.send(Command::Raw(text.to_owned())).await
    }

    /// Read one chunk of inbound telemetry. Returns 0 when the port is
    /// closed or the device signalled end of stream.
    pub async fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize, RssiError> {
        let Some(port) = self.port.as_mut() else {
            return Ok(0);
        };
        Ok(port.read(buf).await?)
    }

    /// Stop the dongle and close the port.
    ///
    /// The farewell "stop" is bounded by a timeout: a wedged device
    /// must never be able to block shutdown. The handle is taken out of
    /// `self` before anything else, so the cycle is invalid from the
    /// first instant of the close.
    pub async fn close(&mut self) {
        let Some(mut port) = self.port.take() else {
            return;
        };
        let farewell = timeout(CLOSE_TIMEOUT, async {
            let line = Command::Stop.to_line();
            port.write_all(line.as_bytes()).await?;
            port.flush().await
        })
        .await;
        match farewell {
            Ok(Ok(())) => {}
            Ok(Err(e)) => debug!("stop on close failed: {e}"),
            Err(_) => debug!("stop on close timed out, closing anyway"),
        }
        drop(port);
        info!("Serial port is closed");
    }
}
