use crate::config::ScanConfig;
use crate::device::RssiDevice;
use crate::error::RssiError;
use crate::frame::FrameDecoder;
use crate::store::SampleStore;
use crate::watchdog::{NO_DATA_TIMEOUT, NoDataWatchdog};
use tokio::sync::oneshot;
use tracing::debug;

const READ_BUF_SIZE: usize = 256;

/// One scanning session: device, decoder, store and watchdog wired
/// together for a single connection cycle.
///
/// Inbound bytes flow device → decoder → store strictly in arrival
/// order; [`poll`](Self::poll) runs the whole path synchronously, so
/// the ordering of records within the connection is preserved exactly.
pub struct RssiScanner {
    device: RssiDevice,
    decoder: FrameDecoder,
    store: SampleStore,
    watchdog: NoDataWatchdog,
    paused: bool,
}

impl RssiScanner {
    /// Open the port, arm the no-data watchdog and start the dongle
    /// streaming with the given settings.
    ///
    /// The returned receiver resolves at most once, if no telemetry is
    /// decoded within the watchdog timeout.
    pub async fn connect(
        path: &str,
        config: &ScanConfig,
    ) -> Result<(Self, oneshot::Receiver<()>), RssiError> {
        let device = RssiDevice::open(path).await?;
        let mut scanner = Self::with_device(device);
        let no_data = scanner.watchdog.arm(NO_DATA_TIMEOUT);
        scanner.device.resume(config).await?;
        Ok((scanner, no_data))
    }

    /// Wire a session around an already-open device, without arming the
    /// watchdog or issuing the configure-and-start sequence.
    pub fn with_device(device: RssiDevice) -> Self {
        Self {
            device,
            decoder: FrameDecoder::new(),
            store: SampleStore::default(),
            watchdog: NoDataWatchdog::new(),
            paused: false,
        }
    }

    /// Read one chunk from the device, decode it and fold the records
    /// into the store. Returns the number of records decoded.
    ///
    /// The first decoded record of the cycle disarms the watchdog.
    /// While paused, inbound chunks are discarded undecoded.
    pub async fn poll(&mut self) -> Result<usize, RssiError> {
        let mut buf = [0u8; READ_BUF_SIZE];
        let n = self.device.read_chunk(&mut buf).await?;
        if n == 0 {
            return Ok(0);
        }
        if self.paused {
            debug!("paused, dropping {n} inbound bytes");
            return Ok(0);
        }
        let samples = self.decoder.decode(&buf[..n]);
        if !samples.is_empty() {
            self.watchdog.disarm();
        }
        let count = samples.len();
        for sample in samples {
            self.store.insert(sample);
        }
        Ok(count)
    }

    /// Stop the dongle and discard inbound data until [`resume`] runs.
    /// Silence is expected while paused, so the watchdog is disarmed
    /// too.
    ///
    /// [`resume`]: Self::resume
    pub async fn pause(&mut self) -> Result<(), RssiError> {
        self.watchdog.disarm();
        self.paused = true;
        self.device.pause().await
    }

    /// Reconfigure the dongle and start it streaming again.
    pub async fn resume(&mut self, config: &ScanConfig) -> Result<(), RssiError> {
        self.paused = false;
        self.device.resume(config).await
    }

    /// Send an operator-supplied diagnostic command verbatim.
    pub async fn write_raw(&mut self, text: &str) -> Result<(), RssiError> {
        self.device.write_raw(text).await
    }

    /// Empty all channel history and drop any partially buffered frame.
    /// The decoder cursor always resets with the store, never alone.
    pub fn clear(&mut self) {
        self.store.reset();
        self.decoder.reset();
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn store(&self) -> &SampleStore {
        &self.store
    }

    pub fn set_max_scans(&mut self, max_scans: usize) {
        self.store.set_max_scans(max_scans);
    }

    pub fn is_open(&self) -> bool {
        self.device.is_open()
    }

    /// End the connection cycle: disarm the watchdog, stop and close
    /// the device (bounded, never hangs) and reset store and decoder.
    pub async fn disconnect(&mut self) {
        self.watchdog.disarm();
        self.device.close().await;
        self.clear();
    }
}
