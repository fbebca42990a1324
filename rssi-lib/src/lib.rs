pub mod command;
pub mod config;
pub mod constants;
pub mod device;
pub mod error;
pub mod frame;
pub mod scanner;
pub mod store;
pub mod watchdog;


// Re-export the main types for easy access
pub use command::Command;
pub use config::ScanConfig;
pub use device::RssiDevice;
pub use error::RssiError;
pub use frame::{FrameDecoder, Sample};
pub use scanner::RssiScanner;
pub use store::SampleStore;
pub use watchdog::NoDataWatchdog;
