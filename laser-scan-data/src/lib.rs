pub mod configuration;
pub mod scan;
pub mod time;

pub use configuration::{ConfigurationError, DeviceConfiguration};
pub use scan::{RawScan, ScanRecord};
pub use time::{ClockOffset, Timestamp};
