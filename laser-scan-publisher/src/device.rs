use crate::error::LaserScanError;
use laser_scan_data::{DeviceConfiguration, RawScan};

/// Callback invoked by a device for every completed sweep.
pub type ScanListener = Box<dyn FnMut(RawScan) + Send + 'static>;

/// Source of raw scans.
///
/// The listener passed to `start_scanning` may be called from any thread;
/// consecutive calls for one device never overlap.
pub trait LaserScannerDevice: Send {
    fn configuration(&self) -> Result<DeviceConfiguration, LaserScanError>;
    fn start_scanning(&mut self, listener: ScanListener) -> Result<(), LaserScanError>;
    /// Stops scanning and releases the device.
    fn shutdown(&mut self) -> Result<(), LaserScanError>;
}
