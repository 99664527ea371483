mod adapter;
mod bus;
mod channel;
mod clock;
mod config;
mod constants;
mod convert;
mod device;
mod error;
mod listener_thread;
mod offset_tracker;

use crossbeam_channel::{Receiver, Sender};
use laser_scan_data::{DeviceConfiguration, RawScan, ScanRecord, Timestamp};

pub use crate::adapter::{Adapter, AdapterState};
pub use crate::bus::{MessageBus, ScanSink, Subscription, WallClockListener};
pub use crate::channel::{ChannelBus, ChannelDevice, ChannelSink};
pub use crate::clock::{LocalClock, SystemClock};
pub use crate::config::AdapterConfig;
pub use crate::constants::{DEFAULT_LASER_FRAME, DEFAULT_LASER_TOPIC, DEFAULT_WALL_CLOCK_TOPIC};
pub use crate::convert::convert;
pub use crate::device::{LaserScannerDevice, ScanListener};
pub use crate::error::{LaserScanError, PublishFailure};
pub use crate::listener_thread::ListenerThread;
pub use crate::offset_tracker::ClockOffsetTracker;

pub type ChannelAdapter = Adapter<ChannelDevice, ChannelBus>;

/// Function to launch an adapter over in-process channels.
/// # Arguments
///
/// * `scan_rx` - Raw scans of the device, e.g. from a driver thread.
/// * `configuration` - Configuration of the device producing `scan_rx`.
/// * `config` - Topics and frame of the adapter.
/// * `capacity` - Size of each topic queue.
///
/// Returns the running adapter, the receiver of the published records and
/// the sender for wall clock corrections.
pub fn run_adapter(
    scan_rx: Receiver<RawScan>,
    configuration: DeviceConfiguration,
    config: AdapterConfig,
    capacity: usize,
) -> Result<(ChannelAdapter, Receiver<ScanRecord>, Sender<Timestamp>), LaserScanError> {
    let mut bus = ChannelBus::new(capacity);
    let record_rx = bus.scan_receiver(&config.laser_topic);
    let wall_clock_tx = bus.wall_clock_sender(&config.wall_clock_topic);

    let device = ChannelDevice::new(configuration, scan_rx);
    let mut adapter = Adapter::new(device, bus, config);
    adapter.start()?;

    Ok((adapter, record_rx, wall_clock_tx))
}
