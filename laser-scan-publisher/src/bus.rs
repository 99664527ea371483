use crate::error::LaserScanError;
use laser_scan_data::{ScanRecord, Timestamp};
use std::sync::Arc;

/// Callback invoked with the time carried by a wall clock message.
pub type WallClockListener = Box<dyn FnMut(Timestamp) + Send + 'static>;

/// Publish/subscribe transport the adapter talks to.
pub trait MessageBus {
    fn advertise(&mut self, topic: &str) -> Result<Arc<dyn ScanSink>, LaserScanError>;
    fn subscribe_wall_clock(
        &mut self,
        topic: &str,
        listener: WallClockListener,
    ) -> Result<Box<dyn Subscription>, LaserScanError>;
}

/// Destination of scan records. `publish` must not block.
pub trait ScanSink: Send + Sync {
    fn topic(&self) -> &str;
    fn publish(&self, record: ScanRecord) -> Result<(), LaserScanError>;
}

/// Handle of a registered listener. Unsubscribing twice is a no-op.
pub trait Subscription: Send {
    fn unsubscribe(&mut self);
}
