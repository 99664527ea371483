pub const DEFAULT_LASER_TOPIC: &str = "laser";
pub const DEFAULT_LASER_FRAME: &str = "laser";
pub const DEFAULT_WALL_CLOCK_TOPIC: &str = "/wall_clock";
pub(crate) const MILLIMETERS_PER_METER: f64 = 1000.;
// How long a listener thread waits for data before checking its terminator
pub(crate) const TERMINATOR_POLL_INTERVAL_MS: u64 = 10;
pub(crate) const TERMINATOR_CHANNEL_SIZE: usize = 10;
