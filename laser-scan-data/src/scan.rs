use crate::time::Timestamp;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One sweep of raw readings as delivered by the device.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawScan {
    /// Device clock when the sweep was taken, in milliseconds.
    pub timestamp_ms: u64,
    /// Distance per angular step in millimeters, blind zones included.
    pub ranges: Vec<u32>,
}

/// Struct to hold one sweep in the form published on the bus.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScanRecord {
    /// Reference frame of the sensor.
    pub frame_id: String,
    /// Acquisition time on the wall clock.
    pub timestamp: Timestamp,
    /// Angle of the first reading in radian.
    pub angle_min: f32,
    /// Angle of the last reading in radian.
    pub angle_max: f32,
    pub angle_increment: f32,
    /// Time between readings in seconds.
    pub time_increment: f32,
    /// Time between scans in seconds.
    pub scan_time: f32,
    /// Minimum valid range in meters.
    pub range_min: f32,
    /// Maximum valid range in meters.
    pub range_max: f32,
    /// Distances in meters, blind zones removed.
    pub ranges: Vec<f32>,
}
