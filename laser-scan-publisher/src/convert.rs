use crate::constants::MILLIMETERS_PER_METER;
use laser_scan_data::{ClockOffset, DeviceConfiguration, RawScan, ScanRecord, Timestamp};

pub(crate) fn millimeters_to_meters(millimeters: u32) -> f32 {
    (millimeters as f64 / MILLIMETERS_PER_METER) as f32
}

/// Builds a scan record from raw readings and the device configuration.
///
/// Readings in the blind zones before `first_step` and from `last_step` on
/// are dropped, the rest are converted to meters. The device timestamp is
/// shifted by `offset` onto the wall clock.
///
/// # Panics
///
/// Panics if the scan holds fewer than `last_step` readings. The step
/// bounds are validated once at startup and the adapter checks the length
/// of every scan before converting it.
pub fn convert(
    scan: &RawScan,
    configuration: &DeviceConfiguration,
    offset: ClockOffset,
    frame_id: &str,
) -> ScanRecord {
    assert!(
        configuration.last_step <= scan.ranges.len(),
        "last step {} is beyond the {} readings of the scan",
        configuration.last_step,
        scan.ranges.len()
    );

    let ranges = scan.ranges[configuration.first_step..configuration.last_step]
        .iter()
        .map(|&d| millimeters_to_meters(d))
        .collect();

    ScanRecord {
        frame_id: frame_id.to_string(),
        timestamp: device_time(scan.timestamp_ms) + offset,
        angle_min: configuration.min_angle,
        angle_max: configuration.max_angle,
        angle_increment: configuration.angle_increment,
        time_increment: configuration.time_increment,
        scan_time: configuration.scan_time,
        range_min: millimeters_to_meters(configuration.min_range_mm),
        range_max: millimeters_to_meters(configuration.max_range_mm),
        ranges,
    }
}

fn device_time(timestamp_ms: u64) -> Timestamp {
    Timestamp::from_millis(i64::try_from(timestamp_ms).unwrap_or(i64::MAX))
}
