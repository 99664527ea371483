#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Static description of a range finder, read once when scanning starts.
///
/// Angles are in radian, times in seconds, ranges in millimeters.
/// Readings outside `first_step..last_step` are blind and never carry
/// information.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceConfiguration {
    pub model: String,
    pub min_range_mm: u32,
    pub max_range_mm: u32,
    pub total_steps: usize,
    pub first_step: usize,
    pub last_step: usize,
    /// Step pointing straight ahead.
    pub front_step: usize,
    /// Motor speed in rpm.
    pub standard_motor_speed: u32,
    pub angle_increment: f32,
    pub min_angle: f32,
    pub max_angle: f32,
    /// Time between two consecutive readings.
    pub time_increment: f32,
    /// Time between two consecutive scans.
    pub scan_time: f32,
}

/// Bound of the step invariant `first_step < last_step <= total_steps` that
/// a configuration broke.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("first step {first_step} must be smaller than last step {last_step}")]
    EmptySector { first_step: usize, last_step: usize },
    #[error("last step {last_step} exceeds the {total_steps} readings of a scan")]
    SectorOutOfRange { last_step: usize, total_steps: usize },
}

impl DeviceConfiguration {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.first_step >= self.last_step {
            return Err(ConfigurationError::EmptySector {
                first_step: self.first_step,
                last_step: self.last_step,
            });
        }
        if self.last_step > self.total_steps {
            return Err(ConfigurationError::SectorOutOfRange {
                last_step: self.last_step,
                total_steps: self.total_steps,
            });
        }
        Ok(())
    }

    /// Number of readings left once the blind zones are cut off.
    pub fn trimmed_len(&self) -> usize {
        self.last_step.saturating_sub(self.first_step)
    }
}
