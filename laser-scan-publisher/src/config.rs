use crate::constants::{DEFAULT_LASER_FRAME, DEFAULT_LASER_TOPIC, DEFAULT_WALL_CLOCK_TOPIC};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options recognized by the adapter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AdapterConfig {
    /// Topic the scan records are published on.
    pub laser_topic: String,
    /// Frame id written into every scan record.
    pub laser_frame: String,
    /// Topic carrying wall clock corrections.
    pub wall_clock_topic: String,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        AdapterConfig {
            laser_topic: DEFAULT_LASER_TOPIC.to_string(),
            laser_frame: DEFAULT_LASER_FRAME.to_string(),
            wall_clock_topic: DEFAULT_WALL_CLOCK_TOPIC.to_string(),
        }
    }
}

impl AdapterConfig {
    pub fn with_laser_topic(mut self, topic: impl Into<String>) -> Self {
        self.laser_topic = topic.into();
        self
    }

    pub fn with_laser_frame(mut self, frame: impl Into<String>) -> Self {
        self.laser_frame = frame.into();
        self
    }

    pub fn with_wall_clock_topic(mut self, topic: impl Into<String>) -> Self {
        self.wall_clock_topic = topic.into();
        self
    }
}
