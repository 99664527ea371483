use crate::adapter::AdapterState;
use laser_scan_data::ConfigurationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaserScanError {
    #[error("Cannot {operation} while the adapter is {state:?}.")]
    IllegalState {
        operation: &'static str,
        state: AdapterState,
    },
    #[error("Invalid device configuration. {0}")]
    InvalidConfiguration(#[from] ConfigurationError),
    #[error("Device error: {0}")]
    Device(String),
    #[error("Failed to subscribe to \"{topic}\": {reason}")]
    Subscription { topic: String, reason: String },
    #[error("Failed to publish on \"{topic}\": {reason}")]
    Publish {
        topic: String,
        reason: PublishFailure,
    },
    #[error("Scan holds {readings} readings but the sector ends at step {last_step}.")]
    ScanTooShort { readings: usize, last_step: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PublishFailure {
    #[error("the topic queue is full")]
    Full,
    #[error("no subscriber is connected")]
    Disconnected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = LaserScanError::IllegalState {
            operation: "start",
            state: AdapterState::Running,
        };
        assert_eq!(err.to_string(), "Cannot start while the adapter is Running.");

        let err = LaserScanError::Publish {
            topic: "laser".to_string(),
            reason: PublishFailure::Full,
        };
        assert_eq!(
            err.to_string(),
            "Failed to publish on \"laser\": the topic queue is full"
        );

        let err = LaserScanError::ScanTooShort {
            readings: 700,
            last_step: 725,
        };
        assert_eq!(
            err.to_string(),
            "Scan holds 700 readings but the sector ends at step 725."
        );
    }

    #[test]
    fn test_from_configuration_error() {
        let err: LaserScanError = ConfigurationError::SectorOutOfRange {
            last_step: 800,
            total_steps: 768,
        }
        .into();
        assert!(matches!(
            err,
            LaserScanError::InvalidConfiguration(ConfigurationError::SectorOutOfRange { .. })
        ));
        assert!(err.to_string().contains("768"));
    }
}
