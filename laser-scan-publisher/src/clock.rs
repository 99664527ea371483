use laser_scan_data::Timestamp;
use std::time::{SystemTime, UNIX_EPOCH};

/// Clock the wall clock offset is measured against.
pub trait LocalClock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Local system time since the Unix epoch.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl LocalClock for SystemClock {
    fn now(&self) -> Timestamp {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(d) => Timestamp::from_secs_nanos(d.as_secs() as i64, d.subsec_nanos()),
            // System clock set before 1970
            Err(e) => Timestamp::from_nanos(-(e.duration().as_nanos() as i64)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_after_epoch() {
        assert!(SystemClock.now().as_nanos() > 0);
    }
}
