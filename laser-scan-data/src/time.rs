#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

const NANOS_PER_MILLI: i64 = 1_000_000;
const NANOS_PER_SEC: i64 = 1_000_000_000;

/// Instant in nanoseconds relative to the clock's epoch.
///
/// Device timestamps count from the device's own epoch, corrected ones from
/// the Unix epoch of the wall clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timestamp {
    nanos: i64,
}

impl Timestamp {
    pub const fn from_nanos(nanos: i64) -> Timestamp {
        Timestamp { nanos }
    }

    pub const fn from_millis(millis: i64) -> Timestamp {
        Timestamp {
            nanos: millis.saturating_mul(NANOS_PER_MILLI),
        }
    }

    pub const fn from_secs_nanos(secs: i64, nanos: u32) -> Timestamp {
        Timestamp {
            nanos: secs
                .saturating_mul(NANOS_PER_SEC)
                .saturating_add(nanos as i64),
        }
    }

    pub const fn as_nanos(self) -> i64 {
        self.nanos
    }

    pub const fn as_millis(self) -> i64 {
        self.nanos.div_euclid(NANOS_PER_MILLI)
    }

    /// Whole seconds, rounded towards negative infinity.
    pub const fn secs(self) -> i64 {
        self.nanos.div_euclid(NANOS_PER_SEC)
    }

    /// Nanoseconds past `secs()`, always in `0..1_000_000_000`.
    pub const fn subsec_nanos(self) -> u32 {
        self.nanos.rem_euclid(NANOS_PER_SEC) as u32
    }

    pub fn as_secs_f64(self) -> f64 {
        self.nanos as f64 / NANOS_PER_SEC as f64
    }
}

impl Add<ClockOffset> for Timestamp {
    type Output = Timestamp;

    fn add(self, offset: ClockOffset) -> Timestamp {
        Timestamp {
            nanos: self.nanos.saturating_add(offset.nanos),
        }
    }
}

impl Sub<Timestamp> for Timestamp {
    type Output = ClockOffset;

    fn sub(self, other: Timestamp) -> ClockOffset {
        ClockOffset {
            nanos: self.nanos.saturating_sub(other.nanos),
        }
    }
}

/// Signed correction from a local clock to the wall clock.
///
/// Zero by default, i.e. both clocks are assumed to agree until a correction
/// arrives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(transparent)]
pub struct ClockOffset {
    nanos: i64,
}

impl ClockOffset {
    pub const ZERO: ClockOffset = ClockOffset { nanos: 0 };

    pub const fn from_nanos(nanos: i64) -> ClockOffset {
        ClockOffset { nanos }
    }

    pub const fn from_millis(millis: i64) -> ClockOffset {
        ClockOffset {
            nanos: millis.saturating_mul(NANOS_PER_MILLI),
        }
    }

    pub const fn as_nanos(self) -> i64 {
        self.nanos
    }

    pub const fn is_zero(self) -> bool {
        self.nanos == 0
    }
}
