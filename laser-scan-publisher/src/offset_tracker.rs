use crossbeam_utils::atomic::AtomicCell;
use laser_scan_data::{ClockOffset, Timestamp};
use tracing::debug;

/// Offset from the local clock to the wall clock, shared between the
/// clock correction listener and the scan conversion path.
///
/// Reads and writes are single lock-free atomic operations, so a reader
/// observes either the previous or the new offset, never a mix of both.
#[derive(Debug, Default)]
pub struct ClockOffsetTracker {
    offset: AtomicCell<ClockOffset>,
}

impl ClockOffsetTracker {
    pub fn new() -> ClockOffsetTracker {
        ClockOffsetTracker {
            offset: AtomicCell::new(ClockOffset::ZERO),
        }
    }

    /// Replaces the stored offset.
    pub fn set(&self, offset: ClockOffset) {
        self.offset.store(offset);
    }

    /// Most recently stored offset, zero if none was stored.
    pub fn get(&self) -> ClockOffset {
        self.offset.load()
    }

    /// Stores `wall - local` and returns it.
    pub fn apply_wall_clock(&self, wall: Timestamp, local: Timestamp) -> ClockOffset {
        let offset = wall - local;
        self.set(offset);
        debug!(
            offset_ns = offset.as_nanos(),
            wall_ns = wall.as_nanos(),
            local_ns = local.as_nanos(),
            "wall clock offset updated"
        );
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_utils::thread;

    #[test]
    fn test_default_is_zero() {
        assert_eq!(ClockOffsetTracker::new().get(), ClockOffset::ZERO);
        assert_eq!(ClockOffsetTracker::default().get(), ClockOffset::ZERO);
    }

    #[test]
    fn test_set_replaces() {
        let tracker = ClockOffsetTracker::new();
        tracker.set(ClockOffset::from_millis(50));
        tracker.set(ClockOffset::from_millis(-20));
        assert_eq!(tracker.get(), ClockOffset::from_millis(-20));
    }

    #[test]
    fn test_apply_wall_clock() {
        let tracker = ClockOffsetTracker::new();
        let offset =
            tracker.apply_wall_clock(Timestamp::from_millis(1_000), Timestamp::from_millis(950));
        assert_eq!(offset, ClockOffset::from_millis(50));
        assert_eq!(tracker.get(), ClockOffset::from_millis(50));
    }

    #[test]
    fn test_lock_free() {
        assert!(AtomicCell::<ClockOffset>::is_lock_free());
    }

    #[test]
    fn test_concurrent_reads_never_torn() {
        // Both halves of every written value are identical, so a torn read
        // would show up as a value outside of {old, new}.
        let old = ClockOffset::from_nanos(0x1111_1111_1111_1111);
        let new = ClockOffset::from_nanos(0x2222_2222_2222_2222);
        let tracker = ClockOffsetTracker::new();
        tracker.set(old);

        thread::scope(|s| {
            s.spawn(|_| {
                for i in 0..10_000 {
                    tracker.set(if i % 2 == 0 { new } else { old });
                }
                tracker.set(new);
            });
            for _ in 0..4 {
                s.spawn(|_| {
                    for _ in 0..10_000 {
                        let offset = tracker.get();
                        assert!(offset == old || offset == new, "torn read {:?}", offset);
                    }
                });
            }
        })
        .unwrap();

        assert_eq!(tracker.get(), new);
    }
}
