use crate::bus::{MessageBus, ScanSink, Subscription};
use crate::clock::{LocalClock, SystemClock};
use crate::config::AdapterConfig;
use crate::convert::convert;
use crate::device::LaserScannerDevice;
use crate::error::LaserScanError;
use crate::offset_tracker::ClockOffsetTracker;
use laser_scan_data::{ClockOffset, DeviceConfiguration, RawScan};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::{error, info, trace, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdapterState {
    Created,
    Running,
    /// Stopped publishing after a scan it could not convert. Only
    /// `shutdown` is left to do.
    Failed,
    ShutDown,
}

#[derive(Debug, Default)]
struct PublishCounters {
    published: AtomicU64,
    failed: AtomicU64,
}

/// Everything a scan delivery needs, moved into the device's listener.
struct ScanPath {
    frame_id: String,
    configuration: DeviceConfiguration,
    tracker: Arc<ClockOffsetTracker>,
    sink: Arc<dyn ScanSink>,
    accepting: Arc<AtomicBool>,
    counters: Arc<PublishCounters>,
    fatal: Arc<OnceLock<LaserScanError>>,
}

impl ScanPath {
    fn on_scan(&self, scan: RawScan) {
        if !self.accepting.load(Ordering::Acquire) {
            trace!(timestamp_ms = scan.timestamp_ms, "adapter stopped, scan dropped");
            return;
        }
        if scan.ranges.len() < self.configuration.last_step {
            self.fail(LaserScanError::ScanTooShort {
                readings: scan.ranges.len(),
                last_step: self.configuration.last_step,
            });
            return;
        }
        let record = convert(&scan, &self.configuration, self.tracker.get(), &self.frame_id);
        match self.sink.publish(record) {
            Ok(()) => {
                self.counters.published.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                self.counters.failed.fetch_add(1, Ordering::Relaxed);
                warn!(topic = self.sink.topic(), error = %e, "failed to publish scan record");
            }
        }
    }

    fn fail(&self, e: LaserScanError) {
        self.accepting.store(false, Ordering::Release);
        error!(model = %self.configuration.model, error = %e, "laser scan adapter failed");
        // Only the first failure is kept
        let _ = self.fatal.set(e);
    }
}

/// Publishes the scans of a laser scanner with timestamps corrected onto the
/// wall clock.
///
/// The adapter starts in [`AdapterState::Created`]. [`Adapter::start`]
/// reads the device configuration, subscribes to wall clock corrections and
/// starts the device. A scan with fewer readings than the configured sector
/// moves it to [`AdapterState::Failed`]. [`Adapter::shutdown`] is terminal
/// and is also run on drop.
pub struct Adapter<D: LaserScannerDevice, B: MessageBus> {
    device: D,
    bus: B,
    config: AdapterConfig,
    clock: Arc<dyn LocalClock>,
    tracker: Arc<ClockOffsetTracker>,
    accepting: Arc<AtomicBool>,
    counters: Arc<PublishCounters>,
    fatal: Arc<OnceLock<LaserScanError>>,
    state: AdapterState,
    configuration: Option<DeviceConfiguration>,
    clock_subscription: Option<Box<dyn Subscription>>,
}

impl<D: LaserScannerDevice, B: MessageBus> Adapter<D, B> {
    pub fn new(device: D, bus: B, config: AdapterConfig) -> Adapter<D, B> {
        Adapter::with_clock(device, bus, config, Arc::new(SystemClock))
    }

    /// Like [`Adapter::new`], measuring wall clock offsets against `clock`.
    pub fn with_clock(
        device: D,
        bus: B,
        config: AdapterConfig,
        clock: Arc<dyn LocalClock>,
    ) -> Adapter<D, B> {
        Adapter {
            device,
            bus,
            config,
            clock,
            tracker: Arc::new(ClockOffsetTracker::new()),
            accepting: Arc::new(AtomicBool::new(true)),
            counters: Arc::new(PublishCounters::default()),
            fatal: Arc::new(OnceLock::new()),
            state: AdapterState::Created,
            configuration: None,
            clock_subscription: None,
        }
    }

    pub fn start(&mut self) -> Result<(), LaserScanError> {
        if self.state != AdapterState::Created {
            return Err(LaserScanError::IllegalState {
                operation: "start",
                state: self.state(),
            });
        }

        let configuration = self.device.configuration()?;
        configuration.validate()?;

        let sink = self.bus.advertise(&self.config.laser_topic)?;

        let tracker = Arc::clone(&self.tracker);
        let clock = Arc::clone(&self.clock);
        let accepting = Arc::clone(&self.accepting);
        let mut clock_subscription = self.bus.subscribe_wall_clock(
            &self.config.wall_clock_topic,
            Box::new(move |wall| {
                if accepting.load(Ordering::Acquire) {
                    tracker.apply_wall_clock(wall, clock.now());
                }
            }),
        )?;

        let scan_path = ScanPath {
            frame_id: self.config.laser_frame.clone(),
            configuration: configuration.clone(),
            tracker: Arc::clone(&self.tracker),
            sink,
            accepting: Arc::clone(&self.accepting),
            counters: Arc::clone(&self.counters),
            fatal: Arc::clone(&self.fatal),
        };
        if let Err(e) = self
            .device
            .start_scanning(Box::new(move |scan| scan_path.on_scan(scan)))
        {
            clock_subscription.unsubscribe();
            return Err(e);
        }

        info!(
            topic = %self.config.laser_topic,
            frame = %self.config.laser_frame,
            model = %configuration.model,
            first_step = configuration.first_step,
            last_step = configuration.last_step,
            "laser scan adapter started"
        );
        self.clock_subscription = Some(clock_subscription);
        self.configuration = Some(configuration);
        self.state = AdapterState::Running;
        Ok(())
    }

    /// Stops publishing and releases the device. Only the first call has an
    /// effect. A scan being converted while this runs is still published.
    pub fn shutdown(&mut self) {
        if self.state == AdapterState::ShutDown {
            return;
        }
        self.accepting.store(false, Ordering::Release);

        if let Some(mut subscription) = self.clock_subscription.take() {
            subscription.unsubscribe();
        }
        if let Err(e) = self.device.shutdown() {
            warn!(error = %e, "failed to release the laser scanner");
        }

        let previous = self.state();
        self.state = AdapterState::ShutDown;
        info!(
            from = ?previous,
            published = self.published_count(),
            failed = self.failed_publish_count(),
            "laser scan adapter shut down"
        );
    }

    pub fn state(&self) -> AdapterState {
        if self.state == AdapterState::Running && self.fatal.get().is_some() {
            return AdapterState::Failed;
        }
        self.state
    }

    /// Error that stopped a running adapter, if any.
    pub fn fatal_error(&self) -> Option<&LaserScanError> {
        self.fatal.get()
    }

    /// Offset currently applied to device timestamps.
    pub fn clock_offset(&self) -> ClockOffset {
        self.tracker.get()
    }

    /// Device configuration read by `start`.
    pub fn configuration(&self) -> Option<&DeviceConfiguration> {
        self.configuration.as_ref()
    }

    pub fn published_count(&self) -> u64 {
        self.counters.published.load(Ordering::Relaxed)
    }

    pub fn failed_publish_count(&self) -> u64 {
        self.counters.failed.load(Ordering::Relaxed)
    }
}

impl<D: LaserScannerDevice, B: MessageBus> Drop for Adapter<D, B> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
