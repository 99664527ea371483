//! Collaborators backed by crossbeam channels.
//!
//! [`ChannelDevice`] turns a receiver of raw scans, e.g. the output of a
//! driver thread, into a [`LaserScannerDevice`]. [`ChannelBus`] is an
//! in-process bus with one bounded queue per topic.

use crate::bus::{MessageBus, ScanSink, Subscription, WallClockListener};
use crate::device::{LaserScannerDevice, ScanListener};
use crate::error::{LaserScanError, PublishFailure};
use crate::listener_thread::ListenerThread;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use laser_scan_data::{DeviceConfiguration, RawScan, ScanRecord, Timestamp};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

pub struct ChannelDevice {
    configuration: DeviceConfiguration,
    scan_rx: Receiver<RawScan>,
    scan_thread: Option<ListenerThread>,
    released: bool,
}

impl ChannelDevice {
    pub fn new(configuration: DeviceConfiguration, scan_rx: Receiver<RawScan>) -> ChannelDevice {
        ChannelDevice {
            configuration,
            scan_rx,
            scan_thread: None,
            released: false,
        }
    }

    pub fn is_scanning(&self) -> bool {
        self.scan_thread
            .as_ref()
            .is_some_and(ListenerThread::is_running)
    }
}

impl LaserScannerDevice for ChannelDevice {
    fn configuration(&self) -> Result<DeviceConfiguration, LaserScanError> {
        Ok(self.configuration.clone())
    }

    fn start_scanning(&mut self, listener: ScanListener) -> Result<(), LaserScanError> {
        if self.released {
            return Err(LaserScanError::Device(
                "the device has been shut down".to_string(),
            ));
        }
        if self.scan_thread.is_some() {
            return Err(LaserScanError::Device("the device is already scanning".to_string()));
        }
        let thread = ListenerThread::spawn("laser-scan", self.scan_rx.clone(), listener)
            .map_err(|e| LaserScanError::Device(e.to_string()))?;
        self.scan_thread = Some(thread);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), LaserScanError> {
        if let Some(mut thread) = self.scan_thread.take() {
            thread.join();
        }
        self.released = true;
        Ok(())
    }
}

/// In-process message bus.
///
/// Every topic is a bounded queue created on first use. Records stay queued
/// until read through [`ChannelBus::scan_receiver`]; publishing onto a full
/// queue fails instead of blocking.
pub struct ChannelBus {
    capacity: usize,
    scan_topics: HashMap<String, (Sender<ScanRecord>, Receiver<ScanRecord>)>,
    wall_clock_topics: HashMap<String, (Sender<Timestamp>, Receiver<Timestamp>)>,
}

impl ChannelBus {
    pub fn new(capacity: usize) -> ChannelBus {
        ChannelBus {
            capacity,
            scan_topics: HashMap::new(),
            wall_clock_topics: HashMap::new(),
        }
    }

    /// Receiving end of a scan topic. Receivers of one topic share its
    /// queue, each record is read once.
    pub fn scan_receiver(&mut self, topic: &str) -> Receiver<ScanRecord> {
        let capacity = self.capacity;
        let (_, rx) = self
            .scan_topics
            .entry(topic.to_string())
            .or_insert_with(|| bounded(capacity));
        rx.clone()
    }

    /// Sending end of a wall clock topic.
    pub fn wall_clock_sender(&mut self, topic: &str) -> Sender<Timestamp> {
        let capacity = self.capacity;
        let (tx, _) = self
            .wall_clock_topics
            .entry(topic.to_string())
            .or_insert_with(|| bounded(capacity));
        tx.clone()
    }
}

impl MessageBus for ChannelBus {
    fn advertise(&mut self, topic: &str) -> Result<Arc<dyn ScanSink>, LaserScanError> {
        let capacity = self.capacity;
        let (tx, _) = self
            .scan_topics
            .entry(topic.to_string())
            .or_insert_with(|| bounded(capacity));
        debug!(topic, capacity, "advertised scan topic");
        Ok(Arc::new(ChannelSink {
            topic: topic.to_string(),
            record_tx: tx.clone(),
        }))
    }

    fn subscribe_wall_clock(
        &mut self,
        topic: &str,
        listener: WallClockListener,
    ) -> Result<Box<dyn Subscription>, LaserScanError> {
        let capacity = self.capacity;
        let (_, rx) = self
            .wall_clock_topics
            .entry(topic.to_string())
            .or_insert_with(|| bounded(capacity));
        let thread = ListenerThread::spawn("wall-clock", rx.clone(), listener).map_err(|e| {
            LaserScanError::Subscription {
                topic: topic.to_string(),
                reason: e.to_string(),
            }
        })?;
        debug!(topic, "subscribed to wall clock");
        Ok(Box::new(thread))
    }
}

pub struct ChannelSink {
    topic: String,
    record_tx: Sender<ScanRecord>,
}

impl ScanSink for ChannelSink {
    fn topic(&self) -> &str {
        &self.topic
    }

    fn publish(&self, record: ScanRecord) -> Result<(), LaserScanError> {
        self.record_tx.try_send(record).map_err(|e| {
            let reason = match e {
                TrySendError::Full(_) => PublishFailure::Full,
                TrySendError::Disconnected(_) => PublishFailure::Disconnected,
            };
            LaserScanError::Publish {
                topic: self.topic.clone(),
                reason,
            }
        })
    }
}

impl Subscription for ListenerThread {
    fn unsubscribe(&mut self) {
        self.join();
    }
}
