use crate::constants::{TERMINATOR_CHANNEL_SIZE, TERMINATOR_POLL_INTERVAL_MS};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, warn};

/// Thread that hands every message of a channel to a listener until it is
/// joined or the channel disconnects.
pub struct ListenerThread {
    name: String,
    terminator_tx: Sender<bool>,
    thread: Option<JoinHandle<()>>,
}

impl ListenerThread {
    pub fn spawn<T, F>(
        name: &str,
        data_rx: Receiver<T>,
        listener: F,
    ) -> std::io::Result<ListenerThread>
    where
        T: Send + 'static,
        F: FnMut(T) + Send + 'static,
    {
        let (terminator_tx, terminator_rx) = bounded(TERMINATOR_CHANNEL_SIZE);
        let thread_name = name.to_string();
        let thread = std::thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                forward_messages(data_rx, terminator_rx, listener);
                debug!(thread = %thread_name, "listener thread finished");
            })?;

        Ok(ListenerThread {
            name: name.to_string(),
            terminator_tx,
            thread: Some(thread),
        })
    }

    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|thread| !thread.is_finished())
    }

    /// Stops the thread and waits for it. A message being handled when this
    /// is called is handled to the end.
    /// This function is automatically called when the `ListenerThread` is dropped.
    pub fn join(&mut self) {
        let thread = match self.thread.take() {
            Some(thread) => thread,
            None => return,
        };
        // Fails only if the thread already returned
        let _ = self.terminator_tx.send(true);
        if thread.join().is_err() {
            warn!(thread = %self.name, "listener thread panicked");
        }
    }
}

impl Drop for ListenerThread {
    fn drop(&mut self) {
        self.join();
    }
}

fn forward_messages<T, F>(data_rx: Receiver<T>, terminator_rx: Receiver<bool>, mut listener: F)
where
    F: FnMut(T),
{
    let timeout = Duration::from_millis(TERMINATOR_POLL_INTERVAL_MS);
    while !do_terminate(&terminator_rx) {
        match data_rx.recv_timeout(timeout) {
            Ok(data) => listener(data),
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => return,
        }
    }
}

pub(crate) fn do_terminate(terminator_rx: &Receiver<bool>) -> bool {
    terminator_rx.try_recv().unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn test_forwards_in_order() {
        let (data_tx, data_rx) = unbounded::<u32>();
        let (out_tx, out_rx) = unbounded::<u32>();
        let mut thread = ListenerThread::spawn("test-listener", data_rx, move |v| {
            out_tx.send(v * 2).unwrap();
        })
        .unwrap();

        for v in 0..5 {
            data_tx.send(v).unwrap();
        }
        let received: Vec<u32> = (0..5)
            .map(|_| out_rx.recv_timeout(Duration::from_secs(1)).unwrap())
            .collect();
        assert_eq!(received, vec![0, 2, 4, 6, 8]);

        thread.join();
        assert!(!thread.is_running());
        // Joining again is harmless
        thread.join();
    }

    #[test]
    fn test_join_stops_idle_thread() {
        let (_data_tx, data_rx) = unbounded::<u32>();
        let mut thread = ListenerThread::spawn("test-idle", data_rx, |_| {}).unwrap();
        assert!(thread.is_running());
        thread.join();
        assert!(!thread.is_running());
    }

    #[test]
    fn test_exits_when_source_disconnects() {
        let (data_tx, data_rx) = unbounded::<u32>();
        let thread = ListenerThread::spawn("test-disconnect", data_rx, |_| {}).unwrap();
        drop(data_tx);
        for _ in 0..100 {
            if !thread.is_running() {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        assert!(!thread.is_running());
        drop(thread);
    }

    #[test]
    fn test_do_terminate() {
        let (tx, rx) = bounded(1);
        assert!(!do_terminate(&rx));
        tx.send(true).unwrap();
        assert!(do_terminate(&rx));
    }
}
