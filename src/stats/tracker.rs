/*!
 * Wake Lock Tracker
 * Guarded statistics engine: lifecycle updates, time accumulation, and the
 * merged native + kernel query
 */

use super::store::EntryStore;
use super::types::WakeLockInfo;
use crate::core::clock::now_ms;
use crate::core::types::{Pid, TimestampMs};
use crate::kernel::{KernelStatsReader, KernelStatsSource};
use crate::monitoring::{DiagnosticSink, LogSink, Payload, Severity, StatsEvent};
use log::info;
use parking_lot::Mutex;
use std::sync::Arc;

/// Tracks live wake lock statistics for a power-management service.
///
/// Native entries live in a bounded LRU store behind a single mutex; kernel
/// entries are materialized fresh from the counter source on every query.
/// All operations are best-effort: recoverable conditions are reported
/// through the diagnostic sink and never fail the caller.
pub struct WakeLockTracker {
    stats: Mutex<EntryStore>,
    kernel: KernelStatsReader,
    sink: Arc<dyn DiagnosticSink>,
}

impl WakeLockTracker {
    /// Create a tracker with the default log-backed diagnostic sink.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize, source: Arc<dyn KernelStatsSource>) -> Self {
        Self::with_sink(capacity, source, Arc::new(LogSink))
    }

    /// Create a tracker with an injected diagnostic sink.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_sink(
        capacity: usize,
        source: Arc<dyn KernelStatsSource>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        assert!(capacity > 0, "wake lock stats capacity must be positive");
        info!("Wake lock tracker initialized: capacity {}", capacity);
        Self {
            stats: Mutex::new(EntryStore::new(capacity)),
            kernel: KernelStatsReader::new(source),
            sink,
        }
    }

    /// Record an acquire event, creating or promoting the entry.
    ///
    /// A repeated acquire without an intervening release increments the
    /// activation count and restarts the active-span clock without folding
    /// the open span into the totals; only a release closes a span.
    pub fn on_acquire(&self, name: &str, pid: Pid, now: TimestampMs) {
        let key = (name.to_string(), pid);
        let mut stats = self.stats.lock();

        match stats.remove(&key) {
            None => {
                stats.evict_if_full(self.sink.as_ref());
                stats.insert_front(WakeLockInfo::native(name, pid, now));
            }
            Some(mut entry) => {
                entry.is_active = true;
                entry.active_time = 0;
                entry.active_count += 1;
                entry.last_change = now;
                stats.insert_front(entry);
            }
        }
    }

    /// Record a release event, closing the active span and promoting the
    /// entry. A release for an unknown key changes nothing; the entry was
    /// most likely evicted.
    pub fn on_release(&self, name: &str, pid: Pid, now: TimestampMs) {
        let key = (name.to_string(), pid);
        let mut stats = self.stats.lock();

        match stats.remove(&key) {
            None => {
                self.sink.report(StatsEvent::new(
                    Severity::Info,
                    Payload::ReleaseWithoutEntry {
                        name: name.to_string(),
                        pid,
                    },
                ));
            }
            Some(mut entry) => {
                let delta = now - entry.last_change;
                entry.is_active = false;
                entry.active_time += delta;
                entry.max_time = entry.max_time.max(entry.active_time);
                entry.active_time = 0;
                entry.total_time += delta;
                entry.last_change = now;
                stats.insert_front(entry);
            }
        }
    }

    /// Roll the active duration of every active entry forward to `now`.
    ///
    /// The suspend service calls this right before the system suspends so
    /// the stored durations are accurate without a lifecycle event.
    pub fn update_now(&self, now: TimestampMs) {
        self.stats.lock().roll_forward(now);
    }

    /// Merged snapshot: native entries in recency order, then kernel
    /// entries in the counter source's listing order.
    ///
    /// Native durations are rolled forward to the wall clock first, so the
    /// result reflects true elapsed time rather than the time of the last
    /// lifecycle event.
    pub fn get_stats(&self) -> Vec<WakeLockInfo> {
        self.get_stats_at(now_ms())
    }

    /// [`get_stats`](Self::get_stats) with a caller-supplied query time,
    /// for services that timestamp their own event log.
    ///
    /// The store mutex is released before the counter source is touched;
    /// kernel reads block only the querying thread.
    pub fn get_stats_at(&self, now: TimestampMs) -> Vec<WakeLockInfo> {
        let mut entries = {
            let mut stats = self.stats.lock();
            stats.roll_forward(now);
            stats.snapshot()
        };
        entries.extend(self.kernel.read_all(self.sink.as_ref()));
        entries
    }

    /// Number of native entries currently stored
    pub fn len(&self) -> usize {
        self.stats.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured native entry capacity
    pub fn capacity(&self) -> usize {
        self.stats.lock().capacity()
    }
}
