/*!
 * Kernel Stats Reader
 * Materializes kernel wake lock counters into statistics entries
 *
 * Stateless per query: every read re-enumerates the counter store, so a
 * wake lock that appeared since the previous query is observed. Individual
 * read or parse failures default the affected field to zero and never
 * abort the remaining fields or wake locks.
 */

use super::source::KernelStatsSource;
use crate::monitoring::{DiagnosticSink, Payload, Severity, StatsEvent};
use crate::stats::WakeLockInfo;
use std::sync::Arc;

/// Sub-resource names that carry no per-counter data
const RESERVED_NAMES: [&str; 5] = [".", "..", "power", "subsystem", "uevent"];

/// Reads a live snapshot of kernel wake lock statistics from a counter
/// source
pub struct KernelStatsReader {
    source: Arc<dyn KernelStatsSource>,
}

impl KernelStatsReader {
    pub fn new(source: Arc<dyn KernelStatsSource>) -> Self {
        Self { source }
    }

    /// Snapshot of every kernel wake lock, in the source's listing order.
    ///
    /// An unenumerable root yields an empty snapshot; partial results are
    /// preferred over total failure.
    pub fn read_all(&self, sink: &dyn DiagnosticSink) -> Vec<WakeLockInfo> {
        let names = match self.source.list_wakelocks() {
            Ok(names) => names,
            Err(err) => {
                sink.report(StatsEvent::new(
                    Severity::Error,
                    Payload::KernelStatsUnavailable {
                        detail: err.to_string(),
                    },
                ));
                return Vec::new();
            }
        };

        names
            .into_iter()
            .filter(|name| name != "." && name != "..")
            .map(|name| self.read_entry(name, sink))
            .collect()
    }

    /// One kernel entry, populated field by field from its counter files
    fn read_entry(&self, name: String, sink: &dyn DiagnosticSink) -> WakeLockInfo {
        let mut info = WakeLockInfo::kernel(name);

        match self.source.list_stats(&info.name) {
            Ok(stats) => {
                for stat in stats {
                    if RESERVED_NAMES.contains(&stat.as_str()) {
                        continue;
                    }
                    self.read_stat_into(&mut info, &stat, sink);
                }
            }
            Err(err) => {
                sink.report(StatsEvent::new(
                    Severity::Error,
                    Payload::WakelockUnavailable {
                        wakelock: info.name.clone(),
                        detail: err.to_string(),
                    },
                ));
            }
        }

        // The counter store exposes no explicit activity flag.
        info.is_active = info.active_time > 0;
        info
    }

    fn read_stat_into(&self, info: &mut WakeLockInfo, stat: &str, sink: &dyn DiagnosticSink) {
        let raw = match self.source.read_stat(&info.name, stat) {
            Ok(raw) => raw,
            Err(err) => {
                sink.report(StatsEvent::new(
                    Severity::Error,
                    Payload::StatUnreadable {
                        wakelock: info.name.clone(),
                        stat: stat.to_string(),
                        detail: err.to_string(),
                    },
                ));
                return;
            }
        };

        let value: i64 = match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                sink.report(StatsEvent::new(
                    Severity::Error,
                    Payload::MalformedStat {
                        wakelock: info.name.clone(),
                        stat: stat.to_string(),
                        value: raw.trim().to_string(),
                    },
                ));
                return;
            }
        };

        match stat {
            "active_count" => info.active_count = value,
            "active_time_ms" => info.active_time = value,
            "event_count" => info.event_count = value,
            "expire_count" => info.expire_count = value,
            "last_change_ms" => info.last_change = value,
            "max_time_ms" => info.max_time = value,
            "prevent_suspend_time_ms" => info.prevent_suspend_time = value,
            "total_time_ms" => info.total_time = value,
            "wakeup_count" => info.wakeup_count = value,
            // Unrecognized counter names are ignored.
            _ => {}
        }
    }
}
