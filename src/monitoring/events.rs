/*!
 * Diagnostic Events
 * Strongly-typed diagnostics emitted by the statistics engine
 *
 * The engine never fails an operation over a recoverable condition; it
 * reports the condition through an injectable sink and carries on with
 * best-effort data.
 */

use crate::core::types::Pid;
use log::{error, info, warn};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Event severity for filtering and alerting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Severity {
    Info = 0,
    Warn = 1,
    Error = 2,
}

/// Event payload - strongly typed variants for each reportable condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload {
    /// The bounded store hit capacity and dropped its least-recently-used
    /// entry to make room.
    EntryEvicted { name: String, pid: Pid },

    /// A release arrived for a key with no stored entry, most likely
    /// because the entry was evicted earlier.
    ReleaseWithoutEntry { name: String, pid: Pid },

    /// The kernel counter-store root could not be enumerated; the kernel
    /// portion of the snapshot is empty.
    KernelStatsUnavailable { detail: String },

    /// One kernel wake lock's counter directory could not be enumerated;
    /// its entry carries zero defaults.
    WakelockUnavailable { wakelock: String, detail: String },

    /// One counter field could not be read; the field keeps its zero
    /// default.
    StatUnreadable {
        wakelock: String,
        stat: String,
        detail: String,
    },

    /// One counter field was readable but not an integer; the field keeps
    /// its zero default.
    MalformedStat {
        wakelock: String,
        stat: String,
        value: String,
    },
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EntryEvicted { name, pid } => write!(
                f,
                "wake lock stats at capacity, evicted \"{}\" (pid {}); consider adjusting capacity",
                name, pid
            ),
            Self::ReleaseWithoutEntry { name, pid } => write!(
                f,
                "no stats entry for \"{}\" (pid {}) on release; most likely evicted",
                name, pid
            ),
            Self::KernelStatsUnavailable { detail } => {
                write!(f, "failed to enumerate kernel wake lock stats: {}", detail)
            }
            Self::WakelockUnavailable { wakelock, detail } => {
                write!(f, "failed to open kernel wake lock \"{}\": {}", wakelock, detail)
            }
            Self::StatUnreadable {
                wakelock,
                stat,
                detail,
            } => write!(
                f,
                "failed to read {} for wake lock \"{}\": {}",
                stat, wakelock, detail
            ),
            Self::MalformedStat {
                wakelock,
                stat,
                value,
            } => write!(
                f,
                "non-numeric {} for wake lock \"{}\": {:?}",
                stat, wakelock, value
            ),
        }
    }
}

/// A diagnostic event: severity plus typed payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsEvent {
    pub severity: Severity,
    pub payload: Payload,
}

impl StatsEvent {
    #[must_use]
    pub fn new(severity: Severity, payload: Payload) -> Self {
        Self { severity, payload }
    }
}

/// Sink for diagnostic events
///
/// Injected at tracker construction so the embedding service (or a test)
/// decides where reports go.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, event: StatsEvent);
}

/// Default sink: forwards events to the `log` facade at their severity
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, event: StatsEvent) {
        match event.severity {
            Severity::Info => info!("{}", event.payload),
            Severity::Warn => warn!("{}", event.payload),
            Severity::Error => error!("{}", event.payload),
        }
    }
}

/// Recording sink for assertions on emitted diagnostics
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<StatsEvent>>,
}

impl CollectingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events reported so far
    #[must_use]
    pub fn events(&self) -> Vec<StatsEvent> {
        self.events.lock().clone()
    }

    /// Count of events matching a predicate
    pub fn count_matching(&self, pred: impl Fn(&StatsEvent) -> bool) -> usize {
        self.events.lock().iter().filter(|e| pred(e)).count()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, event: StatsEvent) {
        self.events.lock().push(event);
    }
}
