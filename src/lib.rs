/*!
 * Suspend Stats Library
 * Wake lock statistics engine for a power-management service
 *
 * Tracks user-space ("native") wake locks in a bounded, recency-ordered
 * store and merges in live kernel wake lock counters read on demand from a
 * sysfs-style counter store.
 */

pub mod core;
pub mod kernel;
pub mod monitoring;
pub mod stats;

// Re-exports
pub use crate::core::{now_ms, DurationMs, Pid, TimestampMs, KERNEL_PID};
pub use kernel::{KernelStatsSource, SourceError, SysfsStatsSource};
pub use monitoring::{CollectingSink, DiagnosticSink, LogSink, Payload, Severity, StatsEvent};
pub use stats::{WakeLockInfo, WakeLockKey, WakeLockTracker};
