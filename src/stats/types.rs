/*!
 * Wake Lock Stats Types
 * Entry and key types shared by the store and the kernel bridge
 */

use crate::core::types::{DurationMs, Pid, TimestampMs, KERNEL_PID};
use serde::{Deserialize, Serialize};

/// Key identifying a native wake lock entry
///
/// Kernel entries are keyed by name alone and never stored, so they have
/// no key.
pub type WakeLockKey = (String, Pid);

/// Statistics for a single wake lock, native or kernel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct WakeLockInfo {
    /// Wake lock identifier
    pub name: String,
    /// Owning process; [`KERNEL_PID`] for kernel wake locks
    pub pid: Pid,
    /// Discriminates the two entry kinds
    pub is_kernel_wakelock: bool,
    /// True while the lock is currently held
    pub is_active: bool,
    /// Times activated (native) / external counter (kernel)
    pub active_count: i64,
    /// Time accumulated in the current active span; 0 after a release
    pub active_time: DurationMs,
    /// Cumulative held time across all completed spans
    pub total_time: DurationMs,
    /// Longest single active span observed
    pub max_time: DurationMs,
    /// Last time any duration field was rolled forward
    pub last_change: TimestampMs,
    pub event_count: i64,
    pub expire_count: i64,
    pub prevent_suspend_time: DurationMs,
    pub wakeup_count: i64,
}

impl WakeLockInfo {
    /// New native entry at its initial activation.
    ///
    /// A native entry only ever comes into existence when its lock is first
    /// acquired, so it starts active with one activation on the books.
    #[must_use]
    pub fn native(name: impl Into<String>, pid: Pid, now: TimestampMs) -> Self {
        Self {
            name: name.into(),
            pid,
            is_kernel_wakelock: false,
            is_active: true,
            active_count: 1,
            active_time: 0,
            total_time: 0,
            max_time: 0,
            last_change: now,
            event_count: 0,
            expire_count: 0,
            prevent_suspend_time: 0,
            wakeup_count: 0,
        }
    }

    /// New kernel entry with zeroed counters, to be populated from the
    /// external counter store.
    #[must_use]
    pub fn kernel(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pid: KERNEL_PID,
            is_kernel_wakelock: true,
            is_active: false,
            active_count: 0,
            active_time: 0,
            total_time: 0,
            max_time: 0,
            last_change: 0,
            event_count: 0,
            expire_count: 0,
            prevent_suspend_time: 0,
            wakeup_count: 0,
        }
    }

    /// Key of this entry in the native store
    #[must_use]
    pub fn key(&self) -> WakeLockKey {
        (self.name.clone(), self.pid)
    }
}
