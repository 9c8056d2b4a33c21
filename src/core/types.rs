/*!
 * Core Types
 * Common types used across the statistics engine
 */

/// Process ID type
///
/// Signed because kernel-owned wake locks have no owning process and are
/// reported with [`KERNEL_PID`].
pub type Pid = i32;

/// Wall-clock timestamp in milliseconds since the Unix epoch
pub type TimestampMs = i64;

/// Duration in milliseconds
///
/// Signed to match the counter-store field width; callers that supply
/// out-of-order timestamps observe negative deltas rather than a panic.
pub type DurationMs = i64;

/// Sentinel PID reported for kernel wake locks
pub const KERNEL_PID: Pid = -1;
