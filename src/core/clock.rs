/*!
 * Clock
 * Wall-clock helper shared with the embedding service
 */

use super::types::TimestampMs;
use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time in milliseconds since the Unix epoch.
///
/// Collaborators sample this once per lifecycle event and pass the result
/// into the tracker, so that a single event is timestamped consistently
/// across the service's own bookkeeping and the statistics engine.
#[must_use]
pub fn now_ms() -> TimestampMs {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as TimestampMs)
        .unwrap_or(0)
}
