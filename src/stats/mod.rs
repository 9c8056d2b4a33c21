/*!
 * Wake Lock Statistics
 * Bounded native entry store and the guarded tracking engine
 */

mod store;
mod tracker;
mod types;

pub use tracker::WakeLockTracker;
pub use types::{WakeLockInfo, WakeLockKey};
