/*!
 * Core Module
 * Fundamental types and time helpers
 */

pub mod clock;
pub mod types;

// Re-export for convenience
pub use clock::now_ms;
pub use types::*;
