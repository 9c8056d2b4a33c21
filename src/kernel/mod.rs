/*!
 * Kernel Counter Bridge
 * On-demand kernel wake lock statistics from an external counter store
 */

mod reader;
mod source;

pub use reader::KernelStatsReader;
pub use source::{KernelStatsSource, SourceError, SourceResult, SysfsStatsSource};
