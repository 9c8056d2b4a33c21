/*!
 * Monitoring
 * Diagnostic event reporting for the statistics engine
 */

mod events;

pub use events::{CollectingSink, DiagnosticSink, LogSink, Payload, Severity, StatsEvent};
