/*!
 * Request inspection
 *
 * Responsibility:
 * - Capture an inbound request once into an immutable `RequestSnapshot`
 * - Optional diagnostic dump through a `DiagnosticSink` (best-effort)
 */

mod cookies;
mod inspector;
mod sink;
mod snapshot;

pub use inspector::{Diagnostics, RequestInspector};
pub use sink::{DiagnosticSink, SinkError, TracingSink};
pub use snapshot::{ClientAddr, RequestSnapshot};
