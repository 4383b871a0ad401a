//! Error types for layout, formatting, configuration, and overlay misuse.

use thiserror::Error;

/// Errors raised while encoding, decoding, or reconfiguring fixed-width
/// layouts.
///
/// Every operation is deterministic; failures are always reported to the
/// caller, never retried or swallowed. The one exception is unrecognized
/// layout-override keys, which are warned about and skipped (see
/// [`crate::overlay::OverlayGroup::from_map`]).
#[derive(Debug, Error)]
pub enum CodecError {
    /// Offset/length out of bounds against the input line, or required
    /// layout metadata (such as a date pattern) is missing.
    #[error("layout error for field '{field}': {message}")]
    Layout { field: String, message: String },

    /// A substring could not be parsed into its field value, or a value
    /// could not be rendered under its pattern. Aborts the enclosing
    /// decode/encode; there are no partial records.
    #[error("format error for field '{field}' on '{raw}': {message}")]
    Format {
        field: String,
        raw: String,
        message: String,
    },

    /// Invalid override input, rejected before any layout mutation.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Overlay apply/reset called out of sequence. Programmer error.
    #[error("overlay state error: {0}")]
    State(String),
}
