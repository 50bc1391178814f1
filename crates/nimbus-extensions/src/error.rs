//! Decode errors for payloads crossing the process boundary.

use thiserror::Error;

/// Failure to decode a JSON payload received from the main process.
///
/// The reducer and the icon resolver are total; decoding the inbound
/// envelopes is the only fallible surface of this crate.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// An action envelope failed to parse.
    #[error("malformed action envelope: {source}")]
    Action {
        #[source]
        source: serde_json::Error,
    },

    /// An extension record failed to parse.
    #[error("malformed extension record: {source}")]
    Extension {
        #[source]
        source: serde_json::Error,
    },
}
