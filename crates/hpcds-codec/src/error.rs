use thiserror::Error;

/// Errors produced by block payload encode/decode.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The payload was smaller than its declared header or voxel volume.
    #[error("short block payload: expected at least {expected} bytes, got {got}")]
    ShortPayload {
        /// Minimum byte length the payload needed to be.
        expected: usize,
        /// Actual byte length received.
        got: usize,
    },
}
