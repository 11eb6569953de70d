use thiserror::Error;

use hpcds_transport::TransportError;

/// Failure to obtain a session URL for a `(dataset, resolution, version)`
/// tuple.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The transport layer failed before a response was received.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The handshake response carried no `Location` header.
    #[error("session handshake returned no Location header")]
    NoSessionUrl,
}
