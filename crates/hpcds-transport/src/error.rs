use thiserror::Error;

/// Network/protocol-layer failure from one [`crate::BlockTransport::request`]
/// call.
///
/// The status code of a *successful* response is never wrapped in this
/// error — per the transport adapter's contract, any status the server
/// actually returns is surfaced to the caller as data, not as a failure.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The underlying connection could not be established.
    #[error("connect failed: {0}")]
    ConnectFailed(String),
    /// The request timed out waiting for a response.
    #[error("request timed out")]
    Timeout,
    /// The server's response violated HTTP framing in some way.
    #[error("protocol error: {0}")]
    ProtocolError(String),
    /// The connection closed before a complete response body was received.
    #[error("unexpected end of stream")]
    UnexpectedEof,
}
