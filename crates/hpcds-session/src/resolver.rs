use hpcds_transport::{BlockTransport, HttpMethod};

use crate::SessionError;

/// Resolves the session URL for a `(datasetUrl, resolution, version)`
/// read-write endpoint.
///
/// Builds `"{dataset_url}/{rx}/{ry}/{rz}/{version}/read-write"`, issues a
/// GET, and expects a `307` carrying the session URL in `Location`. Any
/// other status is logged as a warning but the `Location` header, if
/// present, is still honored — the server may use a non-307 redirect
/// convention and withholding the session URL over a status mismatch would
/// only break callers that would otherwise work. A trailing slash on the
/// returned URL is trimmed before use, since every subsequent block request
/// appends its own leading-slash suffix.
///
/// # Errors
/// Returns [`SessionError::Transport`] for connection/protocol failures and
/// [`SessionError::NoSessionUrl`] when no `Location` header is present.
pub fn resolve_session_url(
    transport: &dyn BlockTransport,
    dataset_url: &str,
    resolution: (i32, i32, i32),
    version: i32,
) -> Result<String, SessionError> {
    let (rx, ry, rz) = resolution;
    let handshake_url =
        format!("{dataset_url}/{rx}/{ry}/{rz}/{version}/read-write");

    let response = transport.request(&handshake_url, HttpMethod::Get, None, &[])?;

    if response.status != 307 {
        log::warn!(
            "session handshake for {handshake_url} returned status {}, expected 307",
            response.status
        );
    }

    let location = response.header("Location").ok_or(SessionError::NoSessionUrl)?;
    Ok(location.trim_end_matches('/').to_string())
}
