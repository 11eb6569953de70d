use hpcds_core::{DatasetProperties, parse_properties};
use hpcds_transport::{BlockTransport, HttpMethod};

use crate::ClientError;

/// Fetches and parses the metadata document at `dataset_url`.
///
/// Per the metadata document contract, a non-200 status is logged rather
/// than treated as a hard failure — the body, if any, is still handed to
/// the parser so a server that returns a body alongside an unusual status
/// doesn't block the caller from at least inspecting it.
///
/// # Errors
/// Returns [`ClientError::Transport`] for connection failures and
/// [`ClientError::Core`] when the body is not valid JSON.
pub fn fetch_properties(
    transport: &dyn BlockTransport,
    dataset_url: &str,
) -> Result<DatasetProperties, ClientError> {
    let response = transport.request(dataset_url, HttpMethod::Get, None, &[])?;
    if response.status != 200 {
        log::warn!(
            "metadata fetch for {dataset_url} returned status {}",
            response.status
        );
    }
    let body = String::from_utf8_lossy(&response.body);
    Ok(parse_properties(&body)?)
}
