use crate::TransportError;

/// HTTP method used by a [`BlockTransport::request`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// Used for metadata, session handshake, and block reads.
    Get,
    /// Used for block writes, with an `application/octet-stream` body.
    Post,
}

/// The response to one successfully-completed HTTP request.
///
/// "Successfully completed" means a status line and headers were received;
/// the status itself may be anything (2xx, 3xx, 4xx, 5xx) and is always
/// surfaced here rather than turned into an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers, in the order received. Header names are compared
    /// case-insensitively by [`HttpResponse::header`].
    pub headers: Vec<(String, String)>,
    /// Raw response body bytes.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Looks up a header value by case-insensitive name, returning the
    /// first match.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Black-box HTTP request/response service.
///
/// This is the entire transport surface `hpcds-session` and `hpcds-client`
/// depend on: one blocking call that issues a request and returns its
/// status, headers, and body bytes. There is no connection pooling
/// contract, no retry, and redirects are never followed automatically —
/// callers that need the `Location` header (the session handshake) read it
/// off the returned [`HttpResponse`] themselves.
pub trait BlockTransport: Send + Sync {
    /// Issues one HTTP request and blocks until the full response body has
    /// been received.
    ///
    /// # Errors
    /// Returns [`TransportError`] for connection, timeout, or protocol
    /// failures. A response that was fully received, regardless of its
    /// status code, is always `Ok`.
    fn request(
        &self,
        url: &str,
        method: HttpMethod,
        body: Option<&[u8]>,
        headers: &[(String, String)],
    ) -> Result<HttpResponse, TransportError>;
}
