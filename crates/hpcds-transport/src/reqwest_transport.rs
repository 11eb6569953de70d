use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::redirect::Policy;

use crate::{BlockTransport, HttpMethod, HttpResponse, TransportError};

/// Default per-request timeout.
///
/// The session handshake and block reads/writes are all short-lived
/// request/response exchanges; a dataset server that hangs this long is
/// treated as unreachable rather than waited on indefinitely.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Production [`BlockTransport`] over a pooled [`reqwest::blocking::Client`].
///
/// Redirects are disabled at the client level: the session handshake needs
/// the raw `3xx` status and `Location` header of the *first* response, not
/// whatever `reqwest` would follow them to.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds a transport with the default timeout and no automatic
    /// redirect following.
    ///
    /// # Panics
    /// Panics if the underlying TLS backend fails to initialize, mirroring
    /// `reqwest::blocking::Client::new`.
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Builds a transport with a caller-chosen request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(timeout)
            .build()
            .expect("reqwest client failed to initialize");
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockTransport for ReqwestTransport {
    fn request(
        &self,
        url: &str,
        method: HttpMethod,
        body: Option<&[u8]>,
        headers: &[(String, String)],
    ) -> Result<HttpResponse, TransportError> {
        let mut builder = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
        };
        for (name, value) in headers {
            builder = builder.header(name, value);
        }
        if let Some(bytes) = body {
            builder = builder.body(bytes.to_vec());
        }

        let response = builder.send().map_err(map_send_error)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response
            .bytes()
            .map_err(|_| TransportError::UnexpectedEof)?
            .to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn map_send_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::ConnectFailed(err.to_string())
    } else {
        TransportError::ProtocolError(err.to_string())
    }
}
