#![warn(missing_docs)]
//! # hpcds-transport
//!
//! ## Purpose
//! The blocking HTTP transport adapter: one trait, [`BlockTransport`], and
//! one production implementation, [`ReqwestTransport`], used by
//! `hpcds-session` for the handshake and by `hpcds-client` for every block
//! read and write.
//!
//! ## Responsibilities
//! - Issue GET/POST requests and return status, headers, and body bytes.
//! - Leave redirect handling to the caller — the session handshake needs
//!   the raw `Location` header of a `3xx` response.
//! - Translate transport-level failures (connect, timeout, framing) into
//!   [`TransportError`] without retrying.
//!
//! ## Data flow
//! Higher layers hold a `&dyn BlockTransport` (or a generic `T:
//! BlockTransport`) and never touch `reqwest` directly, so tests can swap in
//! an in-memory fake transport with no network involved.
//!
//! ## Ownership and lifetimes
//! [`ReqwestTransport`] owns a pooled `reqwest::blocking::Client` and is
//! cheap to share behind an `Arc` across a single-threaded call sequence.
//!
//! ## Error model
//! [`TransportError`] covers connection failure, timeout, and protocol
//! errors. It never wraps a successfully-received HTTP status; a `404` or
//! `500` response is `Ok(HttpResponse { status: 404 | 500, .. })`.

mod error;
mod reqwest_transport;
mod transport;

pub use error::TransportError;
pub use reqwest_transport::ReqwestTransport;
pub use transport::{BlockTransport, HttpMethod, HttpResponse};
