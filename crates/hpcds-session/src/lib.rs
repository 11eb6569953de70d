#![warn(missing_docs)]
//! # hpcds-session
//!
//! ## Purpose
//! Resolves the server-issued session URL for a `(dataset, resolution,
//! version)` tuple, which every subsequent block read or write is built on
//! top of.
//!
//! ## Responsibilities
//! - Build the session handshake URL.
//! - Issue the handshake request and extract the `Location` header.
//! - Tolerate a non-307 status without discarding a usable `Location`.
//!
//! ## Data flow
//! `hpcds-client` calls [`resolve_session_url`] once per `(resolution,
//! version)` pair before planning any block requests through
//! `hpcds-planner` and `hpcds-transport`.
//!
//! ## Ownership and lifetimes
//! Stateless: every call takes a borrowed transport and returns an owned
//! `String`.
//!
//! ## Error model
//! [`SessionError`] distinguishes a transport-layer failure from a
//! handshake that completed without a usable `Location` header.

mod error;
mod resolver;

pub use error::SessionError;
pub use resolver::resolve_session_url;
