#![warn(missing_docs)]
//! # hpcds-client
//!
//! ## Purpose
//! The caller-facing surface: [`View`] for a bound selector context and
//! [`DatasetClient`] as the multi-image entry point, including the
//! pyramid-write operation.
//!
//! ## Responsibilities
//! - Validate selectors and coordinates before any network I/O.
//! - Plan and execute batched reads/writes via `hpcds-planner` and
//!   `hpcds-transport`, decoding/encoding through `hpcds-codec`.
//! - Derive dataset and session URLs per the server's addressing
//!   convention.
//! - Drive the pyramid write: one full-resolution upload plus one
//!   resampled upload per other declared level.
//!
//! ## Data flow
//! `DatasetClient::get_view` fetches [`hpcds_core::DatasetProperties`] and
//! returns a [`View`]; every read/write method on `View` re-validates the
//! view's selectors, resolves a session URL via `hpcds-session`, plans
//! batches via `hpcds-planner`, and issues requests via `hpcds-transport`.
//!
//! ## Ownership and lifetimes
//! `View` holds its transport behind an `Arc<dyn BlockTransport>` and its
//! properties snapshot behind an `Arc<DatasetProperties>`; it owns no
//! resource requiring explicit release.
//!
//! ## Error model
//! [`ClientError`] aggregates every collaborator's error type plus the
//! selector/coordinate/type validation failures that only this layer can
//! detect.

mod client;
mod error;
mod free_fn;
mod metadata;
mod offset_view;
mod resample;
mod url;
mod view;

pub use client::DatasetClient;
pub use error::ClientError;
pub use free_fn::{Selectors, read_image, write_image};
pub use resample::{NearestNeighbourResampler, Resampler, SamplingMode};
pub use url::dataset_url;
pub use view::View;
