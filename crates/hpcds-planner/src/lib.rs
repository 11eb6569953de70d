#![warn(missing_docs)]
//! # hpcds-planner
//!
//! ## Purpose
//! Turns an ordered list of block coordinates (or blocks-to-write) into
//! batches that respect a byte budget — a URL-length budget for reads, a
//! payload-size budget for writes.
//!
//! ## Responsibilities
//! - Pack block-coordinate suffixes into request URLs under a length limit.
//! - Pack blocks into write batches under a payload-size target.
//! - Preserve caller-supplied ordering and guarantee every index appears in
//!   exactly one output batch.
//!
//! ## Data flow
//! `hpcds-client` calls [`plan_url_batches`] before every batched read and
//! [`plan_write_batches`] before every batched write; `hpcds-transport`
//! issues one request per returned batch.
//!
//! ## Ownership and lifetimes
//! Every function here is a pure value transform with no retained state
//! between calls.
//!
//! ## Error model
//! This crate has no failure modes of its own; it only rearranges indices.

mod batch;
mod url;
mod write_batch;

pub use url::{PlannerConfig, UrlBatch, plan_url_batches};
pub use write_batch::{WriteBatchConfig, plan_write_batches};
