#![warn(missing_docs)]
//! # hpcds-core
//!
//! ## Purpose
//! Typed representation of one dataset's geometry and metadata, and the
//! derived queries every other `hpcds-*` crate builds block addressing on.
//!
//! ## Responsibilities
//! - Parse the server's metadata document into [`DatasetProperties`].
//! - Answer block/image geometry queries per resolution level.
//! - Define the closed [`VoxelType`] enumeration and its element-size table.
//!
//! ## Data flow
//! Metadata document (JSON) -> [`parse_properties`] -> [`DatasetProperties`]
//! -> geometry queries consumed by `hpcds-planner` and `hpcds-client`.
//!
//! ## Ownership and lifetimes
//! `DatasetProperties` is immutable once returned and cheap to clone; it
//! carries no borrowed data and no handle to the transport that fetched it.
//!
//! ## Error model
//! Structurally invalid JSON is the only hard parse failure
//! ([`CoreError::Codec`]); missing or malformed individual fields are logged
//! and recovered into zero/empty defaults so callers can still inspect a
//! well-formed (if partially empty) properties record.

mod error;
mod parse;
mod properties;
mod resolution;
mod vector3;
mod voxel;

pub use error::CoreError;
pub use parse::parse_properties;
pub use properties::DatasetProperties;
pub use resolution::{ResolutionLevel, ResolutionUnit};
pub use vector3::Vector3;
pub use voxel::VoxelType;
