#![warn(missing_docs)]
//! # hpcds-codec
//!
//! ## Purpose
//! Encodes and decodes the byte layout of one block payload between its
//! wire form and a caller-supplied 3-D destination region.
//!
//! ## Responsibilities
//! - Define the fixed block header and per-voxel wire representation.
//! - Decode a payload into an arbitrarily-offset destination sub-volume,
//!   clipping writes that fall outside it.
//! - Encode a source sub-volume into a payload ready to POST.
//!
//! ## Data flow
//! `hpcds-client` reads bytes off the wire via `hpcds-transport`, then calls
//! [`decode`] once per returned block segment; writes mirror this with
//! [`encode`].
//!
//! ## Ownership and lifetimes
//! This crate owns no buffers of its own; it borrows a payload slice and a
//! `&mut dyn VoxelGridMut` destination for the duration of one call.
//!
//! ## Error model
//! The only failure mode is a payload shorter than its declared header or
//! voxel volume ([`CodecError::ShortPayload`]); a voxel-type mismatch
//! between the caller's container and the dataset is the caller's
//! responsibility to avoid and is never raised here.

mod codec;
mod error;
mod grid;
mod voxel;

pub use codec::{decode, encode};
pub use error::CodecError;
pub use grid::{OwnedImage, VoxelGrid, VoxelGridMut};
pub use voxel::Voxel;
