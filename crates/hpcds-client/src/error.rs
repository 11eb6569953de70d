use thiserror::Error;

use hpcds_codec::CodecError;
use hpcds_core::{CoreError, Vector3, VoxelType};
use hpcds_session::SessionError;
use hpcds_transport::TransportError;

use crate::SamplingMode;

/// Aggregate error type for every read/write entry point in this crate.
///
/// Wraps each collaborator's own error type by `#[from]` and adds the
/// validation-failure kinds that only make sense once a view's selectors
/// and a caller's coordinates/buffers are known.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-layer failure from a request.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    /// Session handshake failure.
    #[error("session error: {0}")]
    Session(#[from] SessionError),
    /// Block codec failure.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
    /// Metadata parsing or geometry-query failure.
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    /// A block coordinate has no strictly-positive effective size at the
    /// view's resolution.
    #[error("block coordinate {coord:?} is invalid at resolution {resolution:?}")]
    InvalidCoord {
        /// The offending block coordinate.
        coord: Vector3<i32>,
        /// The resolution level it was validated against.
        resolution: Vector3<i32>,
    },
    /// Two caller-supplied sequences that must be the same length differ.
    #[error("size mismatch: expected {expected}, got {got}")]
    SizeMismatch {
        /// Expected length or extent.
        expected: usize,
        /// Actual length or extent received.
        got: usize,
    },
    /// The caller's in-memory voxel type differs from the dataset's
    /// declared type.
    #[error("voxel type mismatch: dataset declares {wanted:?}, caller supplied {actual:?}")]
    TypeMismatch {
        /// The dataset's declared voxel type.
        wanted: VoxelType,
        /// The type the caller's buffer actually reported.
        actual: VoxelType,
    },
    /// The requested timepoint is not in the dataset's declared set.
    #[error("timepoint {0} is not declared for this dataset")]
    UnknownTimepoint(i32),
    /// The requested channel is out of range for this dataset.
    #[error("channel {0} is out of range for this dataset")]
    UnknownChannel(i32),
    /// The requested angle is out of range for this dataset.
    #[error("angle {0} is out of range for this dataset")]
    UnknownAngle(i32),
    /// A resampler does not implement the requested sampling mode.
    #[error("resampler does not support sampling mode {0:?}")]
    UnsupportedSamplingMode(SamplingMode),
}
