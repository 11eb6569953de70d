use thiserror::Error;

/// Error type for dataset metadata parsing and geometry queries.
///
/// Malformed metadata is recoverable (the caller still gets a populated,
/// zero-defaulted [`crate::DatasetProperties`]), while an unknown resolution
/// level is fatal to the query that asked for it.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The metadata document was not valid JSON at all.
    #[error("metadata document is not valid JSON: {0}")]
    Codec(#[from] serde_json::Error),
    /// A required or optional field was missing or had the wrong shape.
    ///
    /// This is logged as a warning at parse time; the field is recovered
    /// into a zero/empty default so parsing can still complete.
    #[error("malformed metadata field `{field}`: {reason}")]
    MalformedMetadata {
        /// Name of the offending field, as it appears in the JSON document.
        field: &'static str,
        /// Human-readable reason the field could not be decoded as expected.
        reason: String,
    },
    /// No declared resolution level matches the requested downsample factor.
    #[error("no resolution level declared for factor {0:?}")]
    LevelNotFound(crate::Vector3<i32>),
    /// A voxel type tag string was not one of the fixed closed set.
    #[error("unknown voxel type tag: {0}")]
    UnknownVoxelType(String),
}
