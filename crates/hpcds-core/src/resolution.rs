use crate::Vector3;

/// A scalar value paired with its physical unit, e.g. `{ value: 0.2, unit:
/// "um" }` for a voxel resolution axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionUnit {
    /// Numeric value in `unit`.
    pub value: f64,
    /// Unit label as reported by the server (opaque to this client).
    pub unit: String,
}

/// One declared entry of the resolution pyramid.
///
/// The level with `resolutions == (1, 1, 1)` is the base (full) resolution;
/// every other declared level is a coarser pyramid level with its own block
/// dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionLevel {
    /// Per-axis downsample factor relative to the base level.
    pub resolutions: Vector3<i32>,
    /// Block size in voxels for blocks at this level.
    pub block_dimensions: Vector3<i32>,
}

impl ResolutionLevel {
    /// `true` when this is the base (full-resolution) level.
    pub fn is_base(&self) -> bool {
        self.resolutions == Vector3::splat(1)
    }
}
