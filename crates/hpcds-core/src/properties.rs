use crate::{CoreError, ResolutionLevel, ResolutionUnit, Vector3, VoxelType};

/// Immutable, once-fetched dataset properties.
///
/// A value is safe to cache and share read-only across any number of
/// [`crate::Vector3`]-addressed queries; nothing here is mutated after
/// parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetProperties {
    /// Dataset identifier.
    pub uuid: String,
    /// Human-readable dataset label.
    pub label: String,
    /// Voxel scalar type, uniform across every block at every level.
    pub voxel_type: VoxelType,
    /// Server-declared compression scheme name (opaque to this client).
    pub compression: String,
    /// Base-level voxel extent.
    pub dimensions: Vector3<i32>,
    /// Number of channels.
    pub channels: i32,
    /// Number of angles.
    pub angles: i32,
    /// Unit label for `voxel_resolution`.
    pub voxel_unit: String,
    /// Physical size of one base-level voxel, per axis, if declared.
    pub voxel_resolution: Option<Vector3<f64>>,
    /// Physical spacing between timepoints, if declared.
    pub timepoint_resolution: Option<ResolutionUnit>,
    /// Physical spacing between channels, if declared.
    pub channel_resolution: Option<ResolutionUnit>,
    /// Physical spacing between angles, if declared.
    pub angle_resolution: Option<ResolutionUnit>,
    /// Opaque transformation matrix blob, if declared.
    pub transformations: Option<String>,
    /// Opaque view registration blob, if declared.
    pub view_registrations: Option<String>,
    /// Declared resolution pyramid, in metadata order.
    pub resolution_levels: Vec<ResolutionLevel>,
    /// Declared dataset versions.
    pub versions: Vec<i32>,
    /// Declared timepoint identifiers.
    pub timepoint_ids: Vec<i32>,
}

impl DatasetProperties {
    /// Looks up the declared [`ResolutionLevel`] whose `resolutions`
    /// exactly matches `r`.
    ///
    /// # Errors
    /// Returns [`CoreError::LevelNotFound`] when no level matches.
    pub fn level(&self, r: Vector3<i32>) -> Result<&ResolutionLevel, CoreError> {
        self.resolution_levels
            .iter()
            .find(|level| level.resolutions == r)
            .ok_or(CoreError::LevelNotFound(r))
    }

    /// Block size in voxels at resolution level `r`.
    ///
    /// # Errors
    /// Returns [`CoreError::LevelNotFound`] when `r` is not declared.
    pub fn block_dim(&self, r: Vector3<i32>) -> Result<Vector3<i32>, CoreError> {
        Ok(self.level(r)?.block_dimensions)
    }

    /// Image voxel extent at resolution level `r`.
    ///
    /// Unlike [`Self::block_dim`], this does not require `r` to be a
    /// declared level: `imageDim(R) = dimensions / R` is well-defined for
    /// any positive factor.
    pub fn image_dim(&self, r: Vector3<i32>) -> Vector3<i32> {
        self.dimensions.div(r)
    }

    /// Number of blocks along each axis at resolution level `r`.
    ///
    /// # Errors
    /// Returns [`CoreError::LevelNotFound`] when `r` is not declared.
    pub fn block_count(&self, r: Vector3<i32>) -> Result<Vector3<i32>, CoreError> {
        let block_dim = self.block_dim(r)?;
        Ok(self.image_dim(r).ceil_div(block_dim))
    }

    /// Effective voxel size of block coordinate `c` at level `r`, clipped to
    /// the image extent on the far edges.
    ///
    /// # Errors
    /// Returns [`CoreError::LevelNotFound`] when `r` is not declared.
    pub fn block_size(&self, c: Vector3<i32>, r: Vector3<i32>) -> Result<Vector3<i32>, CoreError> {
        let block_dim = self.block_dim(r)?;
        let image_dim = self.image_dim(r);
        let zero = Vector3::splat(0);
        let high = image_dim.min((c + Vector3::splat(1)) * block_dim);
        let low = zero.max(c * block_dim);
        Ok(zero.max(high - low))
    }

    /// `true` when block coordinate `c` at level `r` has strictly positive
    /// effective size on every axis.
    pub fn is_valid_block(&self, c: Vector3<i32>, r: Vector3<i32>) -> bool {
        match self.block_size(c, r) {
            Ok(size) => size.is_positive(),
            Err(_) => false,
        }
    }

    /// Returns every declared `resolutions` factor, preserving metadata
    /// order.
    pub fn all_resolutions(&self) -> Vec<Vector3<i32>> {
        self.resolution_levels
            .iter()
            .map(|level| level.resolutions)
            .collect()
    }
}
