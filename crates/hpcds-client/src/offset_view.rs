use hpcds_codec::{Voxel, VoxelGrid};
use hpcds_core::{Vector3, VoxelType};

/// A read-only window into another [`VoxelGrid`], shifted by a fixed
/// offset and clipped to a smaller extent.
///
/// Used to hand `hpcds-codec::encode` a per-block sub-view of a caller's
/// full image without copying voxels.
pub(crate) struct OffsetView<'a> {
    pub(crate) inner: &'a dyn VoxelGrid,
    pub(crate) offset: Vector3<i32>,
    pub(crate) extent: Vector3<i32>,
}

impl VoxelGrid for OffsetView<'_> {
    fn voxel_type(&self) -> VoxelType {
        self.inner.voxel_type()
    }

    fn extent(&self) -> Vector3<i32> {
        self.extent
    }

    fn get(&self, coord: Vector3<i32>) -> Voxel {
        self.inner.get(self.offset + coord)
    }
}
