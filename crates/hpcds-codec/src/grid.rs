use hpcds_core::{Vector3, VoxelType};

use crate::Voxel;

/// Read-only view the block codec needs from a caller's 3-D image
/// container.
///
/// The in-memory image container itself is an external collaborator; this
/// trait is the entire surface `hpcds-codec` depends on, so any container
/// type can plug in by implementing it.
pub trait VoxelGrid {
    /// The voxel scalar type this grid stores.
    fn voxel_type(&self) -> VoxelType;
    /// Voxel extent of this grid along each axis.
    fn extent(&self) -> Vector3<i32>;
    /// Reads the voxel at `coord`.
    ///
    /// # Panics
    /// May panic if `coord` is outside [`Self::extent`]; callers are
    /// expected to bounds-check before calling (the codec itself never
    /// reads outside a source region it was told is valid).
    fn get(&self, coord: Vector3<i32>) -> Voxel;
}

/// Mutable counterpart of [`VoxelGrid`], used as a decode destination.
pub trait VoxelGridMut: VoxelGrid {
    /// Writes `value` at `coord`.
    ///
    /// # Panics
    /// May panic if `coord` is outside [`VoxelGrid::extent`]; the block
    /// codec's decode routine never calls this out of bounds (it clips
    /// first), but other callers must bounds-check themselves.
    fn set(&mut self, coord: Vector3<i32>, value: Voxel);

    /// `true` when `coord` lies within [`VoxelGrid::extent`] on every axis.
    fn contains(&self, coord: Vector3<i32>) -> bool {
        let extent = self.extent();
        coord.x >= 0
            && coord.y >= 0
            && coord.z >= 0
            && coord.x < extent.x
            && coord.y < extent.y
            && coord.z < extent.z
    }
}

/// A simple owned voxel grid backed by one flat native-endian byte buffer.
///
/// This is the concrete container used by `hpcds-client` and by this
/// workspace's tests; a caller with their own image type implements
/// [`VoxelGrid`]/[`VoxelGridMut`] directly instead of going through this
/// type.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedImage {
    voxel_type: VoxelType,
    extent: Vector3<i32>,
    bytes: Vec<u8>,
}

impl OwnedImage {
    /// Allocates a zero-filled image of the given extent and voxel type.
    pub fn zeroed(extent: Vector3<i32>, voxel_type: VoxelType) -> Self {
        let len = extent.volume() as usize * voxel_type.element_size();
        Self {
            voxel_type,
            extent,
            bytes: vec![0; len],
        }
    }

    /// Raw native-endian backing bytes, in `(z, y, x)`-major order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn offset(&self, coord: Vector3<i32>) -> usize {
        let e = self.extent;
        let linear = (coord.z as i64 * e.x as i64 * e.y as i64
            + coord.y as i64 * e.x as i64
            + coord.x as i64) as usize;
        linear * self.voxel_type.element_size()
    }
}

impl VoxelGrid for OwnedImage {
    fn voxel_type(&self) -> VoxelType {
        self.voxel_type
    }

    fn extent(&self) -> Vector3<i32> {
        self.extent
    }

    fn get(&self, coord: Vector3<i32>) -> Voxel {
        let off = self.offset(coord);
        let size = self.voxel_type.element_size();
        native_to_voxel(self.voxel_type, &self.bytes[off..off + size])
    }
}

impl VoxelGridMut for OwnedImage {
    fn set(&mut self, coord: Vector3<i32>, value: Voxel) {
        let off = self.offset(coord);
        let size = self.voxel_type.element_size();
        voxel_to_native(value, &mut self.bytes[off..off + size]);
    }
}

fn native_to_voxel(ty: VoxelType, bytes: &[u8]) -> Voxel {
    match ty {
        VoxelType::U8 => Voxel::U8(bytes[0]),
        VoxelType::U16 => Voxel::U16(u16::from_ne_bytes(bytes.try_into().unwrap())),
        VoxelType::U32 => Voxel::U32(u32::from_ne_bytes(bytes.try_into().unwrap())),
        VoxelType::U64 => Voxel::U64(u64::from_ne_bytes(bytes.try_into().unwrap())),
        VoxelType::I8 => Voxel::I8(bytes[0] as i8),
        VoxelType::I16 => Voxel::I16(i16::from_ne_bytes(bytes.try_into().unwrap())),
        VoxelType::I32 => Voxel::I32(i32::from_ne_bytes(bytes.try_into().unwrap())),
        VoxelType::I64 => Voxel::I64(i64::from_ne_bytes(bytes.try_into().unwrap())),
        VoxelType::F32 => Voxel::F32(f32::from_ne_bytes(bytes.try_into().unwrap())),
        VoxelType::F64 => Voxel::F64(f64::from_ne_bytes(bytes.try_into().unwrap())),
    }
}

fn voxel_to_native(value: Voxel, out: &mut [u8]) {
    match value {
        Voxel::U8(v) => out[0] = v,
        Voxel::U16(v) => out.copy_from_slice(&v.to_ne_bytes()),
        Voxel::U32(v) => out.copy_from_slice(&v.to_ne_bytes()),
        Voxel::U64(v) => out.copy_from_slice(&v.to_ne_bytes()),
        Voxel::I8(v) => out[0] = v as u8,
        Voxel::I16(v) => out.copy_from_slice(&v.to_ne_bytes()),
        Voxel::I32(v) => out.copy_from_slice(&v.to_ne_bytes()),
        Voxel::I64(v) => out.copy_from_slice(&v.to_ne_bytes()),
        Voxel::F32(v) => out.copy_from_slice(&v.to_ne_bytes()),
        Voxel::F64(v) => out.copy_from_slice(&v.to_ne_bytes()),
    }
}
