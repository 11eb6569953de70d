use hpcds_core::VoxelType;

/// One decoded scalar voxel value, tagged by its runtime type.
///
/// Modeled as a closed variant over the fixed scalar set rather than a
/// compile-time generic parameter, so `encode`/`decode` can dispatch once
/// per call from the dataset's `voxelType` string instead of requiring one
/// monomorphized codec per scalar type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Voxel {
    /// `uint8`.
    U8(u8),
    /// `uint16`.
    U16(u16),
    /// `uint32`.
    U32(u32),
    /// `uint64`.
    U64(u64),
    /// `int8`.
    I8(i8),
    /// `int16`.
    I16(i16),
    /// `int32`.
    I32(i32),
    /// `int64`.
    I64(i64),
    /// `float32`.
    F32(f32),
    /// `float64`.
    F64(f64),
}

impl Voxel {
    /// The [`VoxelType`] tag of this value.
    pub fn voxel_type(self) -> VoxelType {
        match self {
            Voxel::U8(_) => VoxelType::U8,
            Voxel::U16(_) => VoxelType::U16,
            Voxel::U32(_) => VoxelType::U32,
            Voxel::U64(_) => VoxelType::U64,
            Voxel::I8(_) => VoxelType::I8,
            Voxel::I16(_) => VoxelType::I16,
            Voxel::I32(_) => VoxelType::I32,
            Voxel::I64(_) => VoxelType::I64,
            Voxel::F32(_) => VoxelType::F32,
            Voxel::F64(_) => VoxelType::F64,
        }
    }

    /// Decodes one scalar of `ty` from `bytes`, which are big-endian on the
    /// wire regardless of host byte order (see the block codec's wire
    /// layout for the rationale).
    pub(crate) fn from_be_bytes(ty: VoxelType, bytes: &[u8]) -> Voxel {
        match ty {
            VoxelType::U8 => Voxel::U8(bytes[0]),
            VoxelType::U16 => Voxel::U16(u16::from_be_bytes(bytes.try_into().unwrap())),
            VoxelType::U32 => Voxel::U32(u32::from_be_bytes(bytes.try_into().unwrap())),
            VoxelType::U64 => Voxel::U64(u64::from_be_bytes(bytes.try_into().unwrap())),
            VoxelType::I8 => Voxel::I8(bytes[0] as i8),
            VoxelType::I16 => Voxel::I16(i16::from_be_bytes(bytes.try_into().unwrap())),
            VoxelType::I32 => Voxel::I32(i32::from_be_bytes(bytes.try_into().unwrap())),
            VoxelType::I64 => Voxel::I64(i64::from_be_bytes(bytes.try_into().unwrap())),
            VoxelType::F32 => Voxel::F32(f32::from_be_bytes(bytes.try_into().unwrap())),
            VoxelType::F64 => Voxel::F64(f64::from_be_bytes(bytes.try_into().unwrap())),
        }
    }

    /// Appends this value's big-endian wire representation to `out`.
    pub(crate) fn write_be(self, out: &mut Vec<u8>) {
        match self {
            Voxel::U8(v) => out.push(v),
            Voxel::U16(v) => out.extend_from_slice(&v.to_be_bytes()),
            Voxel::U32(v) => out.extend_from_slice(&v.to_be_bytes()),
            Voxel::U64(v) => out.extend_from_slice(&v.to_be_bytes()),
            Voxel::I8(v) => out.push(v as u8),
            Voxel::I16(v) => out.extend_from_slice(&v.to_be_bytes()),
            Voxel::I32(v) => out.extend_from_slice(&v.to_be_bytes()),
            Voxel::I64(v) => out.extend_from_slice(&v.to_be_bytes()),
            Voxel::F32(v) => out.extend_from_slice(&v.to_be_bytes()),
            Voxel::F64(v) => out.extend_from_slice(&v.to_be_bytes()),
        }
    }
}
