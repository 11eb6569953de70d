use crate::CoreError;

/// The closed set of voxel scalar types a dataset may declare.
///
/// This enumeration and its element-size table are the whole of the type
/// system the block codec needs to dispatch on; there is no extensibility
/// point, matching the "fixed declared list" non-goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoxelType {
    /// `uint8`, 1 byte.
    U8,
    /// `uint16`, 2 bytes.
    U16,
    /// `uint32`, 4 bytes.
    U32,
    /// `uint64`, 8 bytes.
    U64,
    /// `int8`, 1 byte.
    I8,
    /// `int16`, 2 bytes.
    I16,
    /// `int32`, 4 bytes.
    I32,
    /// `int64`, 8 bytes.
    I64,
    /// `float32`, 4 bytes.
    F32,
    /// `float64`, 8 bytes.
    F64,
}

impl VoxelType {
    /// Parses the dataset metadata's `voxelType` string tag.
    ///
    /// # Errors
    /// Returns [`CoreError::UnknownVoxelType`] for any tag outside the fixed
    /// set declared in §3 of the addressing model.
    pub fn parse(tag: &str) -> Result<Self, CoreError> {
        Ok(match tag {
            "uint8" => VoxelType::U8,
            "uint16" => VoxelType::U16,
            "uint32" => VoxelType::U32,
            "uint64" => VoxelType::U64,
            "int8" => VoxelType::I8,
            "int16" => VoxelType::I16,
            "int32" => VoxelType::I32,
            "int64" => VoxelType::I64,
            "float32" => VoxelType::F32,
            "float64" => VoxelType::F64,
            other => return Err(CoreError::UnknownVoxelType(other.to_string())),
        })
    }

    /// Returns the wire tag string for this voxel type.
    pub fn tag(self) -> &'static str {
        match self {
            VoxelType::U8 => "uint8",
            VoxelType::U16 => "uint16",
            VoxelType::U32 => "uint32",
            VoxelType::U64 => "uint64",
            VoxelType::I8 => "int8",
            VoxelType::I16 => "int16",
            VoxelType::I32 => "int32",
            VoxelType::I64 => "int64",
            VoxelType::F32 => "float32",
            VoxelType::F64 => "float64",
        }
    }

    /// Byte width of one voxel of this type on the wire.
    pub fn element_size(self) -> usize {
        match self {
            VoxelType::U8 | VoxelType::I8 => 1,
            VoxelType::U16 | VoxelType::I16 => 2,
            VoxelType::U32 | VoxelType::I32 | VoxelType::F32 => 4,
            VoxelType::U64 | VoxelType::I64 | VoxelType::F64 => 8,
        }
    }
}
