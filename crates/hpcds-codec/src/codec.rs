use hpcds_core::{Vector3, VoxelType};

use crate::{CodecError, Voxel, VoxelGrid, VoxelGridMut};

const HEADER_LEN: usize = 12;

/// Decodes a block wire payload into a caller-supplied destination grid.
///
/// Iterates voxels in z-major order (z outer, then y, then x fastest),
/// matching the newest revision of the wire layout. Each element is read as
/// big-endian regardless of host byte order and converted with
/// `from_be_bytes`. Destination coordinates outside `dest`'s extent are
/// skipped rather than erroring — this is load-bearing for region reads
/// that start mid-block, where `dest_offset` can be negative on one or more
/// axes for the low-edge blocks.
///
/// # Errors
/// Returns [`CodecError::ShortPayload`] when `payload` is smaller than its
/// 12-byte header, or smaller than the header plus the declared voxel
/// volume.
pub fn decode(
    payload: &[u8],
    voxel_type: VoxelType,
    dest: &mut dyn VoxelGridMut,
    dest_offset: Vector3<i32>,
) -> Result<(), CodecError> {
    if payload.len() < HEADER_LEN {
        return Err(CodecError::ShortPayload {
            expected: HEADER_LEN,
            got: payload.len(),
        });
    }

    let bx = u32::from_le_bytes(payload[0..4].try_into().unwrap()) as i32;
    let by = u32::from_le_bytes(payload[4..8].try_into().unwrap()) as i32;
    let bz = u32::from_le_bytes(payload[8..12].try_into().unwrap()) as i32;

    let elem_size = voxel_type.element_size();
    let voxel_count = bx as i64 * by as i64 * bz as i64;
    let needed = HEADER_LEN + voxel_count as usize * elem_size;
    if payload.len() < needed {
        return Err(CodecError::ShortPayload {
            expected: needed,
            got: payload.len(),
        });
    }

    for z in 0..bz {
        for y in 0..by {
            for x in 0..bx {
                let linear = (z as i64 * bx as i64 * by as i64 + y as i64 * bx as i64 + x as i64)
                    as usize;
                let off = HEADER_LEN + linear * elem_size;
                let value = Voxel::from_be_bytes(voxel_type, &payload[off..off + elem_size]);

                let coord = dest_offset + Vector3::new(x, y, z);
                if dest.contains(coord) {
                    dest.set(coord, value);
                }
            }
        }
    }

    Ok(())
}

/// Encodes a source sub-volume into a block wire payload.
///
/// `block_size` is the effective block size to emit (may be smaller than a
/// full block on the image's far edge); `src_offset` is the low corner of
/// the sub-volume to read from `src`.
pub fn encode(
    src: &dyn VoxelGrid,
    src_offset: Vector3<i32>,
    block_size: Vector3<i32>,
    voxel_type: VoxelType,
) -> Vec<u8> {
    let elem_size = voxel_type.element_size();
    let voxel_count = block_size.volume() as usize;
    let mut out = Vec::with_capacity(HEADER_LEN + voxel_count * elem_size);

    out.extend_from_slice(&(block_size.x as u32).to_le_bytes());
    out.extend_from_slice(&(block_size.y as u32).to_le_bytes());
    out.extend_from_slice(&(block_size.z as u32).to_le_bytes());

    for z in 0..block_size.z {
        for y in 0..block_size.y {
            for x in 0..block_size.x {
                let coord = src_offset + Vector3::new(x, y, z);
                src.get(coord).write_be(&mut out);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OwnedImage;
    use rand::RngCore;
    use rand::SeedableRng;

    fn random_image(extent: Vector3<i32>, ty: VoxelType, seed: u64) -> OwnedImage {
        let mut img = OwnedImage::zeroed(extent, ty);
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let mut buf = vec![0u8; img.as_bytes().len()];
        rng.fill_bytes(&mut buf);
        for z in 0..extent.z {
            for y in 0..extent.y {
                for x in 0..extent.x {
                    let coord = Vector3::new(x, y, z);
                    let idx = ((z * extent.x * extent.y + y * extent.x + x) as usize)
                        * ty.element_size();
                    let value = match ty {
                        VoxelType::U8 => Voxel::U8(buf[idx]),
                        _ => unreachable!("tests only use u8 random images"),
                    };
                    img.set(coord, value);
                }
            }
        }
        img
    }

    #[test]
    fn encode_decode_round_trip_preserves_voxels() {
        let extent = Vector3::new(4, 3, 2);
        let src = random_image(extent, VoxelType::U8, 42);

        let payload = encode(&src, Vector3::splat(0), extent, VoxelType::U8);
        assert_eq!(payload.len(), 12 + (4 * 3 * 2));

        let mut dest = OwnedImage::zeroed(extent, VoxelType::U8);
        decode(&payload, VoxelType::U8, &mut dest, Vector3::splat(0)).unwrap();

        assert_eq!(src, dest);
    }

    #[test]
    fn decode_header_matches_little_endian_block_size() {
        let extent = Vector3::new(64, 64, 32);
        let src = OwnedImage::zeroed(extent, VoxelType::U8);
        let payload = encode(&src, Vector3::splat(0), extent, VoxelType::U8);
        assert_eq!(&payload[0..4], &64u32.to_le_bytes());
        assert_eq!(&payload[4..8], &64u32.to_le_bytes());
        assert_eq!(&payload[8..12], &32u32.to_le_bytes());
    }

    #[test]
    fn decode_clips_destination_writes_silently() {
        let extent = Vector3::new(4, 4, 4);
        let src = random_image(extent, VoxelType::U8, 7);
        let payload = encode(&src, Vector3::splat(0), extent, VoxelType::U8);

        // A 2x2x2 destination can only hold the low corner of the block;
        // writes past it must be skipped, not panic.
        let mut dest = OwnedImage::zeroed(Vector3::splat(2), VoxelType::U8);
        decode(&payload, VoxelType::U8, &mut dest, Vector3::splat(0)).unwrap();

        for z in 0..2 {
            for y in 0..2 {
                for x in 0..2 {
                    let coord = Vector3::new(x, y, z);
                    assert_eq!(dest.get(coord), src.get(coord));
                }
            }
        }
    }

    #[test]
    fn decode_supports_negative_destination_offset() {
        let extent = Vector3::new(4, 4, 4);
        let src = random_image(extent, VoxelType::U8, 9);
        let payload = encode(&src, Vector3::splat(0), extent, VoxelType::U8);

        let mut dest = OwnedImage::zeroed(Vector3::splat(2), VoxelType::U8);
        decode(&payload, VoxelType::U8, &mut dest, Vector3::splat(-2)).unwrap();

        // Everything lands outside dest's [0,2) extent; nothing should move.
        assert_eq!(dest, OwnedImage::zeroed(Vector3::splat(2), VoxelType::U8));
    }

    #[test]
    fn decode_rejects_payload_shorter_than_header() {
        let mut dest = OwnedImage::zeroed(Vector3::splat(2), VoxelType::U8);
        let err = decode(&[0u8; 4], VoxelType::U8, &mut dest, Vector3::splat(0)).unwrap_err();
        assert!(matches!(err, CodecError::ShortPayload { .. }));
    }

    #[test]
    fn decode_rejects_payload_shorter_than_declared_volume() {
        let mut dest = OwnedImage::zeroed(Vector3::splat(2), VoxelType::U8);
        let mut payload = vec![0u8; 12];
        payload[0..4].copy_from_slice(&2u32.to_le_bytes());
        payload[4..8].copy_from_slice(&2u32.to_le_bytes());
        payload[8..12].copy_from_slice(&2u32.to_le_bytes());
        let err = decode(&payload, VoxelType::U8, &mut dest, Vector3::splat(0)).unwrap_err();
        assert!(matches!(err, CodecError::ShortPayload { .. }));
    }
}
