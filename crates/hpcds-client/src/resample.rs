use hpcds_codec::{OwnedImage, VoxelGrid, VoxelGridMut};
use hpcds_core::Vector3;

use crate::ClientError;

/// Pyramid-level downsampling strategy selectable by
/// [`crate::DatasetClient::write_with_pyramids`].
///
/// The kernel behind `Linear` and `Lanczos` is an external collaborator:
/// this crate only carries the enum tag and the contract a [`Resampler`]
/// must honor. [`NearestNeighbourResampler`] is the one kernel shipped here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingMode {
    /// Each target voxel takes the value of its nearest source voxel.
    NearestNeighbour,
    /// Linear interpolation between neighbouring source voxels.
    Linear,
    /// Lanczos-windowed sinc interpolation.
    Lanczos,
}

/// Produces a resampled image of a target extent from a source grid.
pub trait Resampler {
    /// Resamples `src` to `target_extent` under `mode`.
    ///
    /// # Errors
    /// Implementations that don't support every [`SamplingMode`] should
    /// return [`ClientError::UnsupportedSamplingMode`] for the modes they
    /// don't.
    fn resample(
        &self,
        src: &dyn VoxelGrid,
        target_extent: Vector3<i32>,
        mode: SamplingMode,
    ) -> Result<OwnedImage, ClientError>;
}

/// The one resampling kernel shipped with this crate.
///
/// Maps each target coordinate to the source coordinate at the same
/// relative position, truncated toward zero — equivalent to sampling the
/// source on an evenly-spaced grid without interpolation.
pub struct NearestNeighbourResampler;

impl Resampler for NearestNeighbourResampler {
    fn resample(
        &self,
        src: &dyn VoxelGrid,
        target_extent: Vector3<i32>,
        mode: SamplingMode,
    ) -> Result<OwnedImage, ClientError> {
        if mode != SamplingMode::NearestNeighbour {
            return Err(ClientError::UnsupportedSamplingMode(mode));
        }

        let src_extent = src.extent();
        let mut out = OwnedImage::zeroed(target_extent, src.voxel_type());
        for tz in 0..target_extent.z {
            let sz = map_nearest(tz, src_extent.z, target_extent.z);
            for ty in 0..target_extent.y {
                let sy = map_nearest(ty, src_extent.y, target_extent.y);
                for tx in 0..target_extent.x {
                    let sx = map_nearest(tx, src_extent.x, target_extent.x);
                    out.set(
                        Vector3::new(tx, ty, tz),
                        src.get(Vector3::new(sx, sy, sz)),
                    );
                }
            }
        }
        Ok(out)
    }
}

fn map_nearest(target_coord: i32, src_len: i32, target_len: i32) -> i32 {
    if target_len == 0 {
        return 0;
    }
    (((target_coord as i64) * (src_len as i64)) / (target_len as i64)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use hpcds_codec::OwnedImage;
    use hpcds_core::VoxelType;

    #[test]
    fn s6_nearest_neighbour_downsample_by_half() {
        let mut src = OwnedImage::zeroed(Vector3::new(4, 4, 4), VoxelType::U8);
        for z in 0..4 {
            for y in 0..4 {
                for x in 0..4 {
                    let value = (x + y * 4 + z * 16) as u8;
                    src.set(Vector3::new(x, y, z), hpcds_codec::Voxel::U8(value));
                }
            }
        }

        let resampler = NearestNeighbourResampler;
        let out = resampler
            .resample(&src, Vector3::splat(2), SamplingMode::NearestNeighbour)
            .unwrap();

        assert_eq!(out.extent(), Vector3::splat(2));
        assert_eq!(out.get(Vector3::new(0, 0, 0)), src.get(Vector3::new(0, 0, 0)));
        assert_eq!(out.get(Vector3::new(1, 1, 1)), src.get(Vector3::new(2, 2, 2)));
    }

    #[test]
    fn unsupported_mode_is_rejected() {
        let src = OwnedImage::zeroed(Vector3::splat(2), VoxelType::U8);
        let resampler = NearestNeighbourResampler;
        let err = resampler
            .resample(&src, Vector3::splat(1), SamplingMode::Linear)
            .unwrap_err();
        assert!(matches!(err, ClientError::UnsupportedSamplingMode(SamplingMode::Linear)));
    }
}
