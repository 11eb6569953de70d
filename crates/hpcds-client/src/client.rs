use std::sync::Arc;

use hpcds_codec::{OwnedImage, VoxelGrid, VoxelGridMut};
use hpcds_core::{DatasetProperties, Vector3};
use hpcds_transport::BlockTransport;

use crate::metadata::fetch_properties;
use crate::resample::{Resampler, SamplingMode};
use crate::url::dataset_url;
use crate::{ClientError, View};

/// Multi-image entry point: a [`View`] factory plus the pyramid-write
/// operation, which spans every declared resolution level.
///
/// Holds only the transport and the dataset's metadata URL; it fetches a
/// fresh [`DatasetProperties`] snapshot on every call that needs one unless
/// the caller routes through [`Self::get_view_with_properties`] with an
/// already-cached value.
pub struct DatasetClient {
    transport: Arc<dyn BlockTransport>,
    dataset_url: String,
}

impl DatasetClient {
    /// Builds a client for the dataset at `{ip}:{port}/datasets/{uuid}`,
    /// deriving the scheme per the IP-prefix rule (see [`dataset_url`]).
    pub fn new(transport: Arc<dyn BlockTransport>, ip: &str, port: u16, uuid: &str) -> Self {
        Self {
            transport,
            dataset_url: dataset_url(ip, port, uuid),
        }
    }

    /// The fully-derived dataset metadata URL.
    pub fn dataset_url(&self) -> &str {
        &self.dataset_url
    }

    /// Fetches the dataset's metadata document fresh from the server.
    pub fn properties(&self) -> Result<DatasetProperties, ClientError> {
        fetch_properties(self.transport.as_ref(), &self.dataset_url)
    }

    /// Builds a view, fetching metadata fresh.
    pub fn get_view(
        &self,
        channel: i32,
        timepoint: i32,
        angle: i32,
        resolution: Vector3<i32>,
        version: i32,
    ) -> Result<View, ClientError> {
        let properties = Arc::new(self.properties()?);
        Ok(self.get_view_with_properties(properties, channel, timepoint, angle, resolution, version))
    }

    /// Builds a view over an already-fetched properties snapshot, avoiding
    /// a redundant metadata fetch.
    pub fn get_view_with_properties(
        &self,
        properties: Arc<DatasetProperties>,
        channel: i32,
        timepoint: i32,
        angle: i32,
        resolution: Vector3<i32>,
        version: i32,
    ) -> View {
        View::new(
            self.transport.clone(),
            self.dataset_url.clone(),
            properties,
            channel,
            timepoint,
            angle,
            resolution,
            version,
        )
    }

    /// Reads a single block through a freshly-built view.
    pub fn read_block(
        &self,
        channel: i32,
        timepoint: i32,
        angle: i32,
        resolution: Vector3<i32>,
        version: i32,
        coord: Vector3<i32>,
    ) -> Result<OwnedImage, ClientError> {
        self.get_view(channel, timepoint, angle, resolution, version)?
            .read_block(coord)
    }

    /// Reads several blocks through a freshly-built view.
    pub fn read_blocks(
        &self,
        channel: i32,
        timepoint: i32,
        angle: i32,
        resolution: Vector3<i32>,
        version: i32,
        coords: &[Vector3<i32>],
    ) -> Result<Vec<OwnedImage>, ClientError> {
        self.get_view(channel, timepoint, angle, resolution, version)?
            .read_blocks(coords)
    }

    /// Batched read into `dest` through a freshly-built view.
    pub fn read_blocks_into(
        &self,
        channel: i32,
        timepoint: i32,
        angle: i32,
        resolution: Vector3<i32>,
        version: i32,
        coords: &[Vector3<i32>],
        dest: &mut dyn VoxelGridMut,
        offsets: &[Vector3<i32>],
    ) -> Result<(), ClientError> {
        self.get_view(channel, timepoint, angle, resolution, version)?
            .read_blocks_into(coords, dest, offsets)
    }

    /// Reads an axis-aligned region through a freshly-built view.
    pub fn read_region(
        &self,
        channel: i32,
        timepoint: i32,
        angle: i32,
        resolution: Vector3<i32>,
        version: i32,
        start: Vector3<i32>,
        end: Vector3<i32>,
    ) -> Result<OwnedImage, ClientError> {
        self.get_view(channel, timepoint, angle, resolution, version)?
            .read_region(start, end)
    }

    /// Reads the whole image at `resolution` through a freshly-built view.
    pub fn read_image(
        &self,
        channel: i32,
        timepoint: i32,
        angle: i32,
        resolution: Vector3<i32>,
        version: i32,
    ) -> Result<OwnedImage, ClientError> {
        self.get_view(channel, timepoint, angle, resolution, version)?
            .read_image()
    }

    /// Writes a single block through a freshly-built view, reading its
    /// content from `src` at `src_offset`.
    pub fn write_block(
        &self,
        channel: i32,
        timepoint: i32,
        angle: i32,
        resolution: Vector3<i32>,
        version: i32,
        coord: Vector3<i32>,
        src: &dyn VoxelGrid,
        src_offset: Vector3<i32>,
    ) -> Result<(), ClientError> {
        self.get_view(channel, timepoint, angle, resolution, version)?
            .write_block(coord, src, src_offset)
    }

    /// Writes several blocks through a freshly-built view, each read from
    /// `srcs[i]` starting at `src_offsets[i]`.
    pub fn write_blocks(
        &self,
        channel: i32,
        timepoint: i32,
        angle: i32,
        resolution: Vector3<i32>,
        version: i32,
        coords: &[Vector3<i32>],
        srcs: &[&dyn VoxelGrid],
        src_offsets: &[Vector3<i32>],
    ) -> Result<(), ClientError> {
        self.get_view(channel, timepoint, angle, resolution, version)?
            .write_blocks(coords, srcs, src_offsets)
    }

    /// Writes a whole image through a freshly-built view.
    pub fn write_image(
        &self,
        channel: i32,
        timepoint: i32,
        angle: i32,
        resolution: Vector3<i32>,
        version: i32,
        img: &dyn VoxelGrid,
    ) -> Result<(), ClientError> {
        self.get_view(channel, timepoint, angle, resolution, version)?
            .write_image(img)
    }

    /// Writes `img` at the base resolution `(1,1,1)`, then resamples it to
    /// every other declared resolution level and writes each of those too.
    ///
    /// Per the addressing model, level upload order is not guaranteed and
    /// each level's write is independent; a failure partway through leaves
    /// already-written levels in place.
    ///
    /// # Errors
    /// Propagates [`View::write_image`] errors and
    /// [`ClientError::UnsupportedSamplingMode`] from the resampler for any
    /// mode it does not implement.
    pub fn write_with_pyramids(
        &self,
        img: &dyn VoxelGrid,
        channel: i32,
        timepoint: i32,
        angle: i32,
        version: i32,
        sampling_mode: SamplingMode,
        resampler: &dyn Resampler,
    ) -> Result<(), ClientError> {
        let properties = Arc::new(self.properties()?);
        let base = Vector3::splat(1);

        let base_view = self.get_view_with_properties(
            properties.clone(),
            channel,
            timepoint,
            angle,
            base,
            version,
        );
        base_view.write_image(img)?;

        for r in properties.all_resolutions() {
            if r == base {
                continue;
            }
            let view = self.get_view_with_properties(
                properties.clone(),
                channel,
                timepoint,
                angle,
                r,
                version,
            );
            let target_extent = properties.image_dim(r);
            let resampled = resampler.resample(img, target_extent, sampling_mode)?;
            view.write_image(&resampled)?;
        }
        Ok(())
    }
}
