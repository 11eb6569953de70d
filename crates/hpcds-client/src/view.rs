use std::sync::Arc;

use hpcds_codec::{OwnedImage, VoxelGrid, VoxelGridMut, decode, encode};
use hpcds_core::{DatasetProperties, Vector3};
use hpcds_planner::{PlannerConfig, WriteBatchConfig, plan_url_batches, plan_write_batches};
use hpcds_session::resolve_session_url;
use hpcds_transport::{BlockTransport, HttpMethod};

use crate::ClientError;
use crate::offset_view::OffsetView;

const HEADER_LEN: usize = 12;

/// Lightweight locator binding one `(channel, timepoint, angle, resolution,
/// version)` context within a dataset.
///
/// A `View` owns no resources needing release: the transport is shared
/// behind an `Arc`, and `properties` is an immutable snapshot fetched once
/// by whoever constructed this view. Every read/write method below opens a
/// fresh session handshake.
#[derive(Clone)]
pub struct View {
    transport: Arc<dyn BlockTransport>,
    dataset_url: String,
    properties: Arc<DatasetProperties>,
    channel: i32,
    timepoint: i32,
    angle: i32,
    resolution: Vector3<i32>,
    version: i32,
}

impl View {
    /// Builds a view over an already-fetched properties snapshot.
    pub fn new(
        transport: Arc<dyn BlockTransport>,
        dataset_url: String,
        properties: Arc<DatasetProperties>,
        channel: i32,
        timepoint: i32,
        angle: i32,
        resolution: Vector3<i32>,
        version: i32,
    ) -> Self {
        Self {
            transport,
            dataset_url,
            properties,
            channel,
            timepoint,
            angle,
            resolution,
            version,
        }
    }

    /// The dataset properties snapshot this view was built from.
    pub fn properties(&self) -> &DatasetProperties {
        &self.properties
    }

    fn validate_selectors(&self) -> Result<(), ClientError> {
        self.properties.level(self.resolution)?;
        if !self.properties.timepoint_ids.contains(&self.timepoint) {
            return Err(ClientError::UnknownTimepoint(self.timepoint));
        }
        if self.channel < 0 || self.channel >= self.properties.channels {
            return Err(ClientError::UnknownChannel(self.channel));
        }
        if self.angle < 0 || self.angle >= self.properties.angles {
            return Err(ClientError::UnknownAngle(self.angle));
        }
        Ok(())
    }

    fn session_url(&self) -> Result<String, ClientError> {
        let r = self.resolution;
        Ok(resolve_session_url(
            self.transport.as_ref(),
            &self.dataset_url,
            (r.x, r.y, r.z),
            self.version,
        )?)
    }

    /// Allocates and reads a single block.
    ///
    /// # Errors
    /// See [`Self::read_blocks_into`].
    pub fn read_block(&self, coord: Vector3<i32>) -> Result<OwnedImage, ClientError> {
        let size = self.properties.block_size(coord, self.resolution)?;
        let mut img = OwnedImage::zeroed(size, self.properties.voxel_type);
        self.read_blocks_into(&[coord], &mut img, &[Vector3::splat(0)])?;
        Ok(img)
    }

    /// Reads each block in `coords` separately and returns them in input
    /// order.
    pub fn read_blocks(&self, coords: &[Vector3<i32>]) -> Result<Vec<OwnedImage>, ClientError> {
        coords.iter().map(|&c| self.read_block(c)).collect()
    }

    /// Batched read of `coords` into `dest`, each landing at its matching
    /// entry in `offsets`.
    ///
    /// # Errors
    /// Returns [`ClientError::SizeMismatch`] when `coords.len() !=
    /// offsets.len()`, selector errors when the view's timepoint/channel/
    /// angle/resolution aren't declared, [`ClientError::TypeMismatch`] when
    /// `dest`'s voxel type differs from the dataset's, and
    /// [`ClientError::InvalidCoord`] for any coordinate with no
    /// strictly-positive effective size.
    pub fn read_blocks_into(
        &self,
        coords: &[Vector3<i32>],
        dest: &mut dyn VoxelGridMut,
        offsets: &[Vector3<i32>],
    ) -> Result<(), ClientError> {
        if coords.len() != offsets.len() {
            return Err(ClientError::SizeMismatch {
                expected: coords.len(),
                got: offsets.len(),
            });
        }
        self.validate_selectors()?;
        if dest.voxel_type() != self.properties.voxel_type {
            return Err(ClientError::TypeMismatch {
                wanted: self.properties.voxel_type,
                actual: dest.voxel_type(),
            });
        }
        for &c in coords {
            if !self.properties.is_valid_block(c, self.resolution) {
                return Err(ClientError::InvalidCoord {
                    coord: c,
                    resolution: self.resolution,
                });
            }
        }
        if coords.is_empty() {
            return Ok(());
        }

        let session_url = self.session_url()?;
        let config = PlannerConfig::default();
        let batches = plan_url_batches(
            &session_url,
            coords,
            self.timepoint,
            self.channel,
            self.angle,
            &config,
        );

        let elem_size = self.properties.voxel_type.element_size();
        for batch in batches {
            let response = self
                .transport
                .request(&batch.url, HttpMethod::Get, None, &[])?;
            if response.status != 200 {
                log::warn!(
                    "block read {} returned status {}",
                    batch.url,
                    response.status
                );
            }

            let mut cursor = 0usize;
            for &idx in &batch.indices {
                let block_size = self.properties.block_size(coords[idx], self.resolution)?;
                let segment_len = HEADER_LEN + block_size.volume() as usize * elem_size;
                let end = (cursor + segment_len).min(response.body.len());
                let segment = &response.body[cursor.min(response.body.len())..end];
                decode(segment, self.properties.voxel_type, dest, offsets[idx])?;
                cursor += segment_len;
            }
        }
        Ok(())
    }

    /// Reads the axis-aligned region `[start, end)`.
    ///
    /// # Errors
    /// Returns [`ClientError::SizeMismatch`] when `start` is not strictly
    /// less than `end` on every axis, plus every error
    /// [`Self::read_blocks_into`] can raise.
    pub fn read_region(&self, start: Vector3<i32>, end: Vector3<i32>) -> Result<OwnedImage, ClientError> {
        if !start.strictly_less_than(end) {
            return Err(ClientError::SizeMismatch {
                expected: 1,
                got: 0,
            });
        }

        let block_dim = self.properties.block_dim(self.resolution)?;
        let low = start.div(block_dim);
        let high = (end - Vector3::splat(1)).div(block_dim);

        let mut coords = Vec::new();
        let mut offsets = Vec::new();
        for x in low.x..=high.x {
            for y in low.y..=high.y {
                for z in low.z..=high.z {
                    let c = Vector3::new(x, y, z);
                    coords.push(c);
                    offsets.push(c * block_dim - start);
                }
            }
        }

        let mut image = OwnedImage::zeroed(end - start, self.properties.voxel_type);
        self.read_blocks_into(&coords, &mut image, &offsets)?;
        Ok(image)
    }

    /// Reads the axis-aligned region `[start, end)` into `dest`, landing at
    /// `offset`.
    pub fn read_region_into(
        &self,
        start: Vector3<i32>,
        end: Vector3<i32>,
        dest: &mut dyn VoxelGridMut,
        offset: Vector3<i32>,
    ) -> Result<(), ClientError> {
        let region = self.read_region(start, end)?;
        let extent = region.extent();
        for x in 0..extent.x {
            for y in 0..extent.y {
                for z in 0..extent.z {
                    let coord = Vector3::new(x, y, z);
                    let dest_coord = offset + coord;
                    if dest.contains(dest_coord) {
                        dest.set(dest_coord, region.get(coord));
                    }
                }
            }
        }
        Ok(())
    }

    /// Reads the whole image at this view's resolution level.
    pub fn read_image(&self) -> Result<OwnedImage, ClientError> {
        self.read_region(Vector3::splat(0), self.properties.image_dim(self.resolution))
    }

    /// Writes a single block, reading its content from `src` at
    /// `src_offset`.
    pub fn write_block(
        &self,
        coord: Vector3<i32>,
        src: &dyn VoxelGrid,
        src_offset: Vector3<i32>,
    ) -> Result<(), ClientError> {
        self.write_blocks(&[coord], &[src], &[src_offset])
    }

    /// Batched write: each `srcs[i]` supplies block `coords[i]`'s content
    /// read starting at `src_offsets[i]`, symmetric to
    /// [`Self::read_blocks_into`]'s per-coordinate `offsets`.
    ///
    /// Batches are grouped by a 128 MiB (default) target body size, sized
    /// from the view's declared (not edge-clipped) block dimensions, and
    /// POSTed as `application/octet-stream`.
    pub fn write_blocks(
        &self,
        coords: &[Vector3<i32>],
        srcs: &[&dyn VoxelGrid],
        src_offsets: &[Vector3<i32>],
    ) -> Result<(), ClientError> {
        if coords.len() != srcs.len() || coords.len() != src_offsets.len() {
            return Err(ClientError::SizeMismatch {
                expected: coords.len(),
                got: srcs.len().max(src_offsets.len()),
            });
        }
        self.validate_selectors()?;
        for (&c, &src) in coords.iter().zip(srcs.iter()) {
            if !self.properties.is_valid_block(c, self.resolution) {
                return Err(ClientError::InvalidCoord {
                    coord: c,
                    resolution: self.resolution,
                });
            }
            if src.voxel_type() != self.properties.voxel_type {
                return Err(ClientError::TypeMismatch {
                    wanted: self.properties.voxel_type,
                    actual: src.voxel_type(),
                });
            }
        }
        if coords.is_empty() {
            return Ok(());
        }

        let session_url = self.session_url()?;
        let block_dim = self.properties.block_dim(self.resolution)?;
        let elem_size = self.properties.voxel_type.element_size();
        let bytes_per_block = elem_size * block_dim.volume() as usize;
        let batches =
            plan_write_batches(coords.len(), bytes_per_block, &WriteBatchConfig::default());

        for indices in batches {
            let mut body = Vec::new();
            let mut url = session_url.clone();
            for &idx in &indices {
                let c = coords[idx];
                let block_size = self.properties.block_size(c, self.resolution)?;
                body.extend_from_slice(&encode(
                    srcs[idx],
                    src_offsets[idx],
                    block_size,
                    self.properties.voxel_type,
                ));
                url.push_str(&format!(
                    "/{}/{}/{}/{}/{}/{}",
                    c.x, c.y, c.z, self.timepoint, self.channel, self.angle
                ));
            }

            let headers = [(
                "Content-Type".to_string(),
                "application/octet-stream".to_string(),
            )];
            let response = self
                .transport
                .request(&url, HttpMethod::Post, Some(&body), &headers)?;
            if !(200..300).contains(&response.status) {
                log::warn!("block write {} returned status {}", url, response.status);
            }
        }
        Ok(())
    }

    /// Writes every valid block coordinate at this view's resolution, in
    /// row-major `(x, y, z)` order, in a single batched [`Self::write_blocks`]
    /// call.
    pub fn write_image(&self, img: &dyn VoxelGrid) -> Result<(), ClientError> {
        let block_dim = self.properties.block_dim(self.resolution)?;
        let counts = self.properties.block_count(self.resolution)?;

        let mut coords = Vec::new();
        let mut extents = Vec::new();
        for x in 0..counts.x {
            for y in 0..counts.y {
                for z in 0..counts.z {
                    let c = Vector3::new(x, y, z);
                    let size = self.properties.block_size(c, self.resolution)?;
                    coords.push(c);
                    extents.push(size);
                }
            }
        }

        let views: Vec<OffsetView> = coords
            .iter()
            .zip(extents.iter())
            .map(|(&c, &extent)| OffsetView {
                inner: img,
                offset: c * block_dim,
                extent,
            })
            .collect();
        let srcs: Vec<&dyn VoxelGrid> = views.iter().map(|v| v as &dyn VoxelGrid).collect();
        let src_offsets = vec![Vector3::splat(0); coords.len()];
        self.write_blocks(&coords, &srcs, &src_offsets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hpcds_core::{ResolutionLevel, VoxelType};
    use hpcds_transport::{HttpResponse, TransportError};
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory fake transport: a session handshake always redirects to
    /// `http://session`, GETs return whatever was last written to the
    /// matching block-endpoint URL (keyed by the coordinate suffix), and
    /// POSTs record their body under that key.
    struct FakeServer {
        blocks: RefCell<HashMap<String, Vec<u8>>>,
    }

    impl FakeServer {
        fn new() -> Self {
            Self {
                blocks: RefCell::new(HashMap::new()),
            }
        }
    }

    impl BlockTransport for FakeServer {
        fn request(
            &self,
            url: &str,
            method: HttpMethod,
            body: Option<&[u8]>,
            _headers: &[(String, String)],
        ) -> Result<HttpResponse, TransportError> {
            if url.ends_with("/read-write") {
                return Ok(HttpResponse {
                    status: 307,
                    headers: vec![("Location".to_string(), "http://session".to_string())],
                    body: Vec::new(),
                });
            }

            match method {
                HttpMethod::Get => {
                    let suffix = url.strip_prefix("http://session").unwrap_or(url);
                    let mut out = Vec::new();
                    for key in split_suffixes(suffix) {
                        if let Some(payload) = self.blocks.borrow().get(&key) {
                            out.extend_from_slice(payload);
                        }
                    }
                    Ok(HttpResponse {
                        status: 200,
                        headers: Vec::new(),
                        body: out,
                    })
                }
                HttpMethod::Post => {
                    let suffix = url.strip_prefix("http://session").unwrap_or(url);
                    let keys = split_suffixes(suffix);
                    let mut offset = 0usize;
                    let body = body.unwrap_or(&[]);
                    for key in keys {
                        let len = 12 + payload_volume(&body[offset..]) ;
                        self.blocks
                            .borrow_mut()
                            .insert(key, body[offset..offset + len].to_vec());
                        offset += len;
                    }
                    Ok(HttpResponse {
                        status: 200,
                        headers: Vec::new(),
                        body: Vec::new(),
                    })
                }
            }
        }
    }

    fn payload_volume(payload: &[u8]) -> usize {
        let bx = u32::from_le_bytes(payload[0..4].try_into().unwrap()) as usize;
        let by = u32::from_le_bytes(payload[4..8].try_into().unwrap()) as usize;
        let bz = u32::from_le_bytes(payload[8..12].try_into().unwrap()) as usize;
        // test-only fake server: every dataset here is uint8.
        bx * by * bz
    }

    /// Splits a concatenated suffix string like `/0/0/0/0/0/0/1/0/0/0/0/0`
    /// back into its six-segment chunks.
    fn split_suffixes(suffix: &str) -> Vec<String> {
        let parts: Vec<&str> = suffix.split('/').filter(|s| !s.is_empty()).collect();
        parts
            .chunks(6)
            .map(|chunk| format!("/{}", chunk.join("/")))
            .collect()
    }

    fn sample_properties() -> DatasetProperties {
        DatasetProperties {
            uuid: "ds-1".to_string(),
            label: "sample".to_string(),
            voxel_type: VoxelType::U8,
            compression: "none".to_string(),
            dimensions: Vector3::new(128, 64, 32),
            channels: 1,
            angles: 1,
            voxel_unit: "um".to_string(),
            voxel_resolution: None,
            timepoint_resolution: None,
            channel_resolution: None,
            angle_resolution: None,
            transformations: None,
            view_registrations: None,
            resolution_levels: vec![ResolutionLevel {
                resolutions: Vector3::splat(1),
                block_dimensions: Vector3::new(64, 64, 32),
            }],
            versions: vec![0],
            timepoint_ids: vec![0],
        }
    }

    fn test_view(server: Arc<FakeServer>) -> View {
        View::new(
            server,
            "http://host/datasets/ds-1".to_string(),
            Arc::new(sample_properties()),
            0,
            0,
            0,
            Vector3::splat(1),
            0,
        )
    }

    #[test]
    fn s2_single_block_round_trip() {
        let server = Arc::new(FakeServer::new());
        let view = test_view(server);

        let mut src = OwnedImage::zeroed(Vector3::new(64, 64, 32), VoxelType::U8);
        for i in 0..src.as_bytes().len() {
            src.set(
                Vector3::new(
                    (i % 64) as i32,
                    ((i / 64) % 64) as i32,
                    (i / (64 * 64)) as i32,
                ),
                hpcds_codec::Voxel::U8((i % 256) as u8),
            );
        }

        view.write_block(Vector3::splat(0), &src, Vector3::splat(0)).unwrap();
        let got = view.read_block(Vector3::splat(0)).unwrap();
        assert_eq!(got, src);
    }

    #[test]
    fn write_block_reads_from_a_nonzero_source_offset() {
        let server = Arc::new(FakeServer::new());
        let view = test_view(server);

        // A larger source buffer; the block content lives at a sub-volume
        // offset rather than at the source's own origin.
        let mut src = OwnedImage::zeroed(Vector3::new(96, 96, 48), VoxelType::U8);
        for i in 0..src.as_bytes().len() {
            src.set(
                Vector3::new(
                    (i % 96) as i32,
                    ((i / 96) % 96) as i32,
                    (i / (96 * 96)) as i32,
                ),
                hpcds_codec::Voxel::U8((i % 256) as u8),
            );
        }
        let offset = Vector3::new(16, 16, 8);

        view.write_block(Vector3::splat(0), &src, offset).unwrap();
        let got = view.read_block(Vector3::splat(0)).unwrap();

        for z in 0..32 {
            for y in 0..64 {
                for x in 0..64 {
                    let coord = Vector3::new(x, y, z);
                    assert_eq!(got.get(coord), src.get(offset + coord));
                }
            }
        }
    }

    #[test]
    fn read_blocks_into_rejects_mismatched_lengths() {
        let server = Arc::new(FakeServer::new());
        let view = test_view(server);
        let mut dest = OwnedImage::zeroed(Vector3::splat(4), VoxelType::U8);
        let err = view
            .read_blocks_into(&[Vector3::splat(0)], &mut dest, &[])
            .unwrap_err();
        assert!(matches!(err, ClientError::SizeMismatch { .. }));
    }

    #[test]
    fn read_blocks_into_rejects_invalid_coord() {
        let server = Arc::new(FakeServer::new());
        let view = test_view(server);
        let mut dest = OwnedImage::zeroed(Vector3::splat(4), VoxelType::U8);
        let err = view
            .read_blocks_into(&[Vector3::new(99, 99, 99)], &mut dest, &[Vector3::splat(0)])
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidCoord { .. }));
    }

    #[test]
    fn read_region_requires_start_strictly_less_than_end() {
        let server = Arc::new(FakeServer::new());
        let view = test_view(server);
        let err = view
            .read_region(Vector3::splat(4), Vector3::splat(4))
            .unwrap_err();
        assert!(matches!(err, ClientError::SizeMismatch { .. }));
    }

    #[test]
    fn unknown_timepoint_is_rejected() {
        let server = Arc::new(FakeServer::new());
        let mut view = test_view(server);
        view.timepoint = 7;
        let mut dest = OwnedImage::zeroed(Vector3::splat(4), VoxelType::U8);
        let err = view
            .read_blocks_into(&[Vector3::splat(0)], &mut dest, &[Vector3::splat(0)])
            .unwrap_err();
        assert!(matches!(err, ClientError::UnknownTimepoint(7)));
    }
}
