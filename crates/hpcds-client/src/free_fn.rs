use std::sync::Arc;

use hpcds_codec::{OwnedImage, VoxelGrid};
use hpcds_core::Vector3;
use hpcds_transport::BlockTransport;

use crate::{ClientError, DatasetClient};

/// Selector defaults for the top-level [`read_image`] and [`write_image`]
/// entry points.
///
/// Rust has no defaulted function parameters, so this struct plus
/// `..Default::default()` functional-update syntax is the idiomatic stand-in
/// for defaulted `channel`, `timepoint`, `angle`, `resolution`, and `version`
/// arguments.
#[derive(Debug, Clone, Copy)]
pub struct Selectors {
    /// Channel index. Defaults to `0`.
    pub channel: i32,
    /// Timepoint id. Defaults to `0`.
    pub timepoint: i32,
    /// Angle index. Defaults to `0`.
    pub angle: i32,
    /// Resolution level factor. Defaults to the base level `(1,1,1)`.
    pub resolution: Vector3<i32>,
    /// Dataset version. `None` resolves to the highest declared version.
    pub version: Option<i32>,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            channel: 0,
            timepoint: 0,
            angle: 0,
            resolution: Vector3::splat(1),
            version: None,
        }
    }
}

fn latest_version(versions: &[i32]) -> i32 {
    versions.iter().copied().max().unwrap_or(0)
}

/// Reads the whole image for `(ip, port, uuid)` under `selectors`, fetching
/// metadata fresh.
pub fn read_image(
    transport: Arc<dyn BlockTransport>,
    ip: &str,
    port: u16,
    uuid: &str,
    selectors: Selectors,
) -> Result<OwnedImage, ClientError> {
    let client = DatasetClient::new(transport, ip, port, uuid);
    let properties = client.properties()?;
    let version = selectors.version.unwrap_or_else(|| latest_version(&properties.versions));
    client
        .get_view_with_properties(
            Arc::new(properties),
            selectors.channel,
            selectors.timepoint,
            selectors.angle,
            selectors.resolution,
            version,
        )
        .read_image()
}

/// Writes the whole image for `(ip, port, uuid)` under `selectors`, fetching
/// metadata fresh.
pub fn write_image(
    transport: Arc<dyn BlockTransport>,
    img: &dyn VoxelGrid,
    ip: &str,
    port: u16,
    uuid: &str,
    selectors: Selectors,
) -> Result<(), ClientError> {
    let client = DatasetClient::new(transport, ip, port, uuid);
    let properties = client.properties()?;
    let version = selectors.version.unwrap_or_else(|| latest_version(&properties.versions));
    client
        .get_view_with_properties(
            Arc::new(properties),
            selectors.channel,
            selectors.timepoint,
            selectors.angle,
            selectors.resolution,
            version,
        )
        .write_image(img)
}
