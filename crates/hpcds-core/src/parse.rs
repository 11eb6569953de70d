//! Dataset metadata JSON decoding.
//!
//! The decoder is a small dispatch over JSON *shapes* — basic scalar, scalar
//! triple, ordered sequence, optional, resolution-unit, level list — rather
//! than one monolithic `#[derive(Deserialize)]` over the whole document.
//! Each shape decoder either returns the parsed value or logs a warning and
//! recovers a zero/empty default, logging `"<field> was not found"` and
//! continuing rather than aborting the parse.

use serde_json::Value;

use crate::{CoreError, ResolutionLevel, ResolutionUnit, Vector3, VoxelType};
use crate::DatasetProperties;

/// Parses a dataset metadata document into [`DatasetProperties`].
///
/// # Errors
/// Returns [`CoreError::Codec`] only when `json_str` is not valid JSON, or
/// the top-level value is not a JSON object. Missing or malformed
/// individual fields (required or optional) are logged as warnings and
/// recovered into zero/empty defaults; they never abort the parse.
pub fn parse_properties(json_str: &str) -> Result<DatasetProperties, CoreError> {
    let root: Value = serde_json::from_str(json_str)?;
    let Some(root) = root.as_object() else {
        return Err(CoreError::MalformedMetadata {
            field: "$",
            reason: "top-level document is not a JSON object".to_string(),
        });
    };

    let uuid = scalar_string(root, "uuid");
    let label = scalar_string(root, "label");
    let voxel_type = scalar_string(root, "voxelType");
    let voxel_type = match VoxelType::parse(&voxel_type) {
        Ok(ty) => ty,
        Err(_) if voxel_type.is_empty() => VoxelType::U8,
        Err(err) => {
            log::warn!("voxelType `{voxel_type}` is not a recognized voxel type: {err}");
            VoxelType::U8
        }
    };
    let compression = scalar_string(root, "compression");
    let dimensions = scalar_triple_i32(root, "dimensions");
    let channels = scalar_i32(root, "channels");
    let angles = scalar_i32(root, "angles");
    let voxel_unit = scalar_string(root, "voxelUnit");

    let voxel_resolution = optional_triple_f64(root, "voxelResolution");
    let timepoint_resolution = optional_resolution_unit(root, "timepointResolution");
    let channel_resolution = optional_resolution_unit(root, "channelResolution");
    let angle_resolution = optional_resolution_unit(root, "angleResolution");
    let transformations = optional_string(root, "transformations");
    let view_registrations = optional_string(root, "viewRegistrations");

    let resolution_levels = resolution_level_list(root, "resolutionLevels");
    let versions = ordered_i32_sequence(root, "versions");
    let timepoint_ids = ordered_i32_sequence(root, "timepointIds");

    Ok(DatasetProperties {
        uuid,
        label,
        voxel_type,
        compression,
        dimensions,
        channels,
        angles,
        voxel_unit,
        voxel_resolution,
        timepoint_resolution,
        channel_resolution,
        angle_resolution,
        transformations,
        view_registrations,
        resolution_levels,
        versions,
        timepoint_ids,
    })
}

fn warn_missing(field: &str) {
    log::warn!("metadata field `{field}` was not found; recovering default");
}

fn warn_malformed(field: &str, reason: &str) {
    log::warn!("metadata field `{field}` was malformed ({reason}); recovering default");
}

fn scalar_string(root: &serde_json::Map<String, Value>, field: &'static str) -> String {
    match root.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(_) => {
            warn_malformed(field, "expected a string");
            String::new()
        }
        None => {
            warn_missing(field);
            String::new()
        }
    }
}

fn scalar_i32(root: &serde_json::Map<String, Value>, field: &'static str) -> i32 {
    match root.get(field).and_then(Value::as_i64) {
        Some(n) => n as i32,
        None => {
            if root.contains_key(field) {
                warn_malformed(field, "expected an integer");
            } else {
                warn_missing(field);
            }
            0
        }
    }
}

fn triple_i32_from_value(value: &Value) -> Option<Vector3<i32>> {
    let arr = value.as_array()?;
    if arr.len() != 3 {
        return None;
    }
    let x = arr[0].as_i64()? as i32;
    let y = arr[1].as_i64()? as i32;
    let z = arr[2].as_i64()? as i32;
    Some(Vector3::new(x, y, z))
}

fn scalar_triple_i32(root: &serde_json::Map<String, Value>, field: &'static str) -> Vector3<i32> {
    match root.get(field) {
        Some(value) => match triple_i32_from_value(value) {
            Some(v) => v,
            None => {
                warn_malformed(field, "expected a 3-element integer array");
                Vector3::splat(0)
            }
        },
        None => {
            warn_missing(field);
            Vector3::splat(0)
        }
    }
}

fn optional_string(root: &serde_json::Map<String, Value>, field: &str) -> Option<String> {
    match root.get(field) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            warn_malformed(field, "expected a string");
            None
        }
        None => None,
    }
}

fn triple_f64_from_value(value: &Value) -> Option<Vector3<f64>> {
    let arr = value.as_array()?;
    if arr.len() != 3 {
        return None;
    }
    let x = arr[0].as_f64()?;
    let y = arr[1].as_f64()?;
    let z = arr[2].as_f64()?;
    Some(Vector3::new(x, y, z))
}

fn optional_triple_f64(
    root: &serde_json::Map<String, Value>,
    field: &str,
) -> Option<Vector3<f64>> {
    match root.get(field) {
        Some(value) => match triple_f64_from_value(value) {
            Some(v) => Some(v),
            None => {
                warn_malformed(field, "expected a 3-element number array");
                None
            }
        },
        None => None,
    }
}

fn optional_resolution_unit(
    root: &serde_json::Map<String, Value>,
    field: &str,
) -> Option<ResolutionUnit> {
    let obj = root.get(field)?.as_object()?;
    let value = obj.get("value").and_then(Value::as_f64);
    let unit = obj.get("unit").and_then(Value::as_str);
    match (value, unit) {
        (Some(value), Some(unit)) => Some(ResolutionUnit {
            value,
            unit: unit.to_string(),
        }),
        _ => {
            warn_malformed(field, "expected `{value, unit}`");
            None
        }
    }
}

fn ordered_i32_sequence(root: &serde_json::Map<String, Value>, field: &'static str) -> Vec<i32> {
    match root.get(field).and_then(Value::as_array) {
        Some(arr) => arr.iter().filter_map(Value::as_i64).map(|v| v as i32).collect(),
        None => {
            warn_missing(field);
            Vec::new()
        }
    }
}

fn resolution_level_list(
    root: &serde_json::Map<String, Value>,
    field: &'static str,
) -> Vec<ResolutionLevel> {
    let Some(levels) = root.get(field).and_then(Value::as_array) else {
        warn_missing(field);
        return Vec::new();
    };

    levels
        .iter()
        .filter_map(|level| {
            let obj = level.as_object()?;
            let resolutions = obj.get("resolutions").and_then(triple_i32_from_value);
            let block_dimensions = obj.get("blockDimensions").and_then(triple_i32_from_value);
            match (resolutions, block_dimensions) {
                (Some(resolutions), Some(block_dimensions)) => Some(ResolutionLevel {
                    resolutions,
                    block_dimensions,
                }),
                _ => {
                    warn_malformed(
                        "resolutionLevels[]",
                        "expected `resolutions` and `blockDimensions` 3-element arrays",
                    );
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> String {
        serde_json::json!({
            "uuid": "ds-1",
            "label": "sample",
            "voxelType": "uint16",
            "compression": "none",
            "dimensions": [128, 64, 32],
            "channels": 1,
            "angles": 1,
            "voxelUnit": "um",
            "versions": [0, 1],
            "timepointIds": [0],
            "resolutionLevels": [
                {"resolutions": [1, 1, 1], "blockDimensions": [64, 64, 32]},
                {"resolutions": [2, 2, 2], "blockDimensions": [64, 64, 32]}
            ]
        })
        .to_string()
    }

    #[test]
    fn parses_full_document() {
        let props = parse_properties(&sample_document()).unwrap();
        assert_eq!(props.uuid, "ds-1");
        assert_eq!(props.voxel_type, VoxelType::U16);
        assert_eq!(props.dimensions, Vector3::new(128, 64, 32));
        assert_eq!(props.resolution_levels.len(), 2);
        assert_eq!(props.versions, vec![0, 1]);
        assert!(props.voxel_resolution.is_none());
    }

    #[test]
    fn missing_required_fields_recover_defaults_instead_of_erroring() {
        let props = parse_properties("{}").unwrap();
        assert_eq!(props.uuid, "");
        assert_eq!(props.dimensions, Vector3::splat(0));
        assert!(props.resolution_levels.is_empty());
        assert!(props.versions.is_empty());
    }

    #[test]
    fn invalid_json_is_rejected() {
        assert!(parse_properties("not json").is_err());
    }

    #[test]
    fn optional_resolution_unit_is_absent_when_not_present() {
        let props = parse_properties(&sample_document()).unwrap();
        assert!(props.timepoint_resolution.is_none());
    }
}
