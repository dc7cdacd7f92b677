//! Export GeoJSON (FeatureCollection de points, WGS84 / JGD2011)

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
use serde_json::json;

use crate::batch::ConvertedPoint;
use crate::plane::to_dms;

/// Exporte des points en GeoJSON
pub fn export_to_geojson(points: &[ConvertedPoint], output_path: &Path) -> Result<()> {
    let file = File::create(output_path)
        .context(format!("Failed to create file: {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer(&mut writer, &to_feature_collection(points))
        .context("Failed to write GeoJSON")?;
    writer.flush()?;

    Ok(())
}

/// Construit la FeatureCollection
pub fn to_feature_collection(points: &[ConvertedPoint]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: points.iter().map(to_feature).collect(),
        foreign_members: None,
    }
}

fn to_feature(point: &ConvertedPoint) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("name".to_string(), json!(point.name));
    properties.insert("x".to_string(), json!(point.x));
    properties.insert("y".to_string(), json!(point.y));
    properties.insert("lat_dms".to_string(), json!(to_dms(point.position.lat)));
    properties.insert("lon_dms".to_string(), json!(to_dms(point.position.lon)));
    properties.insert("geoid".to_string(), json!(point.geoid_height()));
    properties.insert("geoid_status".to_string(), json!(point.geoid.to_string()));

    Feature {
        bbox: None,
        geometry: Some(Geometry::from(&point.position.to_point())),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}
