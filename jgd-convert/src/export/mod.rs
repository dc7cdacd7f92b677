//! Modules d'export (CSV, KML, GeoJSON)

pub mod csv;
pub mod geojson;
pub mod kml;

use std::path::Path;

use anyhow::Result;
use clap::ValueEnum;

use crate::batch::ConvertedPoint;

/// Format de sortie d'un lot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    /// Tableau name,lat,lon,lat_dms,lon_dms,geoid
    #[default]
    Csv,
    /// Document KML (Google Earth)
    Kml,
    /// FeatureCollection de points
    Geojson,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Kml => "kml",
            Self::Geojson => "geojson",
        }
    }

    /// Déduit le format depuis l'extension du fichier de sortie
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "kml" => Some(Self::Kml),
            "geojson" | "json" => Some(Self::Geojson),
            _ => None,
        }
    }
}

/// Exporte les points dans le format demandé
pub fn export_points(points: &[ConvertedPoint], format: ExportFormat, output_path: &Path) -> Result<()> {
    match format {
        ExportFormat::Csv => csv::export_to_csv(points, output_path),
        ExportFormat::Kml => kml::export_to_kml(points, output_path),
        ExportFormat::Geojson => geojson::export_to_geojson(points, output_path),
    }
}
