//! Export CSV des points convertis

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::batch::ConvertedPoint;
use crate::plane::to_dms;

const HEADER: [&str; 6] = ["name", "lat", "lon", "lat_dms", "lon_dms", "geoid"];

/// Exporte des points en CSV
pub fn export_to_csv(points: &[ConvertedPoint], output_path: &Path) -> Result<()> {
    let file = File::create(output_path)
        .context(format!("Failed to create file: {}", output_path.display()))?;
    write_csv(BufWriter::new(file), points)
}

/// Écrit l'en-tête puis une ligne par point
///
/// Latitude et longitude à 8 décimales, ondulation à 3 décimales (colonne
/// vide si le géoïde ne donne pas de valeur).
pub fn write_csv<W: Write>(writer: W, points: &[ConvertedPoint]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(HEADER)?;

    for point in points {
        let lat = format!("{:.8}", point.position.lat);
        let lon = format!("{:.8}", point.position.lon);
        let lat_dms = to_dms(point.position.lat);
        let lon_dms = to_dms(point.position.lon);
        let geoid = point
            .geoid_height()
            .map(|h| format!("{:.3}", h))
            .unwrap_or_default();

        writer.write_record([
            point.name.as_str(),
            lat.as_str(),
            lon.as_str(),
            lat_dms.as_str(),
            lon_dms.as_str(),
            geoid.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
