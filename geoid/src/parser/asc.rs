//! Parser pour les grilles ASC du GSI (ex: gsigeo2011_ver2_2.asc)
//!
//! Première ligne : `lat_min lon_min d_lat d_lon nrows ncols [...]`
//! (ex: `20.00000 120.00000 0.016667 0.025000 1801 1201 1 ver2.2`),
//! puis les valeurs ligne par ligne, du sud vers le nord.

use tracing::debug;

use super::{parse_body, parse_dimension, parse_f64};
use crate::types::{GeoidGrid, GridFormat, GridHeader, Nodata, RowOrientation};
use crate::GeoidError;

const FORMAT: GridFormat = GridFormat::Asc;

/// Seuil nodata : les cellules sans mesure valent 999.0000
pub const NODATA_THRESHOLD: f64 = 990.0;

/// Noms des 6 champs de l'en-tête, dans l'ordre
const HEADER_FIELDS: [&str; 6] = ["lat min", "lon min", "delta lat", "delta lon", "nrows", "ncols"];

/// Parse un fichier ASC décodé
pub fn parse(text: &str) -> Result<GeoidGrid, GeoidError> {
    let text = text.trim_start();
    let (first_line, body) = text.split_once('\n').unwrap_or((text, ""));

    let tokens: Vec<&str> = first_line.split_ascii_whitespace().take(6).collect();
    if tokens.len() < HEADER_FIELDS.len() {
        return Err(GeoidError::parse_error(
            FORMAT,
            format!(
                "header needs 6 fields (lat_min lon_min d_lat d_lon nrows ncols), found {}",
                tokens.len()
            ),
        ));
    }

    let lat_min = parse_f64(FORMAT, HEADER_FIELDS[0], tokens[0])?;
    let lon_min = parse_f64(FORMAT, HEADER_FIELDS[1], tokens[1])?;
    let d_lat = parse_f64(FORMAT, HEADER_FIELDS[2], tokens[2])?;
    let d_lon = parse_f64(FORMAT, HEADER_FIELDS[3], tokens[3])?;
    let rows = parse_dimension(FORMAT, HEADER_FIELDS[4], tokens[4])?;
    let cols = parse_dimension(FORMAT, HEADER_FIELDS[5], tokens[5])?;

    let mut header = GridHeader {
        lat_min,
        lat_max: lat_min,
        lon_min,
        lon_max: lon_min,
        d_lat,
        d_lon,
        rows,
        cols,
        orientation: RowOrientation::SouthToNorth,
        nodata: Nodata::Threshold(NODATA_THRESHOLD),
    };
    // L'emprise maximale est déduite, jamais lue
    header.lat_max = header.derived_lat_max();
    header.lon_max = header.derived_lon_max();

    let data = parse_body(FORMAT, body, header.expected_len(FORMAT)?)?;

    debug!(
        rows = header.rows,
        cols = header.cols,
        values = data.len(),
        "ASC grid parsed"
    );

    GeoidGrid::new(FORMAT, header, data)
}
