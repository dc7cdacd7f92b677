//! Parser pour les fichiers ISG 2.0 (ex: JPGEO2024.isg)
//!
//! En-tête `clé : valeur` ou `clé = valeur` jusqu'à la ligne `end_of_head`,
//! puis les valeurs de la grille ligne par ligne, du nord vers le sud.

use std::collections::HashMap;
use std::sync::OnceLock;

use memchr::memmem;
use regex::Regex;
use tracing::{debug, warn};

use super::{parse_body, parse_dimension, parse_f64};
use crate::types::{GeoidGrid, GridFormat, GridHeader, Nodata, RowOrientation};
use crate::GeoidError;

const FORMAT: GridFormat = GridFormat::Isg;

/// Sentinelle de fin d'en-tête
const END_OF_HEAD: &str = "end_of_head";

/// Parse un fichier ISG décodé
pub fn parse(text: &str) -> Result<GeoidGrid, GeoidError> {
    if memmem::find(text.as_bytes(), END_OF_HEAD.as_bytes()).is_none() {
        return Err(GeoidError::parse_error(
            FORMAT,
            "header sentinel 'end_of_head' not found",
        ));
    }

    let (header, body) = split_header(text)?;
    let grid_header = build_header(&header)?;

    let data = parse_body(FORMAT, body, grid_header.expected_len(FORMAT)?)?;
    check_extent(&grid_header);

    debug!(
        rows = grid_header.rows,
        cols = grid_header.cols,
        values = data.len(),
        "ISG grid parsed"
    );

    GeoidGrid::new(FORMAT, grid_header, data)
}

/// Sépare l'en-tête (clé → valeur) du corps
fn split_header(text: &str) -> Result<(HashMap<String, String>, &str), GeoidError> {
    let mut header = HashMap::new();
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        offset += line.len();
        let line = line.trim();

        if line.starts_with(END_OF_HEAD) {
            return Ok((header, &text[offset..]));
        }

        // Premier ':' ou '=' de la ligne
        if let Some(sep) = line.find([':', '=']) {
            let key = line[..sep].trim();
            let value = line[sep + 1..].trim();
            header.insert(key.to_string(), value.to_string());
        }
    }

    // La sentinelle n'est présente qu'au milieu d'une ligne
    Err(GeoidError::parse_error(
        FORMAT,
        "no line starts with 'end_of_head'",
    ))
}

fn build_header(header: &HashMap<String, String>) -> Result<GridHeader, GeoidError> {
    let angle = |field: &'static str| -> Result<f64, GeoidError> {
        let raw = required(header, field)?;
        parse_angle(field, raw)
    };

    let rows = parse_dimension(FORMAT, "nrows", required(header, "nrows")?)?;
    let cols = parse_dimension(FORMAT, "ncols", required(header, "ncols")?)?;
    let nodata = parse_f64(FORMAT, "nodata", required(header, "nodata")?)?;

    Ok(GridHeader {
        lat_min: angle("lat min")?,
        lat_max: angle("lat max")?,
        lon_min: angle("lon min")?,
        lon_max: angle("lon max")?,
        d_lat: angle("delta lat")?,
        d_lon: angle("delta lon")?,
        rows,
        cols,
        orientation: RowOrientation::NorthToSouth,
        nodata: Nodata::Sentinel(nodata),
    })
}

fn required<'a>(
    header: &'a HashMap<String, String>,
    field: &'static str,
) -> Result<&'a str, GeoidError> {
    header
        .get(field)
        .map(String::as_str)
        .filter(|v| !v.is_empty())
        .ok_or(GeoidError::MissingField {
            format: FORMAT,
            field,
        })
}

fn dms_regex() -> &'static Regex {
    static DMS: OnceLock<Regex> = OnceLock::new();
    DMS.get_or_init(|| {
        Regex::new(r#"(-?)(\d+)°(\d+)'([\d.]+)""#).expect("valid DMS regex")
    })
}

/// Angle décimal ou sexagésimal `D°M'S"` en degrés décimaux
pub fn parse_angle(field: &str, raw: &str) -> Result<f64, GeoidError> {
    if let Some(caps) = dms_regex().captures(raw) {
        let part = |i: usize| parse_f64(FORMAT, field, &caps[i]);
        let degrees = part(2)? + part(3)? / 60.0 + part(4)? / 3600.0;
        return Ok(if &caps[1] == "-" { -degrees } else { degrees });
    }

    parse_f64(FORMAT, field, raw)
}

/// Signale une emprise incohérente avec les dimensions (non bloquant)
fn check_extent(h: &GridHeader) {
    let tolerance = 1e-6;
    let lat_gap = (h.derived_lat_max() - h.lat_max).abs();
    let lon_gap = (h.derived_lon_max() - h.lon_max).abs();

    if lat_gap > tolerance * h.d_lat || lon_gap > tolerance * h.d_lon {
        warn!(
            lat_max = h.lat_max,
            derived_lat_max = h.derived_lat_max(),
            lon_max = h.lon_max,
            derived_lon_max = h.derived_lon_max(),
            "ISG header extent does not match nrows/ncols and deltas"
        );
    }
}
