//! Conversion par lot : fichier CSV `nom,x,y`
//!
//! Pas de ligne d'en-tête. Les lignes de moins de 3 champs ou dont x/y ne
//! sont pas des nombres finis sont ignorées et comptées.

use std::path::Path;

use anyhow::{Context, Result};
use geoid::{GeoidLookup, LoadedGeoid};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::plane::{ConvertError, Geodetic, PlaneProjection};

/// Ligne d'entrée valide
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRow {
    /// Numéro de ligne (1-based) dans le fichier source
    pub line: usize,
    pub name: String,
    pub x: f64,
    pub y: f64,
}

/// Contenu d'un fichier d'entrée
#[derive(Debug, Default)]
pub struct BatchInput {
    pub rows: Vec<BatchRow>,
    /// Lignes ignorées (champs manquants ou non numériques)
    pub skipped: usize,
}

/// Point converti
#[derive(Debug, Clone, Serialize)]
pub struct ConvertedPoint {
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(flatten)]
    pub position: Geodetic,
    #[serde(skip)]
    pub geoid: GeoidLookup,
}

impl ConvertedPoint {
    /// Ondulation si disponible
    pub fn geoid_height(&self) -> Option<f64> {
        self.geoid.value()
    }
}

/// Résultat de la conversion d'un lot
#[derive(Debug, Default)]
pub struct BatchOutput {
    /// Points convertis, dans l'ordre du fichier
    pub points: Vec<ConvertedPoint>,
    /// Lignes rejetées par la projection
    pub failures: Vec<(usize, ConvertError)>,
}

/// Lit un fichier CSV (UTF-8 ou Shift_JIS)
pub fn read_file(path: &Path) -> Result<BatchInput> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    let text = geoid::parser::decode_text(&bytes);
    let input = read_rows(text.as_bytes())
        .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;

    info!(
        path = %path.display(),
        rows = input.rows.len(),
        skipped = input.skipped,
        "Batch input read"
    );
    Ok(input)
}

/// Lit les lignes `nom,x,y`
pub fn read_rows<R: std::io::Read>(reader: R) -> Result<BatchInput> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut input = BatchInput::default();

    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(index + 1);

        if record.iter().all(str::is_empty) {
            continue;
        }

        match parse_record(&record) {
            Some((name, x, y)) => input.rows.push(BatchRow { line, name, x, y }),
            None => {
                debug!(line, record = ?record, "Skipping CSV row");
                input.skipped += 1;
            }
        }
    }

    Ok(input)
}

fn parse_record(record: &csv::StringRecord) -> Option<(String, f64, f64)> {
    if record.len() < 3 {
        return None;
    }
    let x: f64 = record.get(1)?.parse().ok()?;
    let y: f64 = record.get(2)?.parse().ok()?;
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    Some((record.get(0)?.to_string(), x, y))
}

/// Convertit les lignes en parallèle et interroge le géoïde
///
/// `geoid` est un instantané de la grille active : toutes les lignes sont
/// interrogées sur la même grille, même si un autre chargement survient.
pub fn convert_rows(
    rows: &[BatchRow],
    projection: &PlaneProjection,
    geoid: Option<&LoadedGeoid>,
) -> BatchOutput {
    let results: Vec<Result<ConvertedPoint, (usize, ConvertError)>> = rows
        .par_iter()
        .map(|row| {
            let position = projection
                .to_geodetic(row.x, row.y)
                .map_err(|e| (row.line, e))?;
            let geoid = match geoid {
                Some(loaded) => loaded.grid.query(position.lat, position.lon),
                None => GeoidLookup::Unloaded,
            };
            Ok(ConvertedPoint {
                name: row.name.clone(),
                x: row.x,
                y: row.y,
                position,
                geoid,
            })
        })
        .collect();

    let mut output = BatchOutput::default();
    for result in results {
        match result {
            Ok(point) => output.points.push(point),
            Err(failure) => output.failures.push(failure),
        }
    }
    output
}
