//! Parsers des formats de grille (ISG 2.0, ASC GSI)

pub mod asc;
pub mod isg;

use std::borrow::Cow;

use crate::types::GridFormat;
use crate::GeoidError;

/// Décode le texte d'un fichier de grille
///
/// UTF-8 en priorité ; sinon Shift_JIS (fichiers distribués par le GSI).
pub fn decode_text(data: &[u8]) -> Cow<'_, str> {
    match simdutf8::basic::from_utf8(data) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            let (decoded, _, had_errors) = encoding_rs::SHIFT_JIS.decode(data);
            if had_errors {
                tracing::warn!("Grid file is neither UTF-8 nor Shift_JIS, some characters were replaced");
            }
            decoded
        }
    }
}

/// Lit un nombre décimal (point flottant) d'un champ
pub(crate) fn parse_f64(format: GridFormat, field: &str, raw: &str) -> Result<f64, GeoidError> {
    let raw = raw.trim();
    fast_float::parse::<f64, _>(raw).map_err(|_| GeoidError::invalid_value(format, field, raw))
}

/// Lit une dimension (nombre de lignes/colonnes)
///
/// Accepte une écriture flottante entière (`1801.0`).
pub(crate) fn parse_dimension(
    format: GridFormat,
    field: &str,
    raw: &str,
) -> Result<usize, GeoidError> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<usize>() {
        return Ok(n);
    }
    match fast_float::parse::<f64, _>(raw) {
        Ok(v) if v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 => Ok(v as usize),
        _ => Err(GeoidError::invalid_value(format, field, raw)),
    }
}

/// Découpe le corps en valeurs flottantes (séparateurs : tout blanc ASCII)
///
/// `expected` vient de l'en-tête : la préallocation est bornée par la taille
/// du corps, une valeur occupant au moins deux octets avec son séparateur.
pub(crate) fn parse_body(
    format: GridFormat,
    body: &str,
    expected: usize,
) -> Result<Vec<f64>, GeoidError> {
    let mut values = Vec::with_capacity(expected.min(body.len() / 2 + 1));

    for (index, token) in body.split_ascii_whitespace().enumerate() {
        let value = fast_float::parse::<f64, _>(token).map_err(|_| {
            GeoidError::parse_error(
                format,
                format!("invalid value '{}' at body position {}", token, index),
            )
        })?;
        values.push(value);
    }

    Ok(values)
}
