//! Types d'erreurs pour le crate geoid

use thiserror::Error;

use crate::types::GridFormat;

/// Erreurs pouvant survenir lors du chargement d'une grille de géoïde
#[derive(Debug, Error)]
pub enum GeoidError {
    /// Erreur d'I/O lors de la lecture du fichier
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Fichier mal formé (sentinelle absente, en-tête illisible, ...)
    #[error("Parse error in {format} grid: {reason}")]
    Parse { format: GridFormat, reason: String },

    /// Champ d'en-tête obligatoire absent
    #[error("Missing header field '{field}' in {format} grid")]
    MissingField {
        format: GridFormat,
        field: &'static str,
    },

    /// Valeur d'en-tête non numérique ou hors domaine
    #[error("Invalid value for '{field}' in {format} grid: {value}")]
    InvalidValue {
        format: GridFormat,
        field: String,
        value: String,
    },

    /// Nombre de valeurs du corps différent de nrows × ncols
    #[error("{format} grid declares {expected} values but body contains {found}")]
    DimensionMismatch {
        format: GridFormat,
        expected: usize,
        found: usize,
    },

    /// Format non reconnu (extension de fichier inconnue)
    #[error("Unknown grid format: {0}")]
    UnknownFormat(String),
}

impl GeoidError {
    /// Crée une erreur de parsing avec contexte
    pub fn parse_error(format: GridFormat, reason: impl Into<String>) -> Self {
        Self::Parse {
            format,
            reason: reason.into(),
        }
    }

    /// Crée une erreur de valeur invalide
    pub fn invalid_value(
        format: GridFormat,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            format,
            field: field.into(),
            value: value.into(),
        }
    }

    /// Vrai si l'erreur provient du contenu du fichier (et non de l'I/O)
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::Parse { .. }
                | Self::MissingField { .. }
                | Self::InvalidValue { .. }
                | Self::DimensionMismatch { .. }
        )
    }
}
