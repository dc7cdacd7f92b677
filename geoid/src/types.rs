//! Types de données pour le crate geoid

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::GeoidError;

/// Format de fichier d'une grille de géoïde
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridFormat {
    /// ISG 2.0 (en-tête clé/valeur, ex: JPGEO2024.isg)
    Isg,
    /// Grille ASC du GSI (en-tête fixe de 6 champs, ex: gsigeo2011_ver2_2.asc)
    Asc,
}

impl GridFormat {
    /// Déduit le format depuis l'extension (`.isg`, `.asc`, éventuellement suivie de `.bz2`)
    pub fn from_path(path: &Path) -> Result<Self, GeoidError> {
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        let name = name.strip_suffix(".bz2").unwrap_or(&name);

        match name.rsplit('.').next() {
            Some("isg") => Ok(Self::Isg),
            Some("asc") => Ok(Self::Asc),
            _ => Err(GeoidError::UnknownFormat(path.display().to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Isg => "ISG",
            Self::Asc => "ASC",
        }
    }
}

impl fmt::Display for GridFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GridFormat {
    type Err = GeoidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "isg" => Ok(Self::Isg),
            "asc" => Ok(Self::Asc),
            _ => Err(GeoidError::UnknownFormat(s.to_string())),
        }
    }
}

/// Sens de stockage des lignes de la grille
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOrientation {
    /// Ligne 0 = latitude maximale (ISG)
    NorthToSouth,
    /// Ligne 0 = latitude minimale (ASC)
    SouthToNorth,
}

/// Représentation des cellules sans donnée
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Nodata {
    /// Valeur sentinelle exacte déclarée dans l'en-tête (ISG `nodata`)
    Sentinel(f64),
    /// Toute valeur supérieure ou égale au seuil est manquante (ASC)
    Threshold(f64),
}

impl Nodata {
    #[inline]
    pub fn is_nodata(self, value: f64) -> bool {
        match self {
            Self::Sentinel(sentinel) => value == sentinel,
            Self::Threshold(threshold) => value >= threshold,
        }
    }
}

/// Géométrie d'une grille : emprise, pas, dimensions, orientation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridHeader {
    /// Latitude minimale (degrés)
    pub lat_min: f64,
    /// Latitude maximale (degrés)
    pub lat_max: f64,
    /// Longitude minimale (degrés)
    pub lon_min: f64,
    /// Longitude maximale (degrés)
    pub lon_max: f64,
    /// Pas en latitude (degrés)
    pub d_lat: f64,
    /// Pas en longitude (degrés)
    pub d_lon: f64,
    /// Nombre de lignes
    pub rows: usize,
    /// Nombre de colonnes
    pub cols: usize,
    pub orientation: RowOrientation,
    pub nodata: Nodata,
}

impl GridHeader {
    /// Nombre de valeurs attendues dans le corps (`None` si `rows * cols` déborde)
    pub fn node_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    /// Nombre de valeurs attendues, ou erreur si les dimensions débordent
    pub fn expected_len(&self, format: GridFormat) -> Result<usize, GeoidError> {
        self.node_count().ok_or_else(|| {
            GeoidError::invalid_value(
                format,
                "nrows x ncols",
                format!("{} x {}", self.rows, self.cols),
            )
        })
    }

    /// Latitude maximale déduite de lat_min, du pas et du nombre de lignes
    pub fn derived_lat_max(&self) -> f64 {
        self.lat_min + self.rows.saturating_sub(1) as f64 * self.d_lat
    }

    /// Longitude maximale déduite de lon_min, du pas et du nombre de colonnes
    pub fn derived_lon_max(&self) -> f64 {
        self.lon_min + self.cols.saturating_sub(1) as f64 * self.d_lon
    }

    /// Vrai si (lat, lon) est dans l'emprise, bornes incluses
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.lat_min && lat <= self.lat_max && lon >= self.lon_min && lon <= self.lon_max
    }
}

/// Grille de géoïde normalisée (buffer plat, ligne par ligne)
///
/// Une grille n'est construite que complète : `data.len() == rows * cols`.
#[derive(Debug, Clone)]
pub struct GeoidGrid {
    header: GridHeader,
    data: Vec<f64>,
}

impl GeoidGrid {
    /// Construit une grille après vérification des invariants
    pub fn new(format: GridFormat, header: GridHeader, data: Vec<f64>) -> Result<Self, GeoidError> {
        if header.rows < 2 || header.cols < 2 {
            return Err(GeoidError::parse_error(
                format,
                format!(
                    "grid must have at least 2x2 nodes, got {}x{}",
                    header.rows, header.cols
                ),
            ));
        }
        for (field, step) in [("delta lat", header.d_lat), ("delta lon", header.d_lon)] {
            if !(step.is_finite() && step > 0.0) {
                return Err(GeoidError::invalid_value(format, field, step.to_string()));
            }
        }
        let expected = header.expected_len(format)?;
        if data.len() != expected {
            return Err(GeoidError::DimensionMismatch {
                format,
                expected,
                found: data.len(),
            });
        }

        Ok(Self { header, data })
    }

    pub fn header(&self) -> &GridHeader {
        &self.header
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn rows(&self) -> usize {
        self.header.rows
    }

    pub fn cols(&self) -> usize {
        self.header.cols
    }

    /// Valeur brute au noeud (row, col)
    #[inline]
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.header.rows || col >= self.header.cols {
            return None;
        }
        self.data.get(row * self.header.cols + col).copied()
    }
}

/// Résultat d'une interrogation du géoïde
///
/// Ce ne sont pas des erreurs : l'appelant choisit comment afficher chaque cas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeoidLookup {
    /// Ondulation du géoïde en mètres
    Value(f64),
    /// Coordonnée hors de l'emprise de la grille
    OutOfBounds,
    /// Au moins un des quatre noeuds voisins est sans donnée
    NoData,
    /// Aucune grille chargée
    Unloaded,
}

impl GeoidLookup {
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for GeoidLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{:.3} m", v),
            Self::OutOfBounds => f.write_str("out of bounds"),
            Self::NoData => f.write_str("no data"),
            Self::Unloaded => f.write_str("not loaded"),
        }
    }
}
