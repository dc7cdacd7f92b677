//! # geoid
//!
//! Lecture et interpolation des modèles de géoïde japonais.
//!
//! ## Features
//!
//! - Parsing des grilles ISG 2.0 (JPGEO2024) et ASC du GSI (GSIGEO2011)
//! - Modèle de grille unique (emprise, pas, orientation, nodata, buffer plat)
//! - Interpolation bilinéaire commune aux deux formats
//! - Lecture transparente des fichiers compressés `.bz2`
//! - `GeoidStore` : grille active remplaçable atomiquement
//!
//! ## Usage
//!
//! ```rust,ignore
//! use geoid::{GeoidLookup, GridFormat};
//! use std::path::Path;
//!
//! let grid = geoid::parse(Path::new("JPGEO2024.isg"))?;
//! match grid.query(35.6812, 139.7671) {
//!     GeoidLookup::Value(h) => println!("N = {:.3} m", h),
//!     other => println!("{}", other),
//! }
//! ```

pub mod archive;
pub mod error;
pub mod interpolate;
pub mod parser;
pub mod store;
pub mod types;

pub use error::GeoidError;
pub use store::{GeoidStore, LoadedGeoid};
pub use types::{GeoidGrid, GeoidLookup, GridFormat, GridHeader, Nodata, RowOrientation};

use std::path::Path;

/// Parse un fichier de grille ; le format est déduit de l'extension.
///
/// # Arguments
///
/// * `path` - Chemin vers un fichier `.isg` ou `.asc` (éventuellement `.bz2`)
///
/// # Errors
///
/// Retourne `GeoidError` si le fichier est illisible, si l'extension est
/// inconnue ou si le contenu est mal formé. Aucune grille partielle n'est
/// jamais renvoyée.
pub fn parse(path: &Path) -> Result<GeoidGrid, GeoidError> {
    let format = GridFormat::from_path(path)?;
    parse_with_format(path, format)
}

/// Parse un fichier de grille dans un format imposé
pub fn parse_with_format(path: &Path, format: GridFormat) -> Result<GeoidGrid, GeoidError> {
    let data = archive::read(path)?;
    parse_bytes(format, &data)
}

/// Parse le contenu brut d'un fichier de grille
pub fn parse_bytes(format: GridFormat, data: &[u8]) -> Result<GeoidGrid, GeoidError> {
    let text = parser::decode_text(data);

    match format {
        GridFormat::Isg => parser::isg::parse(&text),
        GridFormat::Asc => parser::asc::parse(&text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bytes_dispatch() {
        let isg = b"lat min:0\nlat max:1\nlon min:0\nlon max:1\n\
            delta lat:1\ndelta lon:1\nnrows:2\nncols:2\nnodata:-9999\n\
            end_of_head\n1.0 2.0 3.0 4.0\n";
        let grid = parse_bytes(GridFormat::Isg, isg).unwrap();
        assert_eq!(grid.header().orientation, RowOrientation::NorthToSouth);

        // Le même contenu n'est pas un ASC valide
        assert!(parse_bytes(GridFormat::Asc, isg).is_err());
    }

    #[test]
    fn test_parse_unknown_extension() {
        let result = parse(Path::new("model.grd"));
        assert!(matches!(result, Err(GeoidError::UnknownFormat(_))));
    }
}
