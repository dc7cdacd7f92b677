//! # jgd-convert
//!
//! Conversion des coordonnées planes rectangulaires JGD2011 (systèmes I à XIX)
//! en latitude/longitude GRS80, avec hauteur du géoïde.
//!
//! ## Features
//!
//! - Inverse de Gauss-Krüger (série de Kawase, ordre 5)
//! - Modèles de géoïde JPGEO2024 (ISG) et GSIGEO2011 (ASC), chargement asynchrone
//! - Conversion par lot en parallèle depuis un CSV `nom,x,y`
//! - Export CSV, KML et GeoJSON
//! - CLI simple
//!
//! ## Usage CLI
//!
//! ```bash
//! # Un point du système IX (Tokyo)
//! jgd-convert convert --system 9 --x -36000 --y -6000
//!
//! # Un fichier de points vers KML
//! jgd-convert batch --input points.csv --system 9 --format kml
//!
//! # Ondulation du géoïde
//! jgd-convert geoid --lat 35.6812 --lon 139.7671 --model GSIGEO2011
//! ```

pub mod batch;
pub mod config;
pub mod export;
pub mod loader;
pub mod plane;
pub mod report;

pub use config::Config;
pub use plane::{convert, ConvertError, Geodetic, PlaneProjection};
pub use report::{BatchReport, BatchStatus};
