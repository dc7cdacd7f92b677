//! Conversion des coordonnées planes rectangulaires JGD2011 vers GRS80
//!
//! Inverse de Gauss-Krüger par la série de Kawase tronquée à l'ordre 5.
//! Les 19 systèmes japonais partagent l'ellipsoïde GRS80 et m0 = 0.9999 ;
//! seule l'origine change.
//!
//! Convention japonaise : `x` est l'axe nord, `y` l'axe est.

mod dms;
mod ellipsoid;
mod origins;

pub use dms::to_dms;
pub use ellipsoid::{KawaseSeries, GRS80, M0};
pub use origins::{is_valid_system, origin_of, Origin, SYSTEM_COUNT};

use serde::Serialize;
use thiserror::Error;

/// Erreurs de conversion
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    #[error("Invalid system number {0} (expected 1..=19)")]
    InvalidSystem(u8),

    #[error("Invalid input coordinates: x={x}, y={y}")]
    InvalidInput { x: f64, y: f64 },
}

/// Position géodésique en degrés décimaux
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geodetic {
    pub lat: f64,
    pub lon: f64,
}

impl Geodetic {
    /// Point `geo` (x = longitude, y = latitude)
    pub fn to_point(self) -> geo::Point<f64> {
        geo::Point::new(self.lon, self.lat)
    }

    /// Lien vers la carte du GSI, zoom 15
    pub fn map_url(&self) -> String {
        format!("https://maps.gsi.go.jp/#15/{}/{}/", self.lat, self.lon)
    }
}

/// Projection d'un système donné, origine précalculée
#[derive(Debug, Clone)]
pub struct PlaneProjection {
    system: u8,
    origin: Origin,
    lon0: f64,
    /// Arc de méridien de l'équateur à la latitude origine
    s_phi0: f64,
    series: &'static KawaseSeries,
}

impl PlaneProjection {
    /// Crée la projection du système `system` (1..=19)
    pub fn new(system: u8) -> Result<Self, ConvertError> {
        let origin = origin_of(system).ok_or(ConvertError::InvalidSystem(system))?;
        let series = KawaseSeries::grs80();

        Ok(Self {
            system,
            origin,
            lon0: origin.lon.to_radians(),
            s_phi0: series.meridian_arc(origin.lat.to_radians()),
            series,
        })
    }

    pub fn system(&self) -> u8 {
        self.system
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Arc de méridien S_φ0 (mètres, échelle m0)
    pub fn meridian_arc_at_origin(&self) -> f64 {
        self.s_phi0
    }

    /// Convertit (x nord, y est) en mètres vers (lat, lon) en degrés
    pub fn to_geodetic(&self, x: f64, y: f64) -> Result<Geodetic, ConvertError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ConvertError::InvalidInput { x, y });
        }

        let s = self.series;
        let xi = (x + self.s_phi0) / s.a_bar;
        let eta = y / s.a_bar;

        let mut xi_p = xi;
        let mut eta_p = eta;
        for j in 1..6 {
            let k = 2.0 * j as f64;
            xi_p -= s.b[j] * (k * xi).sin() * (k * eta).cosh();
            eta_p -= s.b[j] * (k * xi).cos() * (k * eta).sinh();
        }

        // Latitude conforme
        let chi = (xi_p.sin() / eta_p.cosh()).asin();

        let delta: f64 = (1..6)
            .map(|j| s.d[j] * (2.0 * j as f64 * chi).sin())
            .sum();

        // Le facteur (1+n)/(1-n) est appliqué deux fois ; avec D1..D5 sans terme
        // d'ordre 1 c'est ce qui restitue la latitude géodésique
        let ratio = (1.0 + s.n) / (1.0 - s.n);
        let t_psi = ratio * (chi + delta).tan();
        let phi = (ratio * t_psi).atan();

        let lambda = self.lon0 + (eta_p.sinh() / xi_p.cos()).atan();

        Ok(Geodetic {
            lat: phi.to_degrees(),
            lon: lambda.to_degrees(),
        })
    }
}

/// Convertit des coordonnées planes du système `system` en (lat, lon)
///
/// # Errors
///
/// `InvalidSystem` hors de 1..=19, `InvalidInput` si x ou y n'est pas fini.
pub fn convert(system: u8, x: f64, y: f64) -> Result<Geodetic, ConvertError> {
    PlaneProjection::new(system)?.to_geodetic(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_origin_maps_to_itself() {
        for system in 1..=SYSTEM_COUNT {
            let origin = origin_of(system).unwrap();
            let result = convert(system, 0.0, 0.0).unwrap();
            assert!((result.lat - origin.lat).abs() < EPS, "system {}: {:?}", system, result);
            assert!((result.lon - origin.lon).abs() < EPS, "system {}: {:?}", system, result);
        }
    }

    #[test]
    fn test_negative_arc_maps_to_equator() {
        for system in 1..=SYSTEM_COUNT {
            let proj = PlaneProjection::new(system).unwrap();
            let result = proj.to_geodetic(-proj.meridian_arc_at_origin(), 0.0).unwrap();
            assert!(result.lat.abs() < EPS, "system {}: {:?}", system, result);
            assert!((result.lon - proj.origin().lon).abs() < EPS);
        }
    }

    #[test]
    fn test_meridian_arc_values() {
        let cases = [
            (1, 3652382.768270788),
            (9, 3985144.116029223),
            (13, 4873334.987359202),
            (18, 2212145.0174775715),
        ];
        for (system, expected) in cases {
            let arc = PlaneProjection::new(system).unwrap().meridian_arc_at_origin();
            assert!((arc - expected).abs() < 1e-6, "system {}: {}", system, arc);
        }
    }

    #[test]
    fn test_invalid_system() {
        assert_eq!(convert(0, 0.0, 0.0), Err(ConvertError::InvalidSystem(0)));
        assert_eq!(convert(20, 0.0, 0.0), Err(ConvertError::InvalidSystem(20)));
        assert!(PlaneProjection::new(200).is_err());
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            convert(9, f64::NAN, 0.0),
            Err(ConvertError::InvalidInput { .. })
        ));
        assert!(matches!(
            convert(9, 0.0, f64::INFINITY),
            Err(ConvertError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_control_points() {
        let cases = [
            (9, -30000.0, 10000.0, 35.72954594680818, 139.94387758603426),
            (1, 50000.0, -20000.0, 33.450680626842725, 129.28486756980797),
            (13, -120000.0, 80000.0, 42.91560697892368, 145.2298565084385),
            (15, 10000.0, 10000.0, 26.090236318902573, 127.5999688797017),
        ];
        for (system, x, y, lat, lon) in cases {
            let result = convert(system, x, y).unwrap();
            assert!((result.lat - lat).abs() < EPS, "system {}: {:?}", system, result);
            assert!((result.lon - lon).abs() < EPS, "system {}: {:?}", system, result);
        }
    }

    /// Forme usuelle du GSI : φ = χ + Σ δj sin(2jχ)
    fn latitude_with_delta_series(n: f64, chi: f64) -> f64 {
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;
        let n5 = n4 * n;
        let delta = [
            2.0 * n - 2.0 / 3.0 * n2 - 2.0 * n3 + 116.0 / 45.0 * n4 + 26.0 / 45.0 * n5,
            7.0 / 3.0 * n2 - 8.0 / 5.0 * n3 - 227.0 / 45.0 * n4 + 2704.0 / 315.0 * n5,
            56.0 / 15.0 * n3 - 136.0 / 35.0 * n4 - 1262.0 / 105.0 * n5,
            4279.0 / 630.0 * n4 - 332.0 / 35.0 * n5,
            4174.0 / 315.0 * n5,
        ];
        chi + delta
            .iter()
            .enumerate()
            .map(|(j, d)| d * (2.0 * (j + 1) as f64 * chi).sin())
            .sum::<f64>()
    }

    #[test]
    fn test_agrees_with_delta_series() {
        let s = KawaseSeries::grs80();
        for system in [1, 9, 13, 18] {
            let proj = PlaneProjection::new(system).unwrap();
            for &(x, y) in &[(0.0, 0.0), (-50000.0, 30000.0), (120000.0, -90000.0)] {
                let result = proj.to_geodetic(x, y).unwrap();

                let xi = (x + proj.meridian_arc_at_origin()) / s.a_bar;
                let eta = y / s.a_bar;
                let mut xi_p = xi;
                let mut eta_p = eta;
                for j in 1..6 {
                    let k = 2.0 * j as f64;
                    xi_p -= s.b[j] * (k * xi).sin() * (k * eta).cosh();
                    eta_p -= s.b[j] * (k * xi).cos() * (k * eta).sinh();
                }
                let chi = (xi_p.sin() / eta_p.cosh()).asin();
                let expected = latitude_with_delta_series(s.n, chi).to_degrees();

                assert!(
                    (result.lat - expected).abs() < 1e-10,
                    "system {} ({}, {}): {} vs {}",
                    system,
                    x,
                    y,
                    result.lat,
                    expected
                );
            }
        }
    }

    #[test]
    fn test_map_url() {
        let p = Geodetic { lat: 35.5, lon: 139.25 };
        assert_eq!(p.map_url(), "https://maps.gsi.go.jp/#15/35.5/139.25/");
        let point = p.to_point();
        assert_eq!(point.x(), 139.25);
        assert_eq!(point.y(), 35.5);
    }
}
