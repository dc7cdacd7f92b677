//! Interpolation bilinéaire sur une grille de géoïde
//!
//! Une seule routine pour les deux formats : l'orientation des lignes et le
//! prédicat nodata sont portés par le `GridHeader`.

use crate::types::{GeoidGrid, GeoidLookup, RowOrientation};

/// Tolérance pour rattacher une position fractionnaire au dernier noeud
const EDGE_EPSILON: f64 = 1e-9;

impl GeoidGrid {
    /// Ondulation du géoïde (mètres) en (lat, lon) degrés
    pub fn query(&self, lat: f64, lon: f64) -> GeoidLookup {
        let h = self.header();

        if !h.contains(lat, lon) {
            return GeoidLookup::OutOfBounds;
        }

        let row = match h.orientation {
            RowOrientation::NorthToSouth => (h.lat_max - lat) / h.d_lat,
            RowOrientation::SouthToNorth => (lat - h.lat_min) / h.d_lat,
        };
        let col = (lon - h.lon_min) / h.d_lon;

        // Contrôle d'index distinct du contrôle d'emprise : l'arrondi peut
        // pousser la position fractionnaire d'une cellule au-delà du bord
        let Some((r0, t)) = cell_index(row, h.rows) else {
            return GeoidLookup::OutOfBounds;
        };
        let Some((c0, u)) = cell_index(col, h.cols) else {
            return GeoidLookup::OutOfBounds;
        };

        let cols = h.cols;
        let data = self.data();
        let v00 = data[r0 * cols + c0];
        let v01 = data[r0 * cols + c0 + 1];
        let v10 = data[(r0 + 1) * cols + c0];
        let v11 = data[(r0 + 1) * cols + c0 + 1];

        if [v00, v01, v10, v11]
            .iter()
            .any(|&v| h.nodata.is_nodata(v))
        {
            return GeoidLookup::NoData;
        }

        GeoidLookup::Value(bilinear(v00, v01, v10, v11, t, u))
    }
}

/// Index de la cellule (noeud inférieur) et poids fractionnaire
///
/// Un point exactement sur le dernier noeud est rattaché à la cellule
/// précédente avec un poids de 1.
fn cell_index(pos: f64, len: usize) -> Option<(usize, f64)> {
    let i0 = pos.floor();
    if i0.is_nan() || i0 < 0.0 {
        return None;
    }

    let last = (len - 1) as f64;
    if i0 + 1.0 > last {
        if i0 == last && pos - i0 <= EDGE_EPSILON {
            return Some((len - 2, 1.0));
        }
        return None;
    }

    Some((i0 as usize, pos - i0))
}

/// t : poids ligne (0 en r0, 1 en r1), u : poids colonne (0 en c0, 1 en c1)
#[inline]
fn bilinear(v00: f64, v01: f64, v10: f64, v11: f64, t: f64, u: f64) -> f64 {
    (1.0 - t) * (1.0 - u) * v00 + (1.0 - t) * u * v01 + t * (1.0 - u) * v10 + t * u * v11
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GridFormat, GridHeader, Nodata};

    /// Grille 3x3, pas 0.5°, emprise [35, 36] x [139, 140]
    fn grid(orientation: RowOrientation, nodata: Nodata, data: Vec<f64>) -> GeoidGrid {
        let header = GridHeader {
            lat_min: 35.0,
            lat_max: 36.0,
            lon_min: 139.0,
            lon_max: 140.0,
            d_lat: 0.5,
            d_lon: 0.5,
            rows: 3,
            cols: 3,
            orientation,
            nodata,
        };
        GeoidGrid::new(GridFormat::Isg, header, data).unwrap()
    }

    fn values() -> Vec<f64> {
        vec![
            36.1, 36.2, 36.3, //
            37.1, 37.2, 37.3, //
            38.1, 38.2, 38.3,
        ]
    }

    #[test]
    fn test_exact_nodes_north_to_south() {
        let g = grid(RowOrientation::NorthToSouth, Nodata::Sentinel(-9999.0), values());

        // Ligne 0 = nord
        assert_eq!(g.query(36.0, 139.0), GeoidLookup::Value(36.1));
        assert_eq!(g.query(35.5, 139.5), GeoidLookup::Value(37.2));
        assert_eq!(g.query(36.0, 139.5), GeoidLookup::Value(36.2));
        assert_eq!(g.query(35.5, 139.0), GeoidLookup::Value(37.1));
    }

    #[test]
    fn test_exact_nodes_south_to_north() {
        let g = grid(RowOrientation::SouthToNorth, Nodata::Threshold(990.0), values());

        // Ligne 0 = sud
        assert_eq!(g.query(35.0, 139.0), GeoidLookup::Value(36.1));
        assert_eq!(g.query(35.5, 139.5), GeoidLookup::Value(37.2));
        assert_eq!(g.query(35.0, 139.5), GeoidLookup::Value(36.2));
        assert_eq!(g.query(35.5, 139.0), GeoidLookup::Value(37.1));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        for orientation in [RowOrientation::NorthToSouth, RowOrientation::SouthToNorth] {
            let g = grid(orientation, Nodata::Sentinel(-9999.0), values());

            for (lat, lon) in [(35.0, 139.0), (35.0, 140.0), (36.0, 139.0), (36.0, 140.0)] {
                assert!(
                    g.query(lat, lon).value().is_some(),
                    "{:?} ({}, {})",
                    orientation,
                    lat,
                    lon
                );
            }
        }
    }

    #[test]
    fn test_corners_return_node_values() {
        let g = grid(RowOrientation::NorthToSouth, Nodata::Sentinel(-9999.0), values());
        assert_eq!(g.query(35.0, 140.0), GeoidLookup::Value(38.3));
        assert_eq!(g.query(35.0, 139.0), GeoidLookup::Value(38.1));
        assert_eq!(g.query(36.0, 140.0), GeoidLookup::Value(36.3));

        let g = grid(RowOrientation::SouthToNorth, Nodata::Sentinel(-9999.0), values());
        assert_eq!(g.query(36.0, 140.0), GeoidLookup::Value(38.3));
        assert_eq!(g.query(36.0, 139.0), GeoidLookup::Value(38.1));
    }

    #[test]
    fn test_midpoint_interpolation() {
        let g = grid(RowOrientation::SouthToNorth, Nodata::Threshold(990.0), values());
        let v = g.query(35.25, 139.25).value().unwrap();
        let expected = (36.1 + 36.2 + 37.1 + 37.2) / 4.0;
        assert!((v - expected).abs() < 1e-12, "v={}", v);

        // Interpolation linéaire le long d'une ligne
        let v = g.query(35.0, 139.125).value().unwrap();
        assert!((v - 36.125).abs() < 1e-12, "v={}", v);
    }

    #[test]
    fn test_out_of_bounds() {
        let g = grid(RowOrientation::NorthToSouth, Nodata::Sentinel(-9999.0), values());
        assert_eq!(g.query(34.999, 139.5), GeoidLookup::OutOfBounds);
        assert_eq!(g.query(36.001, 139.5), GeoidLookup::OutOfBounds);
        assert_eq!(g.query(35.5, 138.9), GeoidLookup::OutOfBounds);
        assert_eq!(g.query(35.5, 140.1), GeoidLookup::OutOfBounds);
        assert_eq!(g.query(f64::NAN, 139.5), GeoidLookup::OutOfBounds);
    }

    #[test]
    fn test_sentinel_nodata_is_contagious() {
        for corner in [0, 1, 3, 4] {
            let mut data = values();
            data[corner] = -9999.0;
            let g = grid(RowOrientation::NorthToSouth, Nodata::Sentinel(-9999.0), data);
            // Cellule nord-ouest : noeuds 0, 1, 3, 4
            assert_eq!(g.query(35.75, 139.25), GeoidLookup::NoData, "corner {}", corner);
        }
    }

    #[test]
    fn test_threshold_nodata_is_contagious() {
        let mut data = values();
        data[4] = 999.0;
        let g = grid(RowOrientation::SouthToNorth, Nodata::Threshold(990.0), data);

        assert_eq!(g.query(35.25, 139.25), GeoidLookup::NoData);
        assert_eq!(g.query(35.75, 139.75), GeoidLookup::NoData);
        // Même sur un noeud valide, les quatre coins de la cellule sont contrôlés
        assert_eq!(g.query(35.0, 139.0), GeoidLookup::NoData);
    }

    #[test]
    fn test_index_safety_with_inconsistent_header() {
        // lat_max déclaré plus grand que ce que couvrent les lignes
        let header = GridHeader {
            lat_min: 35.0,
            lat_max: 37.0,
            lon_min: 139.0,
            lon_max: 140.0,
            d_lat: 0.5,
            d_lon: 0.5,
            rows: 3,
            cols: 3,
            orientation: RowOrientation::SouthToNorth,
            nodata: Nodata::Threshold(990.0),
        };
        let g = GeoidGrid::new(GridFormat::Asc, header, values()).unwrap();
        assert_eq!(g.query(36.8, 139.5), GeoidLookup::OutOfBounds);
    }

    #[test]
    fn test_cell_index() {
        assert_eq!(cell_index(0.0, 3), Some((0, 0.0)));
        assert_eq!(cell_index(1.5, 3), Some((1, 0.5)));
        assert_eq!(cell_index(2.0, 3), Some((1, 1.0)));
        assert_eq!(cell_index(2.5, 3), None);
        assert_eq!(cell_index(-0.5, 3), None);
        assert_eq!(cell_index(f64::NAN, 3), None);
    }
}
