//! Ellipsoïde GRS80 et coefficients de la série de Kawase

use std::sync::OnceLock;

/// Ellipsoïde GRS80 (utilisé par JGD2011)
pub struct GRS80;

impl GRS80 {
    /// Demi-grand axe en mètres
    pub const A: f64 = 6378137.0;

    /// Inverse de l'aplatissement
    pub const INV_F: f64 = 298.257222101;

    /// Troisième aplatissement n = f / (2 - f)
    pub const N: f64 = 1.0 / (2.0 * Self::INV_F - 1.0);
}

/// Facteur d'échelle sur le méridien origine des systèmes plans
pub const M0: f64 = 0.9999;

/// Coefficients dérivés de (a, 1/f, m0), calculés une seule fois
#[derive(Debug, Clone)]
pub struct KawaseSeries {
    pub n: f64,
    /// Arc de méridien : A0..A5
    pub a: [f64; 6],
    /// Plan transverse → conforme : B1..B5 (indice 0 inutilisé)
    pub b: [f64; 6],
    /// Latitude conforme → géodésique : D1..D5 (indice 0 inutilisé)
    pub d: [f64; 6],
    /// m0·a/(1+n)·A0
    pub a_bar: f64,
    /// m0·a/(1+n)
    pub s_const: f64,
}

impl KawaseSeries {
    fn compute(a: f64, n: f64, m0: f64) -> Self {
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;
        let n5 = n4 * n;

        let a_coef = [
            1.0 + n2 / 4.0 + n4 / 64.0,
            -(3.0 / 2.0) * (n - n3 / 8.0 - n5 / 64.0),
            (15.0 / 16.0) * (n2 - n4 / 4.0),
            -(35.0 / 48.0) * (n3 - (5.0 / 16.0) * n5),
            (315.0 / 512.0) * n4,
            -(693.0 / 1280.0) * n5,
        ];

        let b_coef = [
            0.0,
            n / 2.0 - (2.0 / 3.0) * n2 + (37.0 / 96.0) * n3 - (1.0 / 360.0) * n4
                - (81.0 / 512.0) * n5,
            (1.0 / 48.0) * n2 + (1.0 / 15.0) * n3 - (437.0 / 1440.0) * n4 + (46.0 / 105.0) * n5,
            (17.0 / 480.0) * n3 - (37.0 / 840.0) * n4 - (209.0 / 4480.0) * n5,
            (4397.0 / 161280.0) * n4 - (11.0 / 504.0) * n5,
            (4583.0 / 161280.0) * n5,
        ];

        let d_coef = [
            0.0,
            -(2.0 / 3.0) * n2 - (2.0 / 3.0) * n3 + (4.0 / 9.0) * n4 + (2.0 / 9.0) * n5,
            (1.0 / 3.0) * n2 - (4.0 / 15.0) * n3 - (23.0 / 45.0) * n4 + (68.0 / 45.0) * n5,
            (2.0 / 5.0) * n3 - (24.0 / 35.0) * n4 - (46.0 / 35.0) * n5,
            (83.0 / 126.0) * n4 - (80.0 / 63.0) * n5,
            (52.0 / 45.0) * n5,
        ];

        let s_const = m0 * a / (1.0 + n);

        Self {
            n,
            a: a_coef,
            b: b_coef,
            d: d_coef,
            a_bar: s_const * a_coef[0],
            s_const,
        }
    }

    /// Série GRS80 / m0 = 0.9999, partagée par tous les threads
    pub fn grs80() -> &'static Self {
        static SERIES: OnceLock<KawaseSeries> = OnceLock::new();
        SERIES.get_or_init(|| Self::compute(GRS80::A, GRS80::N, M0))
    }

    /// Arc de méridien (mètres, à l'échelle m0) de l'équateur à la latitude phi (radians)
    pub fn meridian_arc(&self, phi: f64) -> f64 {
        let series: f64 = (1..6)
            .map(|k| self.a[k] * (2.0 * k as f64 * phi).sin())
            .sum();
        self.s_const * (self.a[0] * phi + series)
    }
}
