//! Origines des 19 systèmes de coordonnées planes rectangulaires (JGD2011)

/// Origine d'un système (degrés décimaux)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Origin {
    pub lat: f64,
    pub lon: f64,
}

/// (latitude, longitude degrés, longitude minutes) ; index 0 = système I
const ORIGINS: [(f64, f64, f64); 19] = [
    (33.0, 129.0, 30.0), // I    Nagasaki, Kagoshima (îles)
    (33.0, 131.0, 0.0),  // II   Fukuoka, Kyushu
    (36.0, 132.0, 10.0), // III  Yamaguchi, Shimane, Hiroshima
    (33.0, 133.0, 30.0), // IV   Shikoku
    (36.0, 134.0, 20.0), // V    Hyogo, Tottori, Okayama
    (36.0, 136.0, 0.0),  // VI   Kyoto, Osaka, Kinki
    (36.0, 137.0, 10.0), // VII  Ishikawa, Toyama, Gifu, Aichi
    (36.0, 138.0, 30.0), // VIII Niigata, Nagano, Yamanashi, Shizuoka
    (36.0, 139.0, 50.0), // IX   Tokyo, Kanto, Fukushima
    (40.0, 140.0, 50.0), // X    Tohoku
    (44.0, 140.0, 15.0), // XI   Hokkaido ouest
    (44.0, 142.0, 15.0), // XII  Hokkaido centre
    (44.0, 144.0, 15.0), // XIII Hokkaido est
    (26.0, 142.0, 0.0),  // XIV  Ogasawara
    (26.0, 127.0, 30.0), // XV   Okinawa
    (26.0, 124.0, 0.0),  // XVI  Sakishima
    (26.0, 131.0, 0.0),  // XVII Daito
    (20.0, 136.0, 0.0),  // XVIII Okinotorishima
    (26.0, 154.0, 0.0),  // XIX  Minamitorishima
];

/// Nombre de systèmes
pub const SYSTEM_COUNT: u8 = 19;

/// Origine du système `system` (1..=19)
pub fn origin_of(system: u8) -> Option<Origin> {
    let index = (system as usize).checked_sub(1)?;
    let &(lat, lon_deg, lon_min) = ORIGINS.get(index)?;
    Some(Origin {
        lat,
        lon: lon_deg + lon_min / 60.0,
    })
}

/// Vérifie si le numéro de système est valide
pub fn is_valid_system(system: u8) -> bool {
    (1..=SYSTEM_COUNT).contains(&system)
}
