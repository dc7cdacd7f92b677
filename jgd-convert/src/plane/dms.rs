//! Affichage degrés-minutes-secondes

/// Unités de 1e-5 seconde
const SUBSECOND: u64 = 100_000;
const PER_MINUTE: u64 = 60 * SUBSECOND;
const PER_DEGREE: u64 = 60 * PER_MINUTE;

/// Formate un angle décimal en `D°M'S.SSSSS"`
///
/// Les secondes sont arrondies à 5 décimales avec report sur les minutes
/// et les degrés. Un angle négatif est préfixé par `-`.
pub fn to_dms(deg: f64) -> String {
    if !deg.is_finite() {
        return deg.to_string();
    }

    let units = (deg.abs() * PER_DEGREE as f64).round() as u64;
    let d = units / PER_DEGREE;
    let m = (units % PER_DEGREE) / PER_MINUTE;
    let s = units % PER_MINUTE;
    let sign = if deg < 0.0 && units > 0 { "-" } else { "" };

    format!(
        "{}{}°{}'{}.{:05}\"",
        sign,
        d,
        m,
        s / SUBSECOND,
        s % SUBSECOND
    )
}
