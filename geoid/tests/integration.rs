//! Tests d'intégration : fichiers de grille sur disque

use std::io::Write;
use std::path::Path;

use bzip2::write::BzEncoder;
use bzip2::Compression;
use geoid::{GeoidLookup, GeoidStore, GridFormat, RowOrientation};

/// Grille ISG synthétique : N = lat + lon / 100 sur [35, 36] x [139, 140], pas 0.25°
fn synthetic_isg() -> String {
    let mut text = String::from(
        "begin_of_head ================================================\n\
         model name     :  SYNTHETIC\n\
         lat min        =    35°00'00\"\n\
         lat max        =    36°00'00\"\n\
         lon min        =   139°00'00\"\n\
         lon max        =   140°00'00\"\n\
         delta lat      =     0°15'00\"\n\
         delta lon      =     0°15'00\"\n\
         nrows          =            5\n\
         ncols          =            5\n\
         nodata         =   -9999.0000\n\
         end_of_head ==================================================\n",
    );
    for row in 0..5 {
        let lat = 36.0 - row as f64 * 0.25;
        let line: Vec<String> = (0..5)
            .map(|col| format!("{:10.4}", lat + (139.0 + col as f64 * 0.25) / 100.0))
            .collect();
        text.push_str(&line.join(" "));
        text.push('\n');
    }
    text
}

/// Même champ au format ASC (ligne 0 = sud)
fn synthetic_asc() -> String {
    let mut text = String::from("35.00000 139.00000 0.250000 0.250000 5 5 1 ver2.2\n");
    for row in 0..5 {
        let lat = 35.0 + row as f64 * 0.25;
        let line: Vec<String> = (0..5)
            .map(|col| format!("{:9.4}", lat + (139.0 + col as f64 * 0.25) / 100.0))
            .collect();
        text.push_str(&line.join(" "));
        text.push('\n');
    }
    text
}

fn write_file(dir: &Path, name: &str, content: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_both_formats_agree() {
    let dir = tempfile::tempdir().unwrap();
    let isg = write_file(dir.path(), "synthetic.isg", synthetic_isg().as_bytes());
    let asc = write_file(dir.path(), "synthetic.asc", synthetic_asc().as_bytes());

    let isg_grid = geoid::parse(&isg).unwrap();
    let asc_grid = geoid::parse(&asc).unwrap();

    assert_eq!(isg_grid.header().orientation, RowOrientation::NorthToSouth);
    assert_eq!(asc_grid.header().orientation, RowOrientation::SouthToNorth);

    // Champ linéaire : l'interpolation bilinéaire est exacte (à l'arrondi près)
    for &(lat, lon) in &[(35.1, 139.1), (35.5, 139.5), (35.99, 139.01), (35.0, 140.0)] {
        let expected = lat + lon / 100.0;
        let a = isg_grid.query(lat, lon).value().unwrap();
        let b = asc_grid.query(lat, lon).value().unwrap();
        assert!((a - expected).abs() < 1e-3, "ISG ({}, {}) = {}", lat, lon, a);
        assert!((b - expected).abs() < 1e-3, "ASC ({}, {}) = {}", lat, lon, b);
    }
}

#[test]
fn test_bzip2_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut encoder = BzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(synthetic_isg().as_bytes()).unwrap();
    let path = write_file(dir.path(), "synthetic.isg.bz2", &encoder.finish().unwrap());

    let grid = geoid::parse(&path).unwrap();
    assert_eq!(grid.rows(), 5);
    assert!(grid.query(35.5, 139.5).value().is_some());
}

#[test]
fn test_store_keeps_grid_after_bad_file() {
    let store = GeoidStore::new();
    store
        .load("JPGEO2024", GridFormat::Isg, synthetic_isg().as_bytes())
        .unwrap();
    let before = store.query(35.5, 139.5);

    // Fichier tronqué : il manque la dernière ligne
    let truncated: String = synthetic_isg()
        .lines()
        .take(16)
        .collect::<Vec<_>>()
        .join("\n");
    assert!(store
        .load("JPGEO2024", GridFormat::Isg, truncated.as_bytes())
        .is_err());

    assert_eq!(store.query(35.5, 139.5), before);
    assert_eq!(store.query(34.0, 139.5), GeoidLookup::OutOfBounds);
}

#[test]
fn test_store_rejects_absurd_dimensions() {
    let store = GeoidStore::new();
    store
        .load("JPGEO2024", GridFormat::Isg, synthetic_isg().as_bytes())
        .unwrap();

    let overflowing = synthetic_isg().replace(
        "nrows          =            5",
        "nrows          = 18446744073709551615",
    );
    let err = store
        .load("JPGEO2024", GridFormat::Isg, overflowing.as_bytes())
        .unwrap_err();
    assert!(err.is_parse_error());

    let oversized = b"0 0 1 1 4000000000 4000000000\n1 2 3 4\n";
    let err = store.load("GSIGEO2011", GridFormat::Asc, oversized).unwrap_err();
    assert!(err.is_parse_error());

    assert_eq!(store.model().as_deref(), Some("JPGEO2024"));
}

#[test]
fn test_parse_real_models() {
    let fixtures = Path::new("../fixtures");
    let models = [
        ("JPGEO2024.isg", 35.6812, 139.7671),
        ("gsigeo2011_ver2_2.asc", 35.6812, 139.7671),
    ];

    for (name, lat, lon) in models {
        let path = fixtures.join(name);
        if !path.exists() {
            eprintln!("Fixture {} not found, skipping", name);
            continue;
        }

        let grid = geoid::parse(&path).unwrap();
        println!("{}: {}x{}", name, grid.rows(), grid.cols());

        // Tokyo : ondulation d'environ 36-37 m
        let value = grid.query(lat, lon).value().expect("Tokyo must be covered");
        assert!((30.0..45.0).contains(&value), "{} N={}", name, value);
    }
}
