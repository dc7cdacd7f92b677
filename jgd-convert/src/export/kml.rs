//! Export KML (un Placemark par point)

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::batch::ConvertedPoint;

const DOCUMENT_NAME: &str = "JGD2011 Conversion Results";

/// Exporte des points en KML
pub fn export_to_kml(points: &[ConvertedPoint], output_path: &Path) -> Result<()> {
    let file = File::create(output_path)
        .context(format!("Failed to create file: {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);
    write_kml(&mut writer, points)?;
    writer.flush()?;
    Ok(())
}

/// Écrit le document KML complet
pub fn write_kml<W: Write>(writer: &mut W, points: &[ConvertedPoint]) -> Result<()> {
    writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(writer, r#"<kml xmlns="http://www.opengis.net/kml/2.2">"#)?;
    writeln!(writer, "  <Document>")?;
    writeln!(writer, "    <name>{}</name>", DOCUMENT_NAME)?;

    for point in points {
        write_placemark(writer, point)?;
    }

    writeln!(writer, "  </Document>")?;
    write!(writer, "</kml>")?;
    Ok(())
}

fn write_placemark<W: Write>(writer: &mut W, point: &ConvertedPoint) -> Result<()> {
    writeln!(writer, "    <Placemark>")?;
    writeln!(writer, "      <name>{}</name>", escape_xml(&point.name))?;
    if let Some(h) = point.geoid_height() {
        writeln!(writer, "      <description>Geoid: {:.3} m</description>", h)?;
    }
    writeln!(writer, "      <Point>")?;
    // KML : longitude d'abord
    writeln!(
        writer,
        "        <coordinates>{},{},0</coordinates>",
        point.position.lon, point.position.lat
    )?;
    writeln!(writer, "      </Point>")?;
    writeln!(writer, "    </Placemark>")?;
    Ok(())
}

/// Échappe une chaîne pour XML
fn escape_xml(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&apos;"),
            c => result.push(c),
        }
    }
    result
}
