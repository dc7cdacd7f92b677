//! Définition et implémentation des commandes CLI
//!
//! - `convert`: un point plan → lat/lon (+ géoïde)
//! - `batch`: fichier CSV → CSV / KML / GeoJSON
//! - `geoid`: ondulation en un point géographique
//! - `info`: origine d'un système

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Subcommand;
use geoid::{GeoidLookup, GeoidStore};
use tracing::{info, warn};

use jgd_convert::batch;
use jgd_convert::export::{self, ExportFormat};
use jgd_convert::loader;
use jgd_convert::plane::{self, PlaneProjection};
use jgd_convert::{BatchReport, Config};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert one plane rectangular coordinate to latitude/longitude
    Convert {
        /// Plane rectangular system (1-19); defaults to the configured system
        #[arg(short, long, value_parser = system_parser())]
        system: Option<u8>,

        /// X coordinate in meters (northing)
        #[arg(short, long, allow_negative_numbers = true)]
        x: f64,

        /// Y coordinate in meters (easting)
        #[arg(short, long, allow_negative_numbers = true)]
        y: f64,

        /// Geoid model (JPGEO2024, GSIGEO2011)
        #[arg(short, long)]
        model: Option<String>,

        /// Skip the geoid lookup
        #[arg(long)]
        no_geoid: bool,
    },

    /// Convert a CSV file of `name,x,y` rows
    Batch {
        /// Input CSV file (no header line)
        #[arg(short, long)]
        input: PathBuf,

        /// Plane rectangular system (1-19); defaults to the configured system
        #[arg(short, long, value_parser = system_parser())]
        system: Option<u8>,

        /// Output file (defaults to the input name with the format extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (inferred from the output extension when omitted)
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,

        /// Geoid model (JPGEO2024, GSIGEO2011)
        #[arg(short, long)]
        model: Option<String>,

        /// Skip the geoid lookup
        #[arg(long)]
        no_geoid: bool,

        /// Save a JSON report to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Geoid undulation at a latitude/longitude
    Geoid {
        /// Latitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Geoid model (JPGEO2024, GSIGEO2011)
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Show the origin of a plane rectangular system
    Info {
        /// Plane rectangular system (1-19)
        #[arg(short, long, value_parser = system_parser())]
        system: u8,
    },
}

/// Numéro de système borné à 1..=19 dès la lecture des arguments
fn system_parser() -> clap::builder::RangedI64ValueParser<u8> {
    clap::value_parser!(u8).range(1..=plane::SYSTEM_COUNT as i64)
}

/// Exécute une commande
pub async fn run(command: Commands, config: &Config, store: &GeoidStore) -> Result<()> {
    match command {
        Commands::Convert {
            system,
            x,
            y,
            model,
            no_geoid,
        } => {
            let system = system.unwrap_or(config.default_system);
            if !no_geoid {
                load_geoid_lenient(store, config, model.as_deref()).await;
            }
            cmd_convert(store, system, x, y, no_geoid)
        }
        Commands::Batch {
            input,
            system,
            output,
            format,
            model,
            no_geoid,
            report,
        } => {
            let system = system.unwrap_or(config.default_system);
            if !no_geoid {
                load_geoid_lenient(store, config, model.as_deref()).await;
            }
            cmd_batch(store, &input, system, output, format, report.as_deref())
        }
        Commands::Geoid { lat, lon, model } => {
            let model = model.unwrap_or_else(|| config.default_model.clone());
            loader::load_model(store, config, &model).await?;
            cmd_geoid(store, lat, lon)
        }
        Commands::Info { system } => cmd_info(system),
    }
}

/// Charge le modèle ; un échec laisse la conversion possible sans géoïde
async fn load_geoid_lenient(store: &GeoidStore, config: &Config, model: Option<&str>) {
    let model = model.unwrap_or(&config.default_model);
    if let Err(e) = loader::load_model(store, config, model).await {
        warn!("Geoid model {} unavailable: {:#}", model, e);
    }
}

/// Exécute la commande convert
fn cmd_convert(store: &GeoidStore, system: u8, x: f64, y: f64, no_geoid: bool) -> Result<()> {
    let position = plane::convert(system, x, y)?;
    info!(system, x, y, lat = position.lat, lon = position.lon, "Converted");

    println!("System:    {}", system);
    println!("Latitude:  {:.8}  ({})", position.lat, plane::to_dms(position.lat));
    println!("Longitude: {:.8}  ({})", position.lon, plane::to_dms(position.lon));
    if !no_geoid {
        println!(
            "Geoid:     {}",
            describe_lookup(store.query(position.lat, position.lon), store)
        );
    }
    println!("Map:       {}", position.map_url());

    Ok(())
}

/// Exécute la commande batch
fn cmd_batch(
    store: &GeoidStore,
    input: &Path,
    system: u8,
    output: Option<PathBuf>,
    format: Option<ExportFormat>,
    report_path: Option<&Path>,
) -> Result<()> {
    let start = Instant::now();
    let projection = PlaneProjection::new(system)?;

    let (output, format) = resolve_output(input, output, format);
    info!(
        input = %input.display(),
        output = %output.display(),
        ?format,
        system,
        "Batch conversion"
    );

    let rows = batch::read_file(input)?;

    // Instantané : tout le lot utilise la même grille
    let geoid = store.current();
    let result = batch::convert_rows(&rows.rows, &projection, geoid.as_deref());

    for (line, error) in &result.failures {
        warn!("Line {} rejected: {}", line, error);
    }

    export::export_points(&result.points, format, &output)
        .with_context(|| format!("Failed to export to {}", output.display()))?;

    let mut report = BatchReport::new(
        &input.display().to_string(),
        system,
        geoid.as_ref().map(|g| g.model.clone()),
    );
    report.record_input(&rows);
    report.record_output(&result);
    report.set_duration(start.elapsed());
    report.finalize();

    if let Some(path) = report_path {
        report
            .save_to_file(path)
            .with_context(|| format!("Failed to save report to {}", path.display()))?;
        info!(path = %path.display(), "Report saved");
    }

    report.display();
    println!("{} → {}", report.summary(), output.display());

    Ok(())
}

/// Chemin et format de sortie effectifs
fn resolve_output(
    input: &Path,
    output: Option<PathBuf>,
    format: Option<ExportFormat>,
) -> (PathBuf, ExportFormat) {
    match (output, format) {
        (Some(path), Some(format)) => (path, format),
        (Some(path), None) => {
            let format = ExportFormat::from_path(&path).unwrap_or_default();
            (path, format)
        }
        (None, format) => {
            let format = format.unwrap_or_default();
            let stem = input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("points");
            let path = input.with_file_name(format!("{}_latlon.{}", stem, format.extension()));
            (path, format)
        }
    }
}

/// Exécute la commande geoid
fn cmd_geoid(store: &GeoidStore, lat: f64, lon: f64) -> Result<()> {
    let lookup = store.query(lat, lon);
    println!("Geoid: {}", describe_lookup(lookup, store));
    Ok(())
}

/// Exécute la commande info
fn cmd_info(system: u8) -> Result<()> {
    let projection = PlaneProjection::new(system)?;
    let origin = projection.origin();

    println!("System {}", system);
    println!("Origin latitude:  {}  ({})", origin.lat, plane::to_dms(origin.lat));
    println!("Origin longitude: {}  ({})", origin.lon, plane::to_dms(origin.lon));
    println!(
        "Meridian arc:     {:.3} m",
        projection.meridian_arc_at_origin()
    );
    println!("Scale factor:     {}", plane::M0);

    Ok(())
}

/// Texte affiché pour un résultat de géoïde
fn describe_lookup(lookup: GeoidLookup, store: &GeoidStore) -> String {
    match (lookup, store.model()) {
        (GeoidLookup::Value(_), Some(model)) => format!("{} ({})", lookup, model),
        _ => lookup.to_string(),
    }
}
