//! Point d'entrée CLI pour jgd-convert

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use geoid::GeoidStore;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, EnvFilter};

use jgd_convert::Config;

// Charger .env au démarrage
fn load_env() {
    // Chercher .env dans le répertoire courant ou parent
    if dotenvy::dotenv().is_err() {
        // Essayer depuis le répertoire du binaire
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

mod cli;

use cli::Commands;

/// Convertir des coordonnées planes JGD2011 en latitude/longitude
#[derive(Parser)]
#[command(name = "jgd-convert")]
#[command(author, version)]
#[command(about = "Convert JGD2011 plane rectangular coordinates to GRS80 latitude/longitude")]
#[command(long_about = "Convert JGD2011 plane rectangular coordinates (systems I-XIX) to GRS80 latitude/longitude.\n\nGeoid undulations come from JPGEO2024 (.isg) or GSIGEO2011 (.asc) grids, located with JGD_GEOID_DIR or a JSON config file.")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Fichier de configuration JSON (sinon variables d'environnement)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Charger .env avant tout
    load_env();

    let cli = Cli::parse();

    // Configurer le logging
    init_logging(cli.verbose, cli.quiet);

    let config = Config::resolve(cli.config.as_deref())?;
    debug!(
        models = ?config.model_names(),
        default_model = %config.default_model,
        default_system = config.default_system,
        "Configuration loaded"
    );

    let store = GeoidStore::new();
    cli::run(cli.command, &config, &store).await
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
