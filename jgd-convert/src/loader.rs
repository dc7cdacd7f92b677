//! Chargement asynchrone d'un modèle de géoïde dans le `GeoidStore`
//!
//! Lecture du fichier avec `tokio::fs`, puis décompression et parsing sur un
//! thread bloquant. La grille n'est installée qu'une fois le parsing terminé.

use std::path::Path;

use anyhow::{Context, Result};
use geoid::{GeoidStore, GridFormat};
use tracing::{debug, info};

use crate::config::Config;

/// Résultat d'un chargement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nouvelle grille installée
    Loaded,
    /// Le modèle demandé était déjà actif
    AlreadyLoaded,
}

/// Charge le modèle `name` décrit dans la configuration
pub async fn load_model(store: &GeoidStore, config: &Config, name: &str) -> Result<LoadOutcome> {
    if store.model().as_deref() == Some(name) {
        debug!(model = name, "Geoid model already loaded");
        return Ok(LoadOutcome::AlreadyLoaded);
    }

    let model = config.model(name)?;
    let format = model.grid_format()?;
    load_file(store, name, format, &model.path).await?;
    Ok(LoadOutcome::Loaded)
}

/// Lit, parse et installe un fichier de grille
///
/// En cas d'erreur la grille active reste en place.
pub async fn load_file(
    store: &GeoidStore,
    name: &str,
    format: GridFormat,
    path: &Path,
) -> Result<()> {
    info!(model = name, path = %path.display(), %format, "Loading geoid model");

    let raw = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read geoid file: {}", path.display()))?;

    let grid = tokio::task::spawn_blocking(move || {
        let data = geoid::archive::decompress(raw)?;
        geoid::parse_bytes(format, &data)
    })
    .await
    .context("Geoid parse task failed")?
    .with_context(|| format!("Failed to parse {}", path.display()))?;

    store.install(name, format, grid);
    Ok(())
}
