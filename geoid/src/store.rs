//! Emplacement de la grille active
//!
//! Une seule grille installée à la fois. Le remplacement est atomique : une
//! requête concurrente voit l'ancienne grille ou la nouvelle, jamais un état
//! intermédiaire. Un chargement en échec laisse la grille précédente en place.

use std::sync::{Arc, RwLock};

use tracing::info;

use crate::types::{GeoidGrid, GeoidLookup, GridFormat};
use crate::GeoidError;

/// Grille installée et son étiquette (modèle, format)
#[derive(Debug)]
pub struct LoadedGeoid {
    /// Nom du modèle (ex: "JPGEO2024")
    pub model: String,
    pub format: GridFormat,
    pub grid: GeoidGrid,
}

/// Poignée partageable vers la grille active
#[derive(Debug, Clone, Default)]
pub struct GeoidStore {
    current: Arc<RwLock<Option<Arc<LoadedGeoid>>>>,
}

impl GeoidStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grille active (snapshot), sans bloquer les chargements suivants
    pub fn current(&self) -> Option<Arc<LoadedGeoid>> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Installe une grille déjà parsée, remplace la précédente
    pub fn install(&self, model: impl Into<String>, format: GridFormat, grid: GeoidGrid) {
        let loaded = Arc::new(LoadedGeoid {
            model: model.into(),
            format,
            grid,
        });
        info!(
            model = %loaded.model,
            format = %loaded.format,
            rows = loaded.grid.rows(),
            cols = loaded.grid.cols(),
            "Geoid grid installed"
        );

        *self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(loaded);
    }

    /// Parse puis installe ; en cas d'erreur la grille active est conservée
    pub fn load(
        &self,
        model: impl Into<String>,
        format: GridFormat,
        data: &[u8],
    ) -> Result<(), GeoidError> {
        let grid = crate::parse_bytes(format, data)?;
        self.install(model, format, grid);
        Ok(())
    }

    /// Retire la grille active
    pub fn unload(&self) -> Option<Arc<LoadedGeoid>> {
        self.current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
    }

    /// Modèle actuellement installé
    pub fn model(&self) -> Option<String> {
        self.current().map(|loaded| loaded.model.clone())
    }

    pub fn is_loaded(&self) -> bool {
        self.current().is_some()
    }

    /// Interroge la grille active ; `Unloaded` si aucune n'est installée
    pub fn query(&self, lat: f64, lon: f64) -> GeoidLookup {
        match self.current() {
            Some(loaded) => loaded.grid.query(lat, lon),
            None => GeoidLookup::Unloaded,
        }
    }
}
