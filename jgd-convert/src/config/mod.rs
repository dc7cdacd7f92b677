//! Configuration des modèles de géoïde et des valeurs par défaut

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use geoid::GridFormat;

use crate::plane;

/// Répertoire des modèles de géoïde
pub const ENV_GEOID_DIR: &str = "JGD_GEOID_DIR";
/// Modèle chargé par défaut
pub const ENV_GEOID_MODEL: &str = "JGD_GEOID_MODEL";
/// Système plan par défaut (1..=19)
pub const ENV_SYSTEM: &str = "JGD_SYSTEM";

/// Configuration principale
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Modèles disponibles, par nom
    #[serde(default)]
    pub models: BTreeMap<String, ModelConfig>,

    /// Nom du modèle utilisé quand aucun n'est précisé
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Système plan utilisé quand aucun n'est précisé
    #[serde(default = "default_system")]
    pub default_system: u8,
}

/// Configuration d'un modèle
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Chemin du fichier de grille (relatif au répertoire des modèles)
    pub path: PathBuf,

    /// `isg` ou `asc` ; déduit de l'extension si absent
    #[serde(default)]
    pub format: Option<String>,
}

impl ModelConfig {
    /// Format effectif du fichier
    pub fn grid_format(&self) -> Result<GridFormat> {
        match &self.format {
            Some(name) => name
                .parse()
                .with_context(|| format!("Invalid format for {}", self.path.display())),
            None => GridFormat::from_path(&self.path)
                .with_context(|| format!("Cannot infer format of {}", self.path.display())),
        }
    }
}

fn default_model() -> String {
    "JPGEO2024".to_string()
}

fn default_system() -> u8 {
    9
}

impl Config {
    /// Charge une configuration depuis un fichier
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let mut config: Self =
            serde_json::from_str(&content).context("Failed to parse config JSON")?;

        // Chemins relatifs au fichier de configuration
        if let Some(dir) = path.parent() {
            config.relocate(dir);
        }
        config.validate()?;
        Ok(config)
    }

    /// Modèles embarqués (JPGEO2024, GSIGEO2011) situés dans `dir`
    pub fn builtin(dir: &Path) -> Result<Self> {
        let mut config: Self = serde_json::from_str(include_str!("presets/default.json"))
            .context("Failed to parse embedded config")?;
        config.relocate(dir);
        Ok(config)
    }

    /// Configuration embarquée ajustée par les variables d'environnement
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Même chose que `from_env`, avec une source de variables injectable
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let dir = var(ENV_GEOID_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let mut config = Self::builtin(&dir)?;

        if let Some(model) = var(ENV_GEOID_MODEL) {
            config.default_model = model;
        }
        if let Some(system) = var(ENV_SYSTEM) {
            config.default_system = system
                .trim()
                .parse()
                .with_context(|| format!("{} must be a number, got: {}", ENV_SYSTEM, system))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Fichier si fourni, sinon environnement
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::from_env(),
        }
    }

    /// Vérifie la cohérence des valeurs par défaut
    pub fn validate(&self) -> Result<()> {
        if !plane::is_valid_system(self.default_system) {
            bail!(
                "Invalid default system: {}. Use 1..={}",
                self.default_system,
                plane::SYSTEM_COUNT
            );
        }
        if !self.models.contains_key(&self.default_model) {
            bail!(
                "Unknown default model: {}. Available: {}",
                self.default_model,
                self.model_names().join(", ")
            );
        }
        Ok(())
    }

    /// Récupère la configuration d'un modèle
    pub fn model(&self, name: &str) -> Result<&ModelConfig> {
        match self.models.get(name) {
            Some(model) => Ok(model),
            None => bail!(
                "Unknown model: {}. Use: {}",
                name,
                self.model_names().join(", ")
            ),
        }
    }

    pub fn model_names(&self) -> Vec<&str> {
        self.models.keys().map(String::as_str).collect()
    }

    fn relocate(&mut self, dir: &Path) {
        for model in self.models.values_mut() {
            if model.path.is_relative() {
                model.path = dir.join(&model.path);
            }
        }
    }
}
