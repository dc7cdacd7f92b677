//! Rapport de conversion par lot
//!
//! Compteurs de lignes et de résultats du géoïde, erreurs par ligne,
//! affichage console et sauvegarde JSON.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use geoid::GeoidLookup;
use serde::Serialize;

use crate::batch::{BatchInput, BatchOutput};

/// Statut global du lot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BatchStatus {
    /// Toutes les lignes converties
    Success,
    /// Certaines lignes ignorées ou rejetées
    PartialSuccess,
    /// Aucune ligne convertie
    Failed,
}

/// Ligne rejetée par la projection
#[derive(Debug, Clone, Serialize)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Rapport complet d'un lot
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Fichier source
    pub input: String,
    /// Système plan utilisé
    pub system: u8,
    /// Modèle de géoïde actif, si chargé
    pub model: Option<String>,
    pub duration_secs: f64,
    pub status: BatchStatus,

    /// Lignes valides lues
    pub rows_read: usize,
    /// Lignes ignorées à la lecture
    pub rows_skipped: usize,
    /// Points convertis
    pub converted: usize,

    // Résultats du géoïde
    pub geoid_values: usize,
    pub geoid_out_of_bounds: usize,
    pub geoid_nodata: usize,
    pub geoid_unloaded: usize,

    pub errors: Vec<RowError>,
}

impl BatchReport {
    pub fn new(input: &str, system: u8, model: Option<String>) -> Self {
        Self {
            input: input.to_string(),
            system,
            model,
            duration_secs: 0.0,
            status: BatchStatus::Success,
            rows_read: 0,
            rows_skipped: 0,
            converted: 0,
            geoid_values: 0,
            geoid_out_of_bounds: 0,
            geoid_nodata: 0,
            geoid_unloaded: 0,
            errors: Vec::new(),
        }
    }

    /// Enregistre le résultat de la lecture
    pub fn record_input(&mut self, input: &BatchInput) {
        self.rows_read += input.rows.len();
        self.rows_skipped += input.skipped;
    }

    /// Enregistre un résultat d'interrogation du géoïde
    pub fn record_geoid(&mut self, lookup: GeoidLookup) {
        match lookup {
            GeoidLookup::Value(_) => self.geoid_values += 1,
            GeoidLookup::OutOfBounds => self.geoid_out_of_bounds += 1,
            GeoidLookup::NoData => self.geoid_nodata += 1,
            GeoidLookup::Unloaded => self.geoid_unloaded += 1,
        }
    }

    /// Enregistre une ligne en erreur
    pub fn record_error(&mut self, line: usize, message: &str) {
        self.errors.push(RowError {
            line,
            message: message.to_string(),
        });
    }

    /// Enregistre la sortie complète de la conversion
    pub fn record_output(&mut self, output: &BatchOutput) {
        self.converted += output.points.len();
        for point in &output.points {
            self.record_geoid(point.geoid);
        }
        for (line, error) in &output.failures {
            self.record_error(*line, &error.to_string());
        }
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Détermine le statut final
    pub fn finalize(&mut self) {
        let has_problems = self.rows_skipped > 0 || !self.errors.is_empty();

        self.status = if self.converted == 0 && (has_problems || self.rows_read > 0) {
            BatchStatus::Failed
        } else if has_problems {
            BatchStatus::PartialSuccess
        } else {
            BatchStatus::Success
        };
    }

    /// Affiche le rapport sur la console
    pub fn display(&self) {
        println!("\n{}", "=".repeat(60));
        println!("BATCH REPORT - {} (system {})", self.input, self.system);
        println!("{}", "=".repeat(60));

        println!("\nStatus: {:?}", self.status);
        println!("Duration: {:.2}s", self.duration_secs);
        println!(
            "Geoid model: {}",
            self.model.as_deref().unwrap_or("none")
        );

        println!("\n--- SUMMARY ---");
        println!(
            "Rows: {} read, {} skipped, {} converted",
            self.rows_read, self.rows_skipped, self.converted
        );
        println!(
            "Geoid: {} values, {} out of bounds, {} no data, {} not loaded",
            self.geoid_values, self.geoid_out_of_bounds, self.geoid_nodata, self.geoid_unloaded
        );

        if !self.errors.is_empty() {
            println!("\n--- ERRORS ({}) ---", self.errors.len());
            for e in self.errors.iter().take(20) {
                println!("  [line {}] {}", e.line, e.message);
            }
            if self.errors.len() > 20 {
                println!("  ... and {} more", self.errors.len() - 20);
            }
        }

        println!("\n{}", "=".repeat(60));
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Affichage compact pour le résumé
    pub fn summary(&self) -> String {
        format!(
            "{}: {} converted, {} skipped, {} with geoid, {} errors",
            self.input,
            self.converted,
            self.rows_skipped,
            self.geoid_values,
            self.errors.len()
        )
    }
}
