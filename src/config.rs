// src/config.rs

use crate::error::{RasterError, RasterResult};
use crate::types::ProjectionAxis;
use serde::{Deserialize, Serialize};

/// Wie die Höhen (bzw. Feldwerte) aller Punkte einer Zelle zu einem
/// einzigen Wert zusammengefasst werden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectionMode {
    Minimum,
    Average,
    Maximum,
}

impl Default for ProjectionMode {
    fn default() -> Self {
        ProjectionMode::Average
    }
}

/// Konfiguration für den Gitteraufbau. Wird explizit in jeden Aufruf
/// gereicht statt als globaler Werkzeug-Zustand gehalten, damit die
/// Algorithmen deterministisch und isoliert testbar bleiben.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterConfig {
    /// Kantenlänge einer Gitterzelle in Weltkoordinaten (> 0).
    pub step: f64,
    /// Die als Höhe interpretierte Achse.
    pub axis: ProjectionAxis,
    /// Zusammenfassung der Punkthöhen pro Zelle.
    pub height_aggregation: ProjectionMode,
    /// Zusammenfassung der Skalarfelder pro Zelle; `None` überspringt die
    /// Feld-Aggregation vollständig.
    pub field_aggregation: Option<ProjectionMode>,
    /// Bricht den Aufbau ab, statt nur zu warnen, wenn das Gitter genau
    /// eine oder mehr als 10.000.000 Zellen hätte.
    pub abort_on_unusual_size: bool,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            step: 1.0,
            axis: ProjectionAxis::Z,
            height_aggregation: ProjectionMode::Average,
            field_aggregation: None,
            abort_on_unusual_size: false,
        }
    }
}

impl RasterConfig {
    pub fn new(step: f64) -> Self {
        Self {
            step,
            ..Self::default()
        }
    }

    pub fn with_axis(mut self, axis: ProjectionAxis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_height_aggregation(mut self, mode: ProjectionMode) -> Self {
        self.height_aggregation = mode;
        self
    }

    pub fn with_field_aggregation(mut self, mode: ProjectionMode) -> Self {
        self.field_aggregation = Some(mode);
        self
    }

    pub fn abort_on_unusual_size(mut self) -> Self {
        self.abort_on_unusual_size = true;
        self
    }

    pub fn validate(&self) -> RasterResult<()> {
        if !(self.step > 0.0) || !self.step.is_finite() {
            return Err(RasterError::InvalidConfiguration {
                message: format!("Grid step must be positive and finite, got {}", self.step),
            });
        }
        Ok(())
    }
}

/// Konfiguration für die Konturextraktion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourConfig {
    /// Erste Iso-Höhe.
    pub start_level: f64,
    /// Abstand zwischen zwei Iso-Höhen (> 0).
    pub level_step: f64,
    /// Linien mit weniger Stützpunkten werden verworfen (>= 2, üblich 3).
    pub min_vertex_count: usize,
    /// Stützpunkte im äußersten Zellring verwerfen und Linien dort auftrennen.
    pub ignore_border: bool,
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self {
            start_level: 0.0,
            level_step: 1.0,
            min_vertex_count: 3,
            ignore_border: false,
        }
    }
}

impl ContourConfig {
    pub fn new(start_level: f64, level_step: f64) -> Self {
        Self {
            start_level,
            level_step,
            ..Self::default()
        }
    }

    pub fn with_min_vertex_count(mut self, count: usize) -> Self {
        self.min_vertex_count = count;
        self
    }

    pub fn ignoring_border(mut self) -> Self {
        self.ignore_border = true;
        self
    }

    pub fn validate(&self) -> RasterResult<()> {
        if !(self.level_step > 0.0) || !self.level_step.is_finite() {
            return Err(RasterError::InvalidConfiguration {
                message: format!(
                    "Contour level step must be positive and finite, got {}",
                    self.level_step
                ),
            });
        }
        if !self.start_level.is_finite() {
            return Err(RasterError::InvalidConfiguration {
                message: "Contour start level must be finite".to_string(),
            });
        }
        if self.min_vertex_count < 2 {
            return Err(RasterError::InvalidConfiguration {
                message: format!(
                    "Minimum vertex count must be at least 2, got {}",
                    self.min_vertex_count
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_config_rejects_non_positive_step() {
        assert!(RasterConfig::new(0.0).validate().is_err());
        assert!(RasterConfig::new(-1.0).validate().is_err());
        assert!(RasterConfig::new(f64::NAN).validate().is_err());
        assert!(RasterConfig::new(0.5).validate().is_ok());
    }

    #[test]
    fn test_contour_config_validation() {
        assert!(ContourConfig::new(0.0, 0.0).validate().is_err());
        assert!(
            ContourConfig::new(0.0, 1.0)
                .with_min_vertex_count(1)
                .validate()
                .is_err()
        );
        assert!(
            ContourConfig::new(0.0, 1.0)
                .with_min_vertex_count(2)
                .validate()
                .is_ok()
        );
    }
}
