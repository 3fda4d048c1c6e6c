// src/grid/fill.rs

use crate::grid::raster::RasterGrid;
use serde::{Deserialize, Serialize};

/// Strategie für Zellen ohne Punkte. Alle Gitter-Konsumenten (Resampler,
/// Raster-Export, Anzeige) teilen sich genau diese Aufzählung.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EmptyCellPolicy {
    /// Leere Zellen bleiben leer.
    LeaveEmpty,
    FillMinimumHeight,
    FillAverageHeight,
    FillMaximumHeight,
    /// Leere Zellen erhalten eine feste Höhe.
    FillCustomHeight(f64),
    /// Leere Zellen innerhalb der konvexen Hülle werden trianguliert und
    /// interpoliert; Zellen außerhalb erhalten die angegebene Ersatzhöhe.
    Interpolate(f64),
}

impl Default for EmptyCellPolicy {
    fn default() -> Self {
        EmptyCellPolicy::LeaveEmpty
    }
}

/// Aufgelöste Strategie: die konkrete Ersatzhöhe (falls vorhanden) und der
/// ggf. um eine außerhalb liegende Ersatzhöhe erweiterte Höhenbereich.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedFill {
    /// `None` bedeutet "leer lassen"; Konsumenten wählen dann ihren
    /// eigenen Sentinel (der Konturtracer nimmt `min_height - 1`).
    pub height: Option<f64>,
    pub min_height: f64,
    pub max_height: f64,
}

impl EmptyCellPolicy {
    /// Löst die Strategie gegen die Statistik eines Gitters auf.
    pub fn resolve(&self, grid: &RasterGrid) -> ResolvedFill {
        let mut min_height = grid.min_height;
        let mut max_height = grid.max_height;

        let height = match *self {
            EmptyCellPolicy::LeaveEmpty => None,
            EmptyCellPolicy::FillMinimumHeight => Some(grid.min_height),
            EmptyCellPolicy::FillMaximumHeight => Some(grid.max_height),
            // Die mittlere Höhe ist nur ein Spezialfall einer festen Höhe
            // und liegt immer im Bereich [min, max].
            EmptyCellPolicy::FillAverageHeight => Some(grid.mean_height),
            EmptyCellPolicy::FillCustomHeight(custom) | EmptyCellPolicy::Interpolate(custom) => {
                // Der Bereich wird nur erweitert, wenn es überhaupt leere
                // Zellen gibt, die den Ersatzwert tragen.
                if u64::from(grid.non_empty_cells) != grid.cell_count() {
                    if custom <= grid.min_height {
                        min_height = custom;
                    } else if custom >= grid.max_height {
                        max_height = custom;
                    }
                }
                Some(custom)
            }
        };

        ResolvedFill {
            height,
            min_height,
            max_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProjectionAxis;

    fn grid_with_range(min: f64, max: f64, fill_all: bool) -> RasterGrid {
        let mut grid =
            RasterGrid::with_dimensions(2, 1, 1.0, (0.0, 0.0), ProjectionAxis::Z).unwrap();
        {
            let cell = grid.cell_mut(0, 0);
            cell.height = min;
            cell.point_count = 1;
        }
        if fill_all {
            let cell = grid.cell_mut(1, 0);
            cell.height = max;
            cell.point_count = 1;
        }
        grid.update_statistics();
        grid
    }

    #[test]
    fn test_leave_empty_has_no_height() {
        let grid = grid_with_range(1.0, 5.0, false);
        let resolved = EmptyCellPolicy::LeaveEmpty.resolve(&grid);
        assert_eq!(resolved.height, None);
    }

    #[test]
    fn test_custom_height_widens_range_only_with_empty_cells() {
        let sparse = grid_with_range(1.0, 5.0, false);
        let resolved = EmptyCellPolicy::FillCustomHeight(-10.0).resolve(&sparse);
        assert_eq!(resolved.height, Some(-10.0));
        assert_eq!(resolved.min_height, -10.0);

        let full = grid_with_range(1.0, 5.0, true);
        let resolved = EmptyCellPolicy::FillCustomHeight(-10.0).resolve(&full);
        assert_eq!(resolved.min_height, 1.0);
        assert_eq!(resolved.max_height, 5.0);
    }

    #[test]
    fn test_average_resolves_to_mean() {
        let grid = grid_with_range(2.0, 6.0, true);
        let resolved = EmptyCellPolicy::FillAverageHeight.resolve(&grid);
        assert_eq!(resolved.height, Some(4.0));
    }
}
