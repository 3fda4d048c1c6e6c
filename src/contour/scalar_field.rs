// src/contour/scalar_field.rs

use crate::error::{RasterError, RasterResult};
use crate::grid::raster::RasterGrid;

/// Trait für ein zweidimensionales Skalarfeld. Erlaubt es dem
/// Marching-Squares-Tracer, auf beliebigen Feldimplementierungen zu
/// operieren.
pub trait ScalarField2D {
    /// Breite des Feldes in Stützstellen.
    fn width(&self) -> usize;

    /// Höhe des Feldes in Stützstellen.
    fn height(&self) -> usize;

    /// Skalarwert an der Stützstelle (x, y); Indizes sind 0-basiert und
    /// müssen innerhalb der Dimensionen liegen.
    fn value(&self, x: usize, y: usize) -> f64;
}

/// Arbeitskopie des Höhengitters mit einem ein Zellen breiten Rand auf
/// allen Seiten. Der Rand liegt garantiert unter jeder realen Iso-Höhe,
/// damit Konturen dort nie eine Schwellenkreuzung auslösen und alle
/// Linien geschlossen auslaufen.
#[derive(Debug, Clone)]
pub struct PaddedHeightField {
    data: Vec<f64>,
    width: usize,
    height: usize,
}

impl PaddedHeightField {
    /// Baut das gepolsterte Feld: Rand = `border_height`, Innenzellen
    /// übernehmen die Zellhöhe bzw. `empty_cell_height` für leere Zellen.
    pub fn from_grid(
        grid: &RasterGrid,
        empty_cell_height: f64,
        border_height: f64,
    ) -> RasterResult<Self> {
        let width = grid.width as usize + 2;
        let height = grid.height as usize + 2;

        let mut data = Vec::new();
        data.try_reserve_exact(width * height)
            .map_err(|_| RasterError::OutOfMemory {
                what: "padded contour field".to_string(),
            })?;
        data.resize(width * height, border_height);

        for row in 0..grid.height {
            let offset = (row as usize + 1) * width + 1;
            for col in 0..grid.width {
                let cell = grid.cell(col, row);
                data[offset + col as usize] = if cell.is_empty() {
                    empty_cell_height
                } else {
                    cell.height
                };
            }
        }

        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Direkter Aufbau aus Rohwerten, primär für Tests.
    pub fn from_values(width: usize, height: usize, data: Vec<f64>) -> Self {
        assert_eq!(data.len(), width * height);
        Self {
            data,
            width,
            height,
        }
    }
}

impl ScalarField2D for PaddedHeightField {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn value(&self, x: usize, y: usize) -> f64 {
        self.data[y * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProjectionAxis;

    #[test]
    fn test_padded_field_layout() {
        let mut grid =
            RasterGrid::with_dimensions(2, 2, 1.0, (0.0, 0.0), ProjectionAxis::Z).unwrap();
        {
            let cell = grid.cell_mut(0, 0);
            cell.height = 7.0;
            cell.point_count = 1;
        }
        grid.update_statistics();

        let field = PaddedHeightField::from_grid(&grid, -5.0, -8.0).unwrap();
        assert_eq!(field.width(), 4);
        assert_eq!(field.height(), 4);
        // Rand
        assert_eq!(field.value(0, 0), -8.0);
        assert_eq!(field.value(3, 3), -8.0);
        // Innenzellen: belegt und leer
        assert_eq!(field.value(1, 1), 7.0);
        assert_eq!(field.value(2, 1), -5.0);
        assert_eq!(field.value(1, 2), -5.0);
    }
}
