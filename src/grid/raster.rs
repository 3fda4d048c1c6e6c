// src/grid/raster.rs

use crate::error::{RasterError, RasterResult};
use crate::grid::cell::RasterCell;
use crate::types::ProjectionAxis;
use nalgebra::Point3;
use std::collections::BTreeMap;

/// Das Höhengitter: ein zusammenhängender, zeilenweise (row-major)
/// gespeicherter Zellpuffer plus optionale Skalarfeld-Puffer und die
/// Aggregatstatistik über alle nicht-leeren Zellen.
///
/// Zeile 0 entspricht dem Minimum der vertikalen Ebenenachse; eine
/// kanonische Bildorientierung wird bewusst nicht festgelegt.
#[derive(Debug, Clone)]
pub struct RasterGrid {
    pub width: u32,
    pub height: u32,
    /// Kantenlänge einer Zelle in Weltkoordinaten.
    pub step: f64,
    /// Weltkoordinaten der minimalen Gitterecke auf den Ebenenachsen.
    pub origin: (f64, f64),
    /// Die als Höhe interpretierte Achse.
    pub axis: ProjectionAxis,

    pub(crate) cells: Vec<RasterCell>,
    /// Skalarfeld-Puffer je Quellfeld-Index; NaN markiert unberührte Slots.
    pub(crate) fields: BTreeMap<usize, Vec<f64>>,

    pub min_height: f64,
    pub max_height: f64,
    pub mean_height: f64,
    pub non_empty_cells: u32,

    valid: bool,
}

impl RasterGrid {
    /// Legt ein leeres Gitter mit den gegebenen Dimensionen an.
    /// Allokationsfehler werden als `OutOfMemory` gemeldet, ohne dass ein
    /// teilweise aufgebautes Gitter sichtbar wird.
    pub fn with_dimensions(
        width: u32,
        height: u32,
        step: f64,
        origin: (f64, f64),
        axis: ProjectionAxis,
    ) -> RasterResult<Self> {
        let count = width as usize * height as usize;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(count)
            .map_err(|_| RasterError::OutOfMemory {
                what: format!("{} grid cells", count),
            })?;
        cells.resize(count, RasterCell::default());

        Ok(Self {
            width,
            height,
            step,
            origin,
            axis,
            cells,
            fields: BTreeMap::new(),
            min_height: 0.0,
            max_height: 0.0,
            mean_height: 0.0,
            non_empty_cells: 0,
            valid: false,
        })
    }

    /// Legt einen NaN-initialisierten Feld-Puffer für den Quellfeld-Index an.
    pub(crate) fn allocate_field(&mut self, field: usize) -> RasterResult<()> {
        let count = self.cells.len();
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(count)
            .map_err(|_| RasterError::OutOfMemory {
                what: format!("scalar field grid #{}", field),
            })?;
        buffer.resize(count, f64::NAN);
        self.fields.insert(field, buffer);
        Ok(())
    }

    #[inline]
    pub fn index(&self, col: u32, row: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }

    pub fn cell(&self, col: u32, row: u32) -> &RasterCell {
        &self.cells[self.index(col, row)]
    }

    pub(crate) fn cell_mut(&mut self, col: u32, row: u32) -> &mut RasterCell {
        let index = self.index(col, row);
        &mut self.cells[index]
    }

    /// Alle Zellen in Zeilen-Reihenfolge.
    pub fn cells(&self) -> &[RasterCell] {
        &self.cells
    }

    /// Feld-Puffer zu einem Quellfeld-Index, falls aggregiert.
    pub fn field(&self, field: usize) -> Option<&[f64]> {
        self.fields.get(&field).map(Vec::as_slice)
    }

    /// Indizes aller aggregierten Quellfelder.
    pub fn field_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.fields.keys().copied()
    }

    pub fn cell_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub(crate) fn set_valid(&mut self, valid: bool) {
        self.valid = valid;
    }

    /// Weltposition der minimalen Zellecke, Höhe aus der Zelle selbst.
    /// Nur für nicht-leere (oder gefüllte) Zellen aussagekräftig.
    pub fn cell_world_position(&self, col: u32, row: u32) -> Point3<f64> {
        let cell = self.cell(col, row);
        self.axis.assemble(
            self.origin.0 + col as f64 * self.step,
            self.origin.1 + row as f64 * self.step,
            cell.height,
        )
    }

    /// Quellpunkt-Indizes aller nicht-leeren Zellen in Zeilen-Reihenfolge;
    /// genau die Eingabe, die ein Cloud-Resampler braucht.
    pub fn representative_indices(&self) -> Vec<usize> {
        self.cells
            .iter()
            .filter(|cell| !cell.is_empty())
            .filter_map(|cell| cell.point_index)
            .collect()
    }

    /// Berechnet min/max/mean und die Anzahl nicht-leerer Zellen in einem
    /// einzigen Durchlauf. Die erste nicht-leere Zelle initialisiert die
    /// Extremwerte; die Summe läuft in einem lokalen Akkumulator und wird
    /// erst ganz am Ende durch die Zellzahl geteilt.
    pub(crate) fn update_statistics(&mut self) {
        self.min_height = 0.0;
        self.max_height = 0.0;
        self.mean_height = 0.0;
        self.non_empty_cells = 0;

        let mut sum = 0.0;
        for cell in &self.cells {
            if cell.is_empty() {
                continue;
            }
            let h = cell.height;
            if self.non_empty_cells > 0 {
                if h < self.min_height {
                    self.min_height = h;
                } else if h > self.max_height {
                    self.max_height = h;
                }
            } else {
                self.min_height = h;
                self.max_height = h;
            }
            sum += h;
            self.non_empty_cells += 1;
        }

        if self.non_empty_cells > 0 {
            self.mean_height = sum / f64::from(self.non_empty_cells);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn small_grid() -> RasterGrid {
        let mut grid =
            RasterGrid::with_dimensions(3, 2, 1.0, (0.0, 0.0), ProjectionAxis::Z).unwrap();
        for (i, h) in [2.0, 4.0, 6.0].iter().enumerate() {
            let cell = grid.cell_mut(i as u32, 0);
            cell.height = *h;
            cell.point_count = 1;
            cell.point_index = Some(i);
        }
        grid.update_statistics();
        grid
    }

    #[test]
    fn test_statistics_over_non_empty_cells() {
        let grid = small_grid();
        assert_eq!(grid.non_empty_cells, 3);
        assert_eq!(grid.min_height, 2.0);
        assert_eq!(grid.max_height, 6.0);
        assert_relative_eq!(grid.mean_height, 4.0);
    }

    #[test]
    fn test_statistics_empty_grid() {
        let mut grid =
            RasterGrid::with_dimensions(2, 2, 1.0, (0.0, 0.0), ProjectionAxis::Z).unwrap();
        grid.update_statistics();
        assert_eq!(grid.non_empty_cells, 0);
        assert_eq!(grid.mean_height, 0.0);
    }

    #[test]
    fn test_representative_indices_row_major() {
        let grid = small_grid();
        assert_eq!(grid.representative_indices(), vec![0, 1, 2]);
    }

    #[test]
    fn test_cell_world_position_uses_plane_axes() {
        let mut grid =
            RasterGrid::with_dimensions(3, 2, 2.0, (10.0, 20.0), ProjectionAxis::Z).unwrap();
        grid.cell_mut(1, 1).height = 5.0;
        let p = grid.cell_world_position(1, 1);
        assert_eq!(p, Point3::new(12.0, 22.0, 5.0));
    }
}
