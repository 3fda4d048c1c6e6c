// src/grid/builder.rs

use crate::cloud::PointCloudSource;
use crate::config::{ProjectionMode, RasterConfig};
use crate::error::{RasterError, RasterResult, RasterWarning};
use crate::grid::raster::RasterGrid;
use crate::progress::ProgressSink;
use crate::types::Bounds3;
use tracing::{info, warn};

/// Oberhalb dieser Zellzahl (und bei genau einer Zelle) wird der Aufbau
/// nur noch nach Rückfrage beim Aufrufer fortgesetzt.
pub const UNUSUAL_CELL_COUNT: u64 = 10_000_000;

/// Baut aus einer Punktwolke ein Höhengitter: Punkte werden entlang der
/// Projektionsachse in Zellen einsortiert und pro Zelle zu einem Wert
/// aggregiert. Jeder Aufruf von `build` erzeugt ein vollständig neues
/// Gitter; ein vorheriges Gitter des Aufrufers bleibt bei Fehlern und
/// Abbruch unberührt.
#[derive(Debug)]
pub struct GridBuilder {
    config: RasterConfig,
    warnings: Vec<RasterWarning>,
}

impl GridBuilder {
    pub fn new(config: RasterConfig) -> Self {
        Self {
            config,
            warnings: Vec::new(),
        }
    }

    pub fn config(&self) -> &RasterConfig {
        &self.config
    }

    /// Hinweise aus dem letzten `build`-Aufruf.
    pub fn warnings(&self) -> &[RasterWarning] {
        &self.warnings
    }

    /// Gitterdimensionen für eine Region, ohne etwas zu allokieren.
    /// Erlaubt dem Aufrufer, ungewöhnliche Größen vorab zu bestätigen.
    pub fn grid_dimensions(&self, region: &Bounds3) -> RasterResult<(u32, u32)> {
        self.config.validate()?;

        let (extent_h, extent_v) = region.plane_extents(self.config.axis);
        if extent_h <= 0.0 || extent_v <= 0.0 {
            return Err(RasterError::InvalidRegion { extent_h, extent_v });
        }

        let width = (extent_h / self.config.step).ceil() as u32;
        let height = (extent_v / self.config.step).ceil() as u32;
        Ok((width, height))
    }

    pub fn build(
        &mut self,
        cloud: &dyn PointCloudSource,
        region: &Bounds3,
        progress: &mut dyn ProgressSink,
    ) -> RasterResult<RasterGrid> {
        self.warnings.clear();

        let (width, height) = self.grid_dimensions(region)?;
        let cell_count = u64::from(width) * u64::from(height);
        if cell_count == 1 || cell_count > UNUSUAL_CELL_COUNT {
            warn!(cell_count, "unusual grid size");
            self.warnings
                .push(RasterWarning::UnusualGridSize { cell_count });
            if self.config.abort_on_unusual_size {
                return Err(RasterError::Cancelled);
            }
        }

        let axis = self.config.axis;
        let step = self.config.step;
        let mut grid =
            RasterGrid::with_dimensions(width, height, step, region.plane_origin(axis), axis)?;

        let field_aggregation = self
            .config
            .field_aggregation
            .filter(|_| cloud.field_count() > 0);
        if field_aggregation.is_some() {
            for field in 0..cloud.field_count() {
                grid.allocate_field(field)?;
            }
        }

        let point_count = cloud.len();
        progress.begin(point_count as u64);

        let (origin_h, origin_v) = grid.origin;
        // Exakte Maximalkante des Gitters; Punkte genau darauf werden in
        // die letzte Spalte/Zeile geklemmt statt verworfen.
        let grid_max_h = step * f64::from(width);
        let grid_max_v = step * f64::from(height);

        for n in 0..point_count {
            let point = cloud.point(n);
            let (ph, pv, pz) = axis.split(&point);

            let rel_h = ph - origin_h;
            let rel_v = pv - origin_v;
            let mut col = (rel_h / step).floor() as i64;
            let mut row = (rel_v / step).floor() as i64;

            if col == i64::from(width) && rel_h == grid_max_h {
                col -= 1;
            }
            if row == i64::from(height) && rel_v == grid_max_v {
                row -= 1;
            }

            // Punkte außerhalb der konfigurierten Region werden übergangen.
            if col >= 0 && col < i64::from(width) && row >= 0 && row < i64::from(height) {
                let (col, row) = (col as u32, row as u32);
                let cell = grid.cell_mut(col, row);
                let points_in_cell = cell.point_count;

                if points_in_cell > 0 {
                    match self.config.height_aggregation {
                        ProjectionMode::Minimum => {
                            if pz < cell.height {
                                cell.height = pz;
                                cell.point_index = Some(n);
                            }
                        }
                        ProjectionMode::Maximum => {
                            if pz > cell.height {
                                cell.height = pz;
                                cell.point_index = Some(n);
                            }
                        }
                        ProjectionMode::Average => {
                            cell.height += pz;
                        }
                    }
                } else {
                    cell.height = pz;
                    cell.point_index = Some(n);
                }

                if let Some(mode) = field_aggregation {
                    let pos = grid.index(col, row);
                    for (&field, buffer) in grid.fields.iter_mut() {
                        let value = cloud.field_value(field, n);
                        let former = buffer[pos];
                        if points_in_cell > 0 && !former.is_nan() {
                            // NaN-Werte überschreiben nichts und zählen
                            // auch in keine laufende Aggregation hinein.
                            if !value.is_nan() {
                                buffer[pos] = match mode {
                                    ProjectionMode::Minimum => former.min(value),
                                    ProjectionMode::Maximum => former.max(value),
                                    ProjectionMode::Average => former + value,
                                };
                            }
                        } else {
                            buffer[pos] = value;
                        }
                    }
                }

                grid.cell_mut(col, row).point_count += 1;
            }

            if !progress.advance() {
                // Abbruch: das halbfertige Gitter wird verworfen, nichts
                // davon wird veröffentlicht.
                return Err(RasterError::Cancelled);
            }
        }

        if field_aggregation == Some(ProjectionMode::Average) {
            for buffer in grid.fields.values_mut() {
                for (slot, cell) in buffer.iter_mut().zip(grid.cells.iter()) {
                    if cell.point_count > 0 && !slot.is_nan() {
                        *slot /= f64::from(cell.point_count);
                    }
                }
            }
        }

        if self.config.height_aggregation == ProjectionMode::Average {
            for cell in &mut grid.cells {
                if cell.point_count > 1 {
                    cell.height /= f64::from(cell.point_count);
                }
            }
        }

        grid.update_statistics();
        grid.set_valid(true);

        info!(
            width = grid.width,
            height = grid.height,
            non_empty = grid.non_empty_cells,
            "height grid built"
        );

        Ok(grid)
    }
}
