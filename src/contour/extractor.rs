// src/contour/extractor.rs

use crate::config::ContourConfig;
use crate::contour::marching::extract_contours;
use crate::contour::scalar_field::PaddedHeightField;
use crate::contour::splitter::{BorderSplitter, SplitFragment};
use crate::error::{RasterError, RasterResult};
use crate::grid::raster::RasterGrid;
use crate::progress::ProgressSink;
use nalgebra::Point3;
use tracing::{debug, info};

/// Eine Iso-Höhenlinie in Weltkoordinaten.
#[derive(Debug, Clone)]
pub struct ContourLine {
    pub level: f64,
    pub vertices: Vec<Point3<f64>>,
    /// Nur gesetzt, wenn die Linie nie beschnitten wurde und die
    /// Verfolgung zu ihrem Anfang zurückgekehrt ist.
    pub closed: bool,
}

/// Extrahiert Iso-Höhenlinien aus einem fertigen Gitter, für eine Folge
/// von Leveln ab `start_level` in Schritten von `level_step` bis zur
/// maximalen Gitterhöhe. Die Linien sind ein abgeleitetes Wegwerfprodukt;
/// sie werden nie über Aufrufe hinweg gehalten.
#[derive(Debug, Default)]
pub struct ContourExtractor;

impl ContourExtractor {
    /// `empty_cell_height` ist die Ersatzhöhe für leere Zellen, aus der
    /// Leerzellen-Strategie des Aufrufers; `None` ("leer lassen") setzt
    /// den Sentinel `min_height - 1` unterhalb aller realen Level ein.
    ///
    /// Abbruch zwischen zwei Leveln liefert die bis dahin erzeugten
    /// Linien als Teilergebnis, keinen Fehler.
    pub fn trace(
        grid: &RasterGrid,
        empty_cell_height: Option<f64>,
        config: &ContourConfig,
        progress: &mut dyn ProgressSink,
    ) -> RasterResult<Vec<ContourLine>> {
        config.validate()?;
        if !grid.is_valid() {
            return Err(RasterError::InvalidConfiguration {
                message: "contour tracing requires a valid grid".to_string(),
            });
        }
        if config.start_level > grid.max_height {
            return Err(RasterError::StartAboveRange {
                start_level: config.start_level,
                max_height: grid.max_height,
            });
        }

        let border_height = grid.min_height - 1.0;
        let substitute = empty_cell_height.unwrap_or(border_height);
        let field = PaddedHeightField::from_grid(grid, substitute, border_height)?;

        let level_count =
            1 + ((grid.max_height - config.start_level) / config.level_step).floor() as u64;
        progress.begin(level_count);

        let width = f64::from(grid.width);
        let height = f64::from(grid.height);

        let mut lines = Vec::new();
        let mut z = config.start_level;
        while z <= grid.max_height {
            let raw_contours = extract_contours(&field, z);
            debug!(level = z, count = raw_contours.len(), "contour level traced");

            for raw in raw_contours {
                // Polsterungs-Offset herausrechnen.
                let shifted: Vec<(f64, f64)> =
                    raw.vertices.iter().map(|&(x, y)| (x - 1.0, y - 1.0)).collect();

                let fragments: Vec<SplitFragment> = if config.ignore_border {
                    let mut splitter = BorderSplitter::new();
                    for &(x, y) in &shifted {
                        let outside = x < 1.0 || y < 1.0 || x + 1.0 >= width || y + 1.0 >= height;
                        if outside {
                            splitter.push_outside();
                        } else {
                            splitter.push_inside((x, y));
                        }
                    }
                    splitter.finish(raw.closed)
                } else {
                    vec![SplitFragment {
                        vertices: shifted,
                        closed: raw.closed,
                    }]
                };

                for fragment in fragments {
                    if fragment.vertices.len() < config.min_vertex_count {
                        continue;
                    }
                    let vertices: Vec<Point3<f64>> = fragment
                        .vertices
                        .iter()
                        .map(|&(x, y)| {
                            grid.axis.assemble(
                                grid.origin.0 + x * grid.step,
                                grid.origin.1 + y * grid.step,
                                z,
                            )
                        })
                        .collect();
                    lines.push(ContourLine {
                        level: z,
                        vertices,
                        closed: fragment.closed,
                    });
                }
            }

            z += config.level_step;
            if !progress.advance() {
                // Abbruch: alle bisher erzeugten Linien bleiben gültig.
                break;
            }
        }

        info!(
            lines = lines.len(),
            levels = level_count,
            "contour lines generated"
        );
        Ok(lines)
    }
}
