// src/grid/interpolation.rs

use crate::error::{RasterError, RasterResult};
use crate::grid::raster::RasterGrid;
use spade::{DelaunayTriangulation, Point2, Triangulation};
use tracing::{debug, warn};

/// Ergebnis eines Interpolationslaufs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    /// Es wurden Zellen gefüllt (0 ist möglich, etwa bei kollinearen
    /// Stützstellen ohne innere Dreiecke).
    Filled { cells: u32 },
    /// Keine leere Zelle vorhanden, nichts zu tun.
    AlreadyComplete,
    /// Weniger als drei nicht-leere Zellen; unterhalb davon ist keine
    /// Triangulation definiert. Das Gitter bleibt unverändert.
    TooFewCells,
}

/// Füllt leere Zellen über eine Delaunay-Triangulation der nicht-leeren
/// Zellkoordinaten: jede leere Zelle innerhalb der konvexen Hülle erhält
/// die baryzentrisch interpolierte Höhe ihres umschließenden Dreiecks.
/// Zellen außerhalb der Hülle bleiben leer (keine Extrapolation).
///
/// Der Durchlauf ist deterministisch und reihenfolgeunabhängig: die
/// Dreiecke zerlegen die Hülle überlappungsfrei, jede leere Zelle wird
/// von höchstens einem Dreieck berührt.
#[derive(Debug, Default)]
pub struct EmptyCellInterpolator;

impl EmptyCellInterpolator {
    /// Mutiert das Gitter in-place. Schlägt die Triangulation fehl, wird
    /// `TriangulationFailed` gemeldet und das Gitter bleibt unverändert.
    pub fn fill(grid: &mut RasterGrid) -> RasterResult<FillOutcome> {
        if u64::from(grid.non_empty_cells) == grid.cell_count() {
            return Ok(FillOutcome::AlreadyComplete);
        }
        if grid.non_empty_cells <= 2 {
            warn!(
                non_empty = grid.non_empty_cells,
                "too few non-empty cells for interpolation"
            );
            return Ok(FillOutcome::TooFewCells);
        }

        let mut sites = Vec::new();
        sites
            .try_reserve_exact(grid.non_empty_cells as usize)
            .map_err(|_| RasterError::OutOfMemory {
                what: "interpolation site buffer".to_string(),
            })?;
        for row in 0..grid.height {
            for col in 0..grid.width {
                if !grid.cell(col, row).is_empty() {
                    sites.push(Point2::new(f64::from(col), f64::from(row)));
                }
            }
        }

        let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
        for &site in &sites {
            triangulation
                .insert(site)
                .map_err(|e| RasterError::TriangulationFailed {
                    reason: format!("site insertion failed: {:?}", e),
                })?;
        }

        let mut filled = 0u32;
        for face in triangulation.inner_faces() {
            let [va, vb, vc] = face.vertices();
            // Stützstellen sind ganzzahlige Zellkoordinaten.
            let p: [[i64; 2]; 3] = [
                [va.position().x.round() as i64, va.position().y.round() as i64],
                [vb.position().x.round() as i64, vb.position().y.round() as i64],
                [vc.position().x.round() as i64, vc.position().y.round() as i64],
            ];

            let height_a = grid.cell(p[0][0] as u32, p[0][1] as u32).height;
            let height_b = grid.cell(p[1][0] as u32, p[1][1] as u32).height;
            let height_c = grid.cell(p[2][0] as u32, p[2][1] as u32).height;

            let det = (p[1][1] - p[2][1]) * (p[0][0] - p[2][0])
                + (p[2][0] - p[1][0]) * (p[0][1] - p[2][1]);
            if det == 0 {
                continue;
            }

            let x_min = p[0][0].min(p[1][0]).min(p[2][0]);
            let y_min = p[0][1].min(p[1][1]).min(p[2][1]);
            let x_max = p[0][0].max(p[1][0]).max(p[2][0]);
            let y_max = p[0][1].max(p[1][1]).max(p[2][1]);

            for j in y_min..=y_max {
                for i in x_min..=x_max {
                    let cell = grid.cell_mut(i as u32, j as u32);
                    if !cell.is_empty() {
                        continue;
                    }

                    // Point Inclusion in Polygon Test (W. Randolph Franklin),
                    // halboffene Kanten, damit Zellen auf gemeinsamen
                    // Dreieckskanten genau einmal gefüllt werden.
                    let mut inside = false;
                    for ti in 0..3 {
                        let p1 = p[ti];
                        let p2 = p[(ti + 1) % 3];
                        if (p2[1] <= j && j < p1[1]) || (p1[1] <= j && j < p2[1]) {
                            let mut t = (i - p2[0]) * (p1[1] - p2[1])
                                - (p1[0] - p2[0]) * (j - p2[1]);
                            if p1[1] < p2[1] {
                                t = -t;
                            }
                            if t < 0 {
                                inside = !inside;
                            }
                        }
                    }
                    if !inside {
                        continue;
                    }

                    let l1 = ((p[1][1] - p[2][1]) * (i - p[2][0])
                        + (p[2][0] - p[1][0]) * (j - p[2][1])) as f64
                        / det as f64;
                    let l2 = ((p[2][1] - p[0][1]) * (i - p[2][0])
                        + (p[0][0] - p[2][0]) * (j - p[2][1])) as f64
                        / det as f64;
                    let l3 = 1.0 - l1 - l2;

                    cell.height = l1 * height_a + l2 * height_b + l3 * height_c;
                    cell.point_count = 1;
                    filled += 1;
                }
            }
        }

        if filled > 0 {
            // Die Statistik soll die interpolierten Zellen einschließen.
            grid.update_statistics();
        }
        debug!(filled, "empty cells interpolated");

        Ok(FillOutcome::Filled { cells: filled })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProjectionAxis;
    use approx::assert_relative_eq;

    fn grid_3x3() -> RasterGrid {
        RasterGrid::with_dimensions(3, 3, 1.0, (0.0, 0.0), ProjectionAxis::Z).unwrap()
    }

    fn set_cell(grid: &mut RasterGrid, col: u32, row: u32, height: f64) {
        let cell = grid.cell_mut(col, row);
        cell.height = height;
        cell.point_count = 1;
        cell.point_index = Some(0);
    }

    #[test]
    fn test_single_non_empty_cell_is_a_noop() {
        let mut grid = grid_3x3();
        set_cell(&mut grid, 1, 1, 5.0);
        grid.update_statistics();

        let before = grid.cells().to_vec();
        let outcome = EmptyCellInterpolator::fill(&mut grid).unwrap();
        assert_eq!(outcome, FillOutcome::TooFewCells);
        assert_eq!(grid.cells(), before.as_slice());
    }

    #[test]
    fn test_full_grid_is_a_noop() {
        let mut grid = grid_3x3();
        for row in 0..3 {
            for col in 0..3 {
                set_cell(&mut grid, col, row, 1.0);
            }
        }
        grid.update_statistics();
        let outcome = EmptyCellInterpolator::fill(&mut grid).unwrap();
        assert_eq!(outcome, FillOutcome::AlreadyComplete);
    }

    #[test]
    fn test_planar_corners_interpolate_linearly() {
        // Höhen liegen auf der Ebene h = x + 2y; jede Triangulation der
        // vier Ecken reproduziert diese Ebene exakt.
        let mut grid = grid_3x3();
        set_cell(&mut grid, 0, 0, 0.0);
        set_cell(&mut grid, 2, 0, 2.0);
        set_cell(&mut grid, 0, 2, 4.0);
        set_cell(&mut grid, 2, 2, 6.0);
        grid.update_statistics();

        let outcome = EmptyCellInterpolator::fill(&mut grid).unwrap();
        // Die halboffene Kantenregel füllt die Zellen auf der oberen und
        // rechten Hüllkante nicht; übrig bleiben (1,0), (0,1) und (1,1).
        assert_eq!(outcome, FillOutcome::Filled { cells: 3 });
        assert_eq!(grid.non_empty_cells, 7);

        for (col, row) in [(1u32, 0u32), (0, 1), (1, 1)] {
            let cell = grid.cell(col, row);
            assert_eq!(cell.point_count, 1);
            assert_relative_eq!(cell.height, f64::from(col) + 2.0 * f64::from(row));
        }
        assert!(grid.cell(2, 1).is_empty());
        assert!(grid.cell(1, 2).is_empty());
        // Interpolierte Zellen tragen keinen Repräsentanten.
        assert_eq!(grid.cell(1, 1).point_index, None);
    }

    #[test]
    fn test_cells_outside_hull_stay_empty() {
        let mut grid = grid_3x3();
        set_cell(&mut grid, 0, 0, 0.0);
        set_cell(&mut grid, 2, 0, 2.0);
        set_cell(&mut grid, 0, 2, 4.0);
        grid.update_statistics();

        EmptyCellInterpolator::fill(&mut grid).unwrap();

        // Alles jenseits der Hypotenuse x+y=2 liegt außerhalb der Hülle.
        assert!(grid.cell(2, 1).is_empty());
        assert!(grid.cell(1, 2).is_empty());
        assert!(grid.cell(2, 2).is_empty());
    }

    #[test]
    fn test_filled_height_bounded_by_triangle_vertices() {
        let mut grid = grid_3x3();
        set_cell(&mut grid, 0, 0, 1.0);
        set_cell(&mut grid, 2, 0, 3.0);
        set_cell(&mut grid, 1, 2, 8.0);
        grid.update_statistics();

        EmptyCellInterpolator::fill(&mut grid).unwrap();

        for cell in grid.cells() {
            if !cell.is_empty() {
                assert!(cell.height >= 1.0 && cell.height <= 8.0);
            }
        }
    }

    #[test]
    fn test_collinear_sites_fill_nothing() {
        let mut grid = grid_3x3();
        set_cell(&mut grid, 0, 0, 1.0);
        set_cell(&mut grid, 1, 0, 2.0);
        set_cell(&mut grid, 2, 0, 3.0);
        grid.update_statistics();

        let outcome = EmptyCellInterpolator::fill(&mut grid).unwrap();
        assert_eq!(outcome, FillOutcome::Filled { cells: 0 });
        assert_eq!(grid.non_empty_cells, 3);
    }

    #[test]
    fn test_statistics_refreshed_after_fill() {
        let mut grid = grid_3x3();
        set_cell(&mut grid, 0, 0, 0.0);
        set_cell(&mut grid, 2, 0, 0.0);
        set_cell(&mut grid, 0, 2, 0.0);
        set_cell(&mut grid, 2, 2, 8.0);
        grid.update_statistics();
        let mean_before = grid.mean_height;

        EmptyCellInterpolator::fill(&mut grid).unwrap();
        assert_eq!(grid.non_empty_cells, 7);
        assert!(grid.mean_height != mean_before);
    }
}
