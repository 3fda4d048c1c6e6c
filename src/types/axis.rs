// src/types/axis.rs

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Die 3D-Achse, die als "Höhe" interpretiert wird. Die beiden anderen
/// Achsen spannen (in fester zyklischer Reihenfolge) die Gitterebene auf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectionAxis {
    X,
    Y,
    Z,
}

impl Default for ProjectionAxis {
    fn default() -> Self {
        ProjectionAxis::Z
    }
}

impl ProjectionAxis {
    /// Index der Höhenachse (0, 1 oder 2).
    pub fn index(self) -> usize {
        match self {
            ProjectionAxis::X => 0,
            ProjectionAxis::Y => 1,
            ProjectionAxis::Z => 2,
        }
    }

    /// Index der horizontalen Gitterachse: (achse + 1) mod 3.
    pub fn horizontal_index(self) -> usize {
        (self.index() + 1) % 3
    }

    /// Index der vertikalen Gitterachse: (achse + 2) mod 3.
    pub fn vertical_index(self) -> usize {
        (self.index() + 2) % 3
    }

    /// Projiziert einen 3D-Punkt auf (horizontal, vertikal, höhe).
    pub fn split(self, p: &Point3<f64>) -> (f64, f64, f64) {
        (
            p[self.horizontal_index()],
            p[self.vertical_index()],
            p[self.index()],
        )
    }

    /// Setzt einen 3D-Punkt aus Ebenen-Koordinaten und Höhe zusammen.
    /// Umkehrung von `split`.
    pub fn assemble(self, horizontal: f64, vertical: f64, height: f64) -> Point3<f64> {
        let mut p = Point3::origin();
        p[self.horizontal_index()] = horizontal;
        p[self.vertical_index()] = vertical;
        p[self.index()] = height;
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cyclic_plane_axes() {
        assert_eq!(ProjectionAxis::Z.horizontal_index(), 0);
        assert_eq!(ProjectionAxis::Z.vertical_index(), 1);
        assert_eq!(ProjectionAxis::X.horizontal_index(), 1);
        assert_eq!(ProjectionAxis::X.vertical_index(), 2);
        assert_eq!(ProjectionAxis::Y.horizontal_index(), 2);
        assert_eq!(ProjectionAxis::Y.vertical_index(), 0);
    }

    #[test]
    fn test_split_assemble_roundtrip() {
        let p = Point3::new(1.0, 2.0, 3.0);
        for axis in [ProjectionAxis::X, ProjectionAxis::Y, ProjectionAxis::Z] {
            let (h, v, z) = axis.split(&p);
            assert_eq!(axis.assemble(h, v, z), p);
        }
    }
}
