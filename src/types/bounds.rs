// src/types/bounds.rs

use crate::error::{RasterError, RasterResult};
use crate::types::axis::ProjectionAxis;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 3D Bounding Box (Axis-Aligned)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds3 {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Bounds3 {
    /// Erstellt eine neue Bounding Box; min muss komponentenweise <= max sein.
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> RasterResult<Self> {
        if min.x > max.x || min.y > max.y || min.z > max.z {
            return Err(RasterError::InvalidConfiguration {
                message: format!("Invalid bounds: min {:?} > max {:?}", min, max),
            });
        }
        Ok(Self { min, max })
    }

    /// Erstellt eine Bounding Box aus zwei beliebigen Punkten.
    pub fn from_points(p1: Point3<f64>, p2: Point3<f64>) -> Self {
        Self {
            min: Point3::new(p1.x.min(p2.x), p1.y.min(p2.y), p1.z.min(p2.z)),
            max: Point3::new(p1.x.max(p2.x), p1.y.max(p2.y), p1.z.max(p2.z)),
        }
    }

    /// Erstellt eine Bounding Box, die alle Punkte umschließt.
    pub fn from_points_iter<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3<f64>>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;

        let mut min = first;
        let mut max = first;
        for p in iter {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }
        Some(Self { min, max })
    }

    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x
            && self.min.y <= self.max.y
            && self.min.z <= self.max.z
            && self.min.coords.iter().all(|c| c.is_finite())
            && self.max.coords.iter().all(|c| c.is_finite())
    }

    pub fn size(&self) -> Point3<f64> {
        Point3::from(self.max - self.min)
    }

    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn contains_point(&self, p: &Point3<f64>) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Ausdehnung der Box auf den beiden Gitterebenen-Achsen
    /// (horizontal, vertikal) für die gegebene Projektionsachse.
    pub fn plane_extents(&self, axis: ProjectionAxis) -> (f64, f64) {
        let diag = self.max - self.min;
        (diag[axis.horizontal_index()], diag[axis.vertical_index()])
    }

    /// Minimale Ecke der Box auf den Gitterebenen-Achsen.
    pub fn plane_origin(&self, axis: ProjectionAxis) -> (f64, f64) {
        (
            self.min[axis.horizontal_index()],
            self.min[axis.vertical_index()],
        )
    }
}

impl fmt::Display for Bounds3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bounds3({:?} to {:?})", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_inverted_bounds() {
        let result = Bounds3::new(Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 1.0));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_points_iter() {
        let bounds = Bounds3::from_points_iter([
            Point3::new(1.0, 5.0, -2.0),
            Point3::new(-3.0, 2.0, 4.0),
            Point3::new(0.0, 0.0, 0.0),
        ])
        .unwrap();
        assert_eq!(bounds.min, Point3::new(-3.0, 0.0, -2.0));
        assert_eq!(bounds.max, Point3::new(1.0, 5.0, 4.0));
    }

    #[test]
    fn test_plane_extents() {
        let bounds = Bounds3::from_points(Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 3.0, 7.0));
        assert_eq!(bounds.plane_extents(ProjectionAxis::Z), (4.0, 3.0));
        assert_eq!(bounds.plane_extents(ProjectionAxis::X), (3.0, 7.0));
    }
}
