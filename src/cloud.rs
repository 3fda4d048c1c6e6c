// src/cloud.rs

use crate::types::Bounds3;
use nalgebra::Point3;

/// Lesezugriff auf eine Punktwolke mit optionalen Skalarfeldern.
/// Der Rasterizer liest die Quelle, verändert sie aber nie.
pub trait PointCloudSource {
    /// Anzahl der Punkte.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Position des Punktes mit dem gegebenen Index.
    fn point(&self, index: usize) -> Point3<f64>;

    /// Anzahl der Skalarfelder der Quelle (0, wenn keine vorhanden sind).
    fn field_count(&self) -> usize {
        0
    }

    /// Name des Skalarfeldes mit dem gegebenen Index.
    fn field_name(&self, _field: usize) -> &str {
        ""
    }

    /// Skalarwert eines Feldes an einem Punkt; NaN, wenn der Wert fehlt.
    fn field_value(&self, _field: usize, _index: usize) -> f64 {
        f64::NAN
    }

    /// Bounding Box über alle Punkte.
    fn bounding_box(&self) -> Bounds3;
}

/// Einfache Vec-basierte Punktwolke, primär für Tests und kleine Einbettungen.
#[derive(Debug, Clone, Default)]
pub struct MemoryPointCloud {
    points: Vec<Point3<f64>>,
    fields: Vec<(String, Vec<f64>)>,
}

impl MemoryPointCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<Point3<f64>>) -> Self {
        Self {
            points,
            fields: Vec::new(),
        }
    }

    pub fn push(&mut self, point: Point3<f64>) {
        self.points.push(point);
        for (_, values) in &mut self.fields {
            values.push(f64::NAN);
        }
    }

    /// Fügt ein Skalarfeld hinzu; fehlende Werte werden mit NaN aufgefüllt.
    pub fn add_field(&mut self, name: impl Into<String>, mut values: Vec<f64>) {
        values.resize(self.points.len(), f64::NAN);
        self.fields.push((name.into(), values));
    }
}

impl PointCloudSource for MemoryPointCloud {
    fn len(&self) -> usize {
        self.points.len()
    }

    fn point(&self, index: usize) -> Point3<f64> {
        self.points[index]
    }

    fn field_count(&self) -> usize {
        self.fields.len()
    }

    fn field_name(&self, field: usize) -> &str {
        &self.fields[field].0
    }

    fn field_value(&self, field: usize, index: usize) -> f64 {
        self.fields[field].1[index]
    }

    fn bounding_box(&self) -> Bounds3 {
        Bounds3::from_points_iter(self.points.iter().copied()).unwrap_or(Bounds3 {
            min: Point3::origin(),
            max: Point3::origin(),
        })
    }
}
