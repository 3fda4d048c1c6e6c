// src/contour/marching.rs

use crate::contour::scalar_field::ScalarField2D;
use std::collections::HashMap;

const EPSILON: f64 = 1e-10;
/// Skalierung für hashbare Stützpunkt-Schlüssel.
const KEY_SCALE: f64 = 1e6;

/// Eine rohe, noch ungefilterte Konturlinie in Gitterkoordinaten
/// (Spalte, Zeile als Gleitkommawerte auf den Zellkanten).
#[derive(Debug, Clone, Default)]
pub struct RawContour {
    pub vertices: Vec<(f64, f64)>,
    pub closed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellEdge {
    Left,
    Top,
    Right,
    Bottom,
}

use CellEdge::{Bottom, Left, Right, Top};

/// Konvention: Bit 8: oben-links, Bit 4: oben-rechts, Bit 2: unten-rechts,
/// Bit 1: unten-links. Jeder Fall liefert bis zu zwei Liniensegmente als
/// Kantenpaare; die Sattel-Fälle 5 und 10 tragen beide Segmente.
const EDGE_TABLE: [[Option<(CellEdge, CellEdge)>; 2]; 16] = [
    [None, None],                            // 0000: --
    [Some((Left, Bottom)), None],            // 0001: L -> B
    [Some((Bottom, Right)), None],           // 0010: B -> R
    [Some((Left, Right)), None],             // 0011: L -> R
    [Some((Top, Right)), None],              // 0100: T -> R
    [Some((Top, Left)), Some((Bottom, Right))], // 0101: Sattel
    [Some((Top, Bottom)), None],             // 0110: T -> B
    [Some((Top, Left)), None],               // 0111: T -> L
    [Some((Left, Top)), None],               // 1000: L -> T
    [Some((Top, Bottom)), None],             // 1001: T -> B
    [Some((Top, Right)), Some((Left, Bottom))], // 1010: Sattel
    [Some((Top, Right)), None],              // 1011: T -> R
    [Some((Left, Right)), None],             // 1100: L -> R
    [Some((Bottom, Right)), None],           // 1101: B -> R
    [Some((Bottom, Left)), None],            // 1110: B -> L
    [None, None],                            // 1111: ##
];

#[inline]
fn quantize(p: (f64, f64)) -> (i64, i64) {
    ((p.0 * KEY_SCALE).round() as i64, (p.1 * KEY_SCALE).round() as i64)
}

fn cell_case<F: ScalarField2D + ?Sized>(field: &F, threshold: f64, x: usize, y: usize) -> usize {
    let mut case = 0;
    if field.value(x, y) >= threshold {
        case |= 8; // oben-links
    }
    if field.value(x + 1, y) >= threshold {
        case |= 4; // oben-rechts
    }
    if field.value(x + 1, y + 1) >= threshold {
        case |= 2; // unten-rechts
    }
    if field.value(x, y + 1) >= threshold {
        case |= 1; // unten-links
    }
    case
}

/// Linearer Schnittparameter zwischen zwei Stützwerten.
fn interpolate(v1: f64, v2: f64, threshold: f64) -> f64 {
    if (v1 - v2).abs() < EPSILON {
        return 0.5;
    }
    ((threshold - v1) / (v2 - v1)).clamp(0.0, 1.0)
}

/// Schnittpunkt der Iso-Linie mit einer Zellkante, in Gitterkoordinaten.
fn crossing<F: ScalarField2D + ?Sized>(
    field: &F,
    threshold: f64,
    x: usize,
    y: usize,
    edge: CellEdge,
) -> (f64, f64) {
    let (xf, yf) = (x as f64, y as f64);
    match edge {
        CellEdge::Top => {
            let t = interpolate(field.value(x, y), field.value(x + 1, y), threshold);
            (xf + t, yf)
        }
        CellEdge::Bottom => {
            let t = interpolate(field.value(x, y + 1), field.value(x + 1, y + 1), threshold);
            (xf + t, yf + 1.0)
        }
        CellEdge::Left => {
            let t = interpolate(field.value(x, y), field.value(x, y + 1), threshold);
            (xf, yf + t)
        }
        CellEdge::Right => {
            let t = interpolate(field.value(x + 1, y), field.value(x + 1, y + 1), threshold);
            (xf + 1.0, yf + t)
        }
    }
}

/// Extrahiert alle Iso-Linien eines Skalarfeldes für eine Schwelle.
///
/// Zwei Phasen: zuerst liefert jede Zelle ihre Liniensegmente aus der
/// 16-Fälle-Tabelle, danach werden die Segmente über ihre (gemeinsamen,
/// bitgleich berechneten) Endpunkte zu Polylinien verkettet. Eine Linie
/// ist geschlossen, wenn die Verkettung zu ihrem Anfang zurückkehrt.
pub fn extract_contours<F: ScalarField2D + ?Sized>(field: &F, threshold: f64) -> Vec<RawContour> {
    let width = field.width();
    let height = field.height();
    if width <= 1 || height <= 1 {
        return Vec::new();
    }

    let mut segments: Vec<((f64, f64), (f64, f64))> = Vec::new();
    for y in 0..height - 1 {
        for x in 0..width - 1 {
            let case = cell_case(field, threshold, x, y);
            for &(from, to) in EDGE_TABLE[case].iter().flatten() {
                let a = crossing(field, threshold, x, y, from);
                let b = crossing(field, threshold, x, y, to);
                // Entartete Segmente (Ecke exakt auf der Schwelle) stören
                // nur die Verkettung.
                if quantize(a) != quantize(b) {
                    segments.push((a, b));
                }
            }
        }
    }

    let mut incident: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
    for (idx, segment) in segments.iter().enumerate() {
        incident.entry(quantize(segment.0)).or_default().push(idx);
        incident.entry(quantize(segment.1)).or_default().push(idx);
    }

    let mut used = vec![false; segments.len()];
    let mut contours = Vec::new();

    for start in 0..segments.len() {
        if used[start] {
            continue;
        }
        used[start] = true;

        let (a, b) = segments[start];
        let mut vertices = vec![a, b];
        extend_tail(&segments, &incident, &mut used, &mut vertices);

        let closed =
            vertices.len() > 2 && quantize(vertices[0]) == quantize(vertices[vertices.len() - 1]);
        if closed {
            vertices.pop();
        } else {
            // Offene Kette: der Startpunkt kann mitten auf der Linie
            // liegen, also auch rückwärts verlängern.
            vertices.reverse();
            extend_tail(&segments, &incident, &mut used, &mut vertices);
            vertices.reverse();
        }

        contours.push(RawContour { vertices, closed });
    }

    contours
}

fn extend_tail(
    segments: &[((f64, f64), (f64, f64))],
    incident: &HashMap<(i64, i64), Vec<usize>>,
    used: &mut [bool],
    vertices: &mut Vec<(f64, f64)>,
) {
    loop {
        let tail_key = quantize(vertices[vertices.len() - 1]);
        let Some(candidates) = incident.get(&tail_key) else {
            break;
        };

        let mut advanced = false;
        for &idx in candidates {
            if used[idx] {
                continue;
            }
            let (a, b) = segments[idx];
            let next = if quantize(a) == tail_key { b } else { a };
            used[idx] = true;
            vertices.push(next);
            advanced = true;
            break;
        }
        if !advanced {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contour::scalar_field::PaddedHeightField;

    fn field_5x5(values: &[((usize, usize), f64)]) -> PaddedHeightField {
        let mut data = vec![0.0; 25];
        for &((x, y), v) in values {
            data[y * 5 + x] = v;
        }
        PaddedHeightField::from_values(5, 5, data)
    }

    #[test]
    fn test_single_peak_yields_closed_diamond() {
        let field = field_5x5(&[((2, 2), 10.0)]);
        let contours = extract_contours(&field, 5.0);

        assert_eq!(contours.len(), 1);
        let contour = &contours[0];
        assert!(contour.closed);
        assert_eq!(contour.vertices.len(), 4);
        for &(x, y) in &contour.vertices {
            // Alle Schnittpunkte liegen auf halber Kante um (2,2).
            let dist = (x - 2.0).abs() + (y - 2.0).abs();
            assert!((dist - 0.5).abs() < 1e-9);
        }
    }

    #[test]
    fn test_two_peaks_yield_two_contours() {
        let field = field_5x5(&[((1, 1), 10.0), ((3, 3), 10.0)]);
        let contours = extract_contours(&field, 5.0);
        assert_eq!(contours.len(), 2);
        assert!(contours.iter().all(|c| c.closed));
    }

    #[test]
    fn test_threshold_above_everything_yields_nothing() {
        let field = field_5x5(&[((2, 2), 10.0)]);
        assert!(extract_contours(&field, 20.0).is_empty());
    }

    #[test]
    fn test_region_touching_boundary_yields_open_line() {
        // Linke Spalte hoch: die Iso-Linie endet am Feldrand.
        let mut data = vec![0.0; 9];
        for y in 0..3 {
            data[y * 3] = 10.0;
        }
        let field = PaddedHeightField::from_values(3, 3, data);
        let contours = extract_contours(&field, 5.0);

        assert_eq!(contours.len(), 1);
        let contour = &contours[0];
        assert!(!contour.closed);
        assert_eq!(contour.vertices.len(), 3);
        assert!(contour.vertices.iter().all(|&(x, _)| (x - 0.5).abs() < 1e-9));
    }

    #[test]
    fn test_interpolation_position() {
        // Schwelle 2.5 zwischen 0 und 10 liegt bei t = 0.25.
        let mut data = vec![0.0; 9];
        data[1 * 3 + 1] = 10.0;
        let field = PaddedHeightField::from_values(3, 3, data);
        let contours = extract_contours(&field, 2.5);

        assert_eq!(contours.len(), 1);
        for &(x, y) in &contours[0].vertices {
            let dist = (x - 1.0).abs() + (y - 1.0).abs();
            assert!((dist - 0.75).abs() < 1e-9);
        }
    }
}
