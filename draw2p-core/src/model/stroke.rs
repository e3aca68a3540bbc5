use serde::{Deserialize, Serialize};

/// Canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// One pointer-down to pointer-up path, drawn with a single style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
    pub points: Vec<Point>,
}

impl Stroke {
    pub fn new(color: impl Into<String>, width: f64, points: Vec<Point>) -> Self {
        Self {
            color: color.into(),
            width,
            points,
        }
    }

    /// Builds a stroke from `[x0, y0, x1, y1, ...]`. An unpaired trailing
    /// value is dropped.
    pub fn from_flat(color: impl Into<String>, width: f64, coords: &[f64]) -> Self {
        let points = coords
            .chunks_exact(2)
            .map(|pair| Point::new(pair[0], pair[1]))
            .collect();
        Self::new(color, width, points)
    }

    pub fn flat_coords(&self) -> Vec<f64> {
        self.points.iter().flat_map(|p| [p.x, p.y]).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
