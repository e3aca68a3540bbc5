use serde::{Deserialize, Serialize};

pub const DEFAULT_COLOR: &str = "#000000";
pub const DEFAULT_LINE_WIDTH: f64 = 5.0;
pub const ERASER_COLOR: &str = "#ffffff";
pub const ERASER_WIDTH: f64 = 20.0;
pub const MIN_LINE_WIDTH: f64 = 1.0;
pub const MAX_LINE_WIDTH: f64 = 50.0;

/// Style applied to a stroke when the pointer goes down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brush {
    pub color: String,
    pub width: f64,
}

impl Brush {
    pub fn new(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            width: clamp_width(width),
        }
    }

    pub fn eraser() -> Self {
        Self::new(ERASER_COLOR, ERASER_WIDTH)
    }
}

impl Default for Brush {
    fn default() -> Self {
        Self::new(DEFAULT_COLOR, DEFAULT_LINE_WIDTH)
    }
}

/// Active brush plus the pen remembered while the eraser is selected.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    active: Brush,
    saved_pen: Option<Brush>,
}

impl Palette {
    pub fn new(pen: Brush) -> Self {
        Self {
            active: pen,
            saved_pen: None,
        }
    }

    pub fn active(&self) -> &Brush {
        &self.active
    }

    pub fn is_erasing(&self) -> bool {
        self.saved_pen.is_some()
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.active.color = color.into();
    }

    pub fn set_width(&mut self, width: f64) {
        self.active.width = clamp_width(width);
    }

    pub fn use_eraser(&mut self) {
        if self.saved_pen.is_none() {
            self.saved_pen = Some(std::mem::replace(&mut self.active, Brush::eraser()));
        }
    }

    pub fn use_pen(&mut self) {
        if let Some(pen) = self.saved_pen.take() {
            self.active = pen;
        }
    }
}

fn clamp_width(width: f64) -> f64 {
    if width.is_nan() {
        return DEFAULT_LINE_WIDTH;
    }
    width.clamp(MIN_LINE_WIDTH, MAX_LINE_WIDTH)
}
