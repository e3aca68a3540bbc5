//! Local stroke capture: turns pointer samples into a [`Stroke`].

use crate::model::{Brush, Point, Stroke};

/// Origin of the canvas in viewport coordinates (its bounding client rect).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasRect {
    pub left: f64,
    pub top: f64,
}

/// Page scroll offset at the time of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOffset {
    pub x: f64,
    pub y: f64,
}

/// Converts page coordinates into canvas-local ones. The rect and scroll
/// must be read at each sample since the page may scroll mid-stroke.
pub fn to_canvas_local(page_x: f64, page_y: f64, rect: CanvasRect, scroll: ScrollOffset) -> Point {
    Point::new(page_x - (rect.left + scroll.x), page_y - (rect.top + scroll.y))
}

#[derive(Debug, Default)]
pub struct StrokeRecorder {
    current: Option<Stroke>,
}

impl StrokeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_painting(&self) -> bool {
        self.current.is_some()
    }

    /// Starts a stroke with the given brush, discarding any unfinished one.
    pub fn pointer_down(&mut self, brush: &Brush) {
        self.current = Some(Stroke::new(brush.color.clone(), brush.width, Vec::new()));
    }

    /// Records a sample. Ignored (returns `None`) while the pointer is up.
    pub fn pointer_move(
        &mut self,
        page_x: f64,
        page_y: f64,
        rect: CanvasRect,
        scroll: ScrollOffset,
    ) -> Option<Point> {
        let stroke = self.current.as_mut()?;
        let point = to_canvas_local(page_x, page_y, rect, scroll);
        stroke.points.push(point);
        Some(point)
    }

    /// Ends the stroke and hands it over for sending. Pointer-up or
    /// pointer-leave without a preceding pointer-down yields nothing.
    pub fn pointer_up(&mut self) -> Option<Stroke> {
        self.current.take()
    }
}
