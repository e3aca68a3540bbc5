//! Replays a stroke onto a drawing surface.

use crate::model::{DEFAULT_LINE_WIDTH, Point, Stroke};

/// Minimal path API of a 2D drawing surface.
pub trait Canvas {
    fn begin_path(&mut self);
    fn move_to(&mut self, point: Point);
    fn line_to(&mut self, point: Point);
    fn stroke(&mut self, color: &str, width: f64);
}

/// Recorded path operation, mostly useful for tests and text front ends.
#[derive(Debug, Clone, PartialEq)]
pub enum PathOp {
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    Stroke { color: String, width: f64 },
}

impl Canvas for Vec<PathOp> {
    fn begin_path(&mut self) {
        self.push(PathOp::BeginPath);
    }

    fn move_to(&mut self, point: Point) {
        self.push(PathOp::MoveTo(point));
    }

    fn line_to(&mut self, point: Point) {
        self.push(PathOp::LineTo(point));
    }

    fn stroke(&mut self, color: &str, width: f64) {
        self.push(PathOp::Stroke {
            color: color.to_owned(),
            width,
        });
    }
}

/// What a stroke renders to: one style and the runs of finite points.
/// Each run starts a new sub-path, so no segment touches a non-finite point.
#[derive(Debug, Clone, PartialEq)]
pub struct PathPlan {
    pub color: String,
    pub width: f64,
    pub runs: Vec<Vec<Point>>,
}

pub fn plan_path(stroke: &Stroke) -> Option<PathPlan> {
    let mut runs: Vec<Vec<Point>> = Vec::new();
    let mut current: Vec<Point> = Vec::new();

    for point in &stroke.points {
        if point.is_finite() {
            current.push(*point);
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }

    if runs.is_empty() {
        return None;
    }

    Some(PathPlan {
        color: stroke.color.clone(),
        width: effective_width(stroke.width),
        runs,
    })
}

/// Draws `stroke` as a single styled path. Returns `false` when there was
/// nothing to draw.
pub fn replay<C: Canvas + ?Sized>(stroke: &Stroke, canvas: &mut C) -> bool {
    let Some(plan) = plan_path(stroke) else {
        return false;
    };

    canvas.begin_path();
    for run in &plan.runs {
        let Some((first, rest)) = run.split_first() else {
            continue;
        };
        canvas.move_to(*first);
        for point in rest {
            canvas.line_to(*point);
        }
    }
    canvas.stroke(&plan.color, plan.width);
    true
}

/// Width actually used for rendering. Non-finite or non-positive widths fall
/// back to the default pen width.
pub fn effective_width(width: f64) -> f64 {
    if width.is_finite() && width > 0.0 {
        width
    } else {
        DEFAULT_LINE_WIDTH
    }
}
