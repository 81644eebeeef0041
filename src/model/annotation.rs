//! Core annotation geometry types.
//!
//! An annotation is a labeled quadrilateral in image-pixel coordinates with
//! a fixed corner order: TL(0) → BL(1) → BR(2) → TR(3). Every producer and
//! consumer (the codec, the drag state machine, the overlay homography on
//! the display side) relies on that order.

use serde::{Deserialize, Serialize};

use crate::model::vocab::ColorToken;

/// Number of corners in a quadrilateral annotation.
pub const CORNER_COUNT: usize = 4;

/// A 2D point in image-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Integer image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Both dimensions strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// An axis-aligned rectangle in image-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Normalized rectangle spanning two corner points in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self {
            x,
            y,
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Intersection with the image bounds; an empty intersection is a zero rect.
    pub fn clamped_to(&self, size: Size) -> Rect {
        let x0 = self.x.max(0.0);
        let y0 = self.y.max(0.0);
        let x1 = self.right().min(size.width as f32);
        let y1 = self.bottom().min(size.height as f32);
        if x1 <= x0 || y1 <= y0 {
            return Rect::default();
        }
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }
}

/// Point-in-polygon test using ray casting.
pub fn point_in_polygon(vertices: &[Point], point: Point) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let vi = vertices[i];
        let vj = vertices[j];
        if ((vi.y > point.y) != (vj.y > point.y))
            && (point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// A labeled quadrilateral annotation.
///
/// Corners are in image-pixel coordinates, ordered TL → BL → BR → TR.
/// `confidence` is `0.0` for hand-drawn annotations and detector-supplied
/// otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub class_token: String,
    pub color: ColorToken,
    pub confidence: f32,
    pub corners: [Point; CORNER_COUNT],
}

impl Annotation {
    /// Hand-drawn annotation (confidence 0).
    pub fn new(
        class_token: impl Into<String>,
        color: ColorToken,
        corners: [Point; CORNER_COUNT],
    ) -> Self {
        Self {
            class_token: class_token.into(),
            color,
            confidence: 0.0,
            corners,
        }
    }

    /// Axis-aligned quadrilateral from a drag rectangle, in canonical order.
    pub fn from_rect(rect: Rect, class_token: impl Into<String>, color: ColorToken) -> Self {
        let corners = [
            Point::new(rect.x, rect.y),            // TL
            Point::new(rect.x, rect.bottom()),     // BL
            Point::new(rect.right(), rect.bottom()), // BR
            Point::new(rect.right(), rect.y),      // TR
        ];
        Self::new(class_token, color, corners)
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    /// Whether an image-space point falls inside the quadrilateral.
    pub fn contains(&self, point: &Point) -> bool {
        point_in_polygon(&self.corners, *point)
    }
}
