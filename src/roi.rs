//! Region-of-interest tracking for the detection crop.
//!
//! At most one ROI exists at a time. In `Free` mode it is drawn like a box;
//! in `FixedToModelSize` it is a rectangle of exactly the model input size
//! that re-centers on click. The manager only computes rectangles; the
//! session turns its return values into changed/committed notifications.

use crate::model::{Point, Rect, Size};

/// How the ROI rectangle is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoiMode {
    /// Freely drawn rectangle of any size.
    #[default]
    Free,
    /// Rectangle locked to the detector's input size; clicks re-center it.
    FixedToModelSize(Size),
}

#[derive(Debug, Clone, Default)]
pub struct RoiManager {
    mode: RoiMode,
    rect: Option<Rect>,
    drag_anchor: Option<Point>,
}

impl RoiManager {
    pub fn new(mode: RoiMode) -> Self {
        Self {
            mode,
            rect: None,
            drag_anchor: None,
        }
    }

    pub fn mode(&self) -> RoiMode {
        self.mode
    }

    /// Change the placement mode. The current rectangle is kept; it only
    /// snaps to the model size on the next fixed placement.
    pub fn set_mode(&mut self, mode: RoiMode) {
        self.mode = mode;
    }

    pub fn rect(&self) -> Option<Rect> {
        self.rect
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Drop the rectangle and any in-flight drag (image change).
    pub fn clear(&mut self) {
        self.rect = None;
        self.drag_anchor = None;
    }

    /// Anchor a free-drawn ROI at an image point.
    pub fn begin_free(&mut self, point: Point) {
        self.drag_anchor = Some(point);
        self.rect = Some(Rect::from_corners(point, point));
    }

    /// Extend the free drag to the current image point. Returns the updated
    /// rectangle, or `None` when no drag is in flight.
    pub fn update_free(&mut self, point: Point) -> Option<Rect> {
        let anchor = self.drag_anchor?;
        let rect = Rect::from_corners(anchor, point);
        self.rect = Some(rect);
        Some(rect)
    }

    /// Finish the free drag and return the committed rectangle. A degenerate
    /// rectangle is discarded, leaving no ROI.
    pub fn end(&mut self) -> Option<Rect> {
        self.drag_anchor = None;
        match self.rect {
            Some(rect) if !rect.is_empty() => Some(rect),
            _ => {
                self.rect = None;
                None
            }
        }
    }

    /// Cancel an in-flight free drag without committing.
    pub fn cancel(&mut self) {
        if self.drag_anchor.take().is_some() {
            self.rect = None;
        }
    }

    /// Center the fixed-size rectangle on an image point, sliding it back
    /// inside the image so the size stays exact wherever the image allows.
    /// Returns `None` when the mode is `Free`.
    pub fn place_fixed(&mut self, center: Point, image_size: Size) -> Option<Rect> {
        let RoiMode::FixedToModelSize(model) = self.mode else {
            return None;
        };
        let w = model.width as f32;
        let h = model.height as f32;
        let iw = image_size.width as f32;
        let ih = image_size.height as f32;
        let x = (center.x - w / 2.0).clamp(0.0, (iw - w).max(0.0));
        let y = (center.y - h / 2.0).clamp(0.0, (ih - h).max(0.0));
        // Only an image smaller than the model can shrink the rectangle.
        let rect = Rect::new(x, y, w, h).clamped_to(image_size);
        self.rect = Some(rect);
        Some(rect)
    }

    /// Set the ROI to the whole image (used when the image already matches
    /// the model input size and no cropping is needed).
    pub fn set_full_image(&mut self, size: Size) -> Rect {
        let rect = Rect::new(0.0, 0.0, size.width as f32, size.height as f32);
        self.rect = Some(rect);
        self.drag_anchor = None;
        rect
    }
}
