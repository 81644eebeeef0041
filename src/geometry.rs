//! View/image coordinate transforms under pan and zoom.
//!
//! All mappings are pure given the current state. With no image loaded they
//! return `None`; callers guard once at the event boundary instead of in
//! every transform.

use crate::constants::zoom;
use crate::model::{Point, Rect, Size};

/// Pan/zoom state of the display viewport over the current image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// View scale, clamped to [`zoom::MIN`]..=[`zoom::MAX`].
    scale: f32,
    /// Display-space pan offset applied to the fitted image center.
    pan: (f32, f32),
    display_size: (f32, f32),
    image_size: Option<Size>,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            pan: (0.0, 0.0),
            display_size: (0.0, 0.0),
            image_size: None,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn pan(&self) -> (f32, f32) {
        self.pan
    }

    pub fn image_size(&self) -> Option<Size> {
        self.image_size
    }

    pub fn set_display_size(&mut self, width: f32, height: f32) {
        self.display_size = (width, height);
    }

    /// Replace the displayed image; resets scale and pan.
    pub fn set_image(&mut self, size: Option<Size>) {
        self.image_size = size;
        self.reset();
    }

    /// Back to scale 1, no pan.
    pub fn reset(&mut self) {
        self.scale = 1.0;
        self.pan = (0.0, 0.0);
    }

    /// Aspect-preserving fit of the image into the display, centered.
    fn fit_rect(&self) -> Option<Rect> {
        let size = self.image_size?;
        let (dw, dh) = self.display_size;
        if !size.is_valid() || dw <= 0.0 || dh <= 0.0 {
            return None;
        }
        let s = (dw / size.width as f32).min(dh / size.height as f32);
        let fw = size.width as f32 * s;
        let fh = size.height as f32 * s;
        Some(Rect::new((dw - fw) / 2.0, (dh - fh) / 2.0, fw, fh))
    }

    /// Rectangle the image occupies on the display under the current
    /// scale and pan.
    pub fn image_rect_on_display(&self) -> Option<Rect> {
        let fit = self.fit_rect()?;
        let w = fit.width * self.scale;
        let h = fit.height * self.scale;
        let center = fit.center();
        Some(Rect::new(
            center.x + self.pan.0 - w / 2.0,
            center.y + self.pan.1 - h / 2.0,
            w,
            h,
        ))
    }

    /// Map a display point to image-pixel coordinates, clamped to
    /// `[0, dim-1]` per axis so results never escape the image.
    pub fn to_image(&self, display: Point) -> Option<Point> {
        let rect = self.image_rect_on_display()?;
        let size = self.image_size?;
        if rect.is_empty() {
            return None;
        }
        let sx = size.width as f32 / rect.width;
        let sy = size.height as f32 / rect.height;
        let x = ((display.x - rect.x) * sx).clamp(0.0, (size.width - 1) as f32);
        let y = ((display.y - rect.y) * sy).clamp(0.0, (size.height - 1) as f32);
        Some(Point::new(x, y))
    }

    /// Map an image-pixel point to display coordinates. No clamping: the
    /// display may legitimately address points outside its bounds at any
    /// pan/zoom.
    pub fn to_display(&self, image: Point) -> Option<Point> {
        let rect = self.image_rect_on_display()?;
        let size = self.image_size?;
        if rect.is_empty() {
            return None;
        }
        let sx = rect.width / size.width as f32;
        let sy = rect.height / size.height as f32;
        Some(Point::new(rect.x + image.x * sx, rect.y + image.y * sy))
    }

    /// Map a display-space rectangle to a clamped image-space rectangle.
    pub fn rect_to_image(&self, display: Rect) -> Option<Rect> {
        let size = self.image_size?;
        let tl = self.to_image(Point::new(display.x, display.y))?;
        let br = self.to_image(Point::new(display.right(), display.bottom()))?;
        Some(Rect::from_corners(tl, br).clamped_to(size))
    }

    /// Wheel zoom anchored at the cursor: the image point under the cursor
    /// before the zoom maps back to the cursor after it.
    pub fn wheel_zoom(&mut self, cursor: Point, forward: bool) {
        let Some(anchor) = self.to_image(cursor) else {
            return;
        };
        let step = if forward { zoom::STEP } else { 1.0 / zoom::STEP };
        self.scale = (self.scale * step).clamp(zoom::MIN, zoom::MAX);
        if let Some(after) = self.to_display(anchor) {
            self.pan.0 += cursor.x - after.x;
            self.pan.1 += cursor.y - after.y;
        }
    }

    /// Add a raw display-space delta to the pan offset.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.pan.0 += dx;
        self.pan.1 += dy;
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    fn view_800x600() -> ViewState {
        let mut view = ViewState::new();
        view.set_display_size(800.0, 600.0);
        view.set_image(Some(Size::new(800, 600)));
        view
    }

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_transforms_without_image() {
        let mut view = ViewState::new();
        view.set_display_size(800.0, 600.0);
        assert!(view.to_image(Point::new(10.0, 10.0)).is_none());
        assert!(view.to_display(Point::new(10.0, 10.0)).is_none());
        assert!(view.image_rect_on_display().is_none());
    }

    #[test]
    fn test_identity_fit_round_trip() {
        // Image and display match, so at scale 1 the mapping is identity.
        let view = view_800x600();
        let p = view.to_image(Point::new(123.0, 456.0)).unwrap();
        assert!(approx_eq(p.x, 123.0));
        assert!(approx_eq(p.y, 456.0));
        let back = view.to_display(p).unwrap();
        assert!(approx_eq(back.x, 123.0));
        assert!(approx_eq(back.y, 456.0));
    }

    #[test]
    fn test_to_image_clamps_to_bounds() {
        let mut view = view_800x600();
        let wild = [
            Point::new(-1000.0, -1000.0),
            Point::new(5000.0, 5000.0),
            Point::new(-3.0, 900.0),
        ];
        for p in wild {
            let img = view.to_image(p).unwrap();
            assert!(img.x >= 0.0 && img.x <= 799.0, "x out of range: {}", img.x);
            assert!(img.y >= 0.0 && img.y <= 599.0, "y out of range: {}", img.y);
        }
        // Still holds at an arbitrary pan/zoom
        view.wheel_zoom(Point::new(200.0, 150.0), true);
        view.pan_by(-340.0, 125.0);
        for p in wild {
            let img = view.to_image(p).unwrap();
            assert!(img.x >= 0.0 && img.x <= 799.0);
            assert!(img.y >= 0.0 && img.y <= 599.0);
        }
    }

    #[test]
    fn test_wheel_zoom_anchors_cursor() {
        let mut view = view_800x600();
        view.pan_by(37.0, -12.0);
        let cursor = Point::new(250.0, 180.0);
        let before = view.to_image(cursor).unwrap();
        view.wheel_zoom(cursor, true);
        let after = view.to_display(before).unwrap();
        assert!(approx_eq(after.x, cursor.x));
        assert!(approx_eq(after.y, cursor.y));
    }

    #[test]
    fn test_wheel_zoom_clamps_scale() {
        let mut view = view_800x600();
        for _ in 0..60 {
            view.wheel_zoom(Point::new(400.0, 300.0), true);
        }
        assert!(approx_eq(view.scale(), 8.0));
        for _ in 0..120 {
            view.wheel_zoom(Point::new(400.0, 300.0), false);
        }
        assert!(approx_eq(view.scale(), 0.2));
    }

    #[test]
    fn test_zoom_in_then_out_restores_scale() {
        let mut view = view_800x600();
        view.wheel_zoom(Point::new(100.0, 100.0), true);
        view.wheel_zoom(Point::new(100.0, 100.0), false);
        assert!(approx_eq(view.scale(), 1.0));
    }

    #[test]
    fn test_fit_rect_letterboxes_wide_display() {
        let mut view = ViewState::new();
        view.set_display_size(1000.0, 500.0);
        view.set_image(Some(Size::new(500, 500)));
        let rect = view.image_rect_on_display().unwrap();
        // Square image in a wide display: fit by height, centered horizontally.
        assert!(approx_eq(rect.width, 500.0));
        assert!(approx_eq(rect.height, 500.0));
        assert!(approx_eq(rect.x, 250.0));
        assert!(approx_eq(rect.y, 0.0));
    }

    #[test]
    fn test_rect_to_image_clamps() {
        let view = view_800x600();
        let r = view
            .rect_to_image(Rect::new(-100.0, -100.0, 400.0, 400.0))
            .unwrap();
        assert!(approx_eq(r.x, 0.0));
        assert!(approx_eq(r.y, 0.0));
        assert!(r.right() <= 800.0 && r.bottom() <= 600.0);
    }

    #[test]
    fn test_set_image_resets_view() {
        let mut view = view_800x600();
        view.wheel_zoom(Point::new(100.0, 100.0), true);
        view.pan_by(50.0, 50.0);
        view.set_image(Some(Size::new(640, 480)));
        assert_eq!(view.scale(), 1.0);
        assert_eq!(view.pan(), (0.0, 0.0));
    }
}
