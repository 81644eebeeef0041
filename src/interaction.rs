//! Pointer/keyboard interaction state machine.
//!
//! Each handler processes one input event category against the shared
//! editing state, keeping the session's dispatch function small. All
//! handlers run to completion; notifications are pushed onto the session's
//! output queue rather than delivered through callbacks.

use crate::constants::{drag, handle};
use crate::event::{Modifiers, OutputEvent, PointerButton};
use crate::geometry::ViewState;
use crate::model::{
    normalize_class_token, point_in_polygon, Annotation, ColorToken, Point, Rect, DEFAULT_CLASS,
};
use crate::roi::{RoiManager, RoiMode};
use crate::store::AnnotationStore;

/// Transient pointer-drag state. One drag at a time; `Escape` always
/// returns to `Idle` without committing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Rubber-band box between `anchor` and the current image point.
    /// `mask` boxes paint a redaction block instead of an annotation.
    DrawingBox {
        anchor: Point,
        rect: Rect,
        mask: bool,
        pending_class: Option<String>,
        pending_color: Option<ColorToken>,
    },
    /// Dragging corner `i` of the selected annotation.
    DraggingCorner(usize),
    /// Middle-button view pan; `last` is the previous display point.
    Panning { last: Point },
    /// Free ROI drag (the rectangle itself lives in the ROI manager).
    DrawingRoi,
}

impl DragState {
    pub fn is_idle(&self) -> bool {
        matches!(self, DragState::Idle)
    }

    /// In-progress rubber-band rectangle, for the display overlay.
    pub fn preview_rect(&self) -> Option<Rect> {
        match self {
            DragState::DrawingBox { rect, .. } => Some(*rect),
            _ => None,
        }
    }
}

/// Mutable editing state a handler operates on.
pub struct InteractionContext<'a> {
    pub store: &'a mut AnnotationStore,
    pub view: &'a mut ViewState,
    pub roi: &'a mut RoiManager,
    pub drag: &'a mut DragState,
    pub out: &'a mut Vec<OutputEvent>,
}

/// Corner handle of the *selected* annotation under the display point,
/// if any. Handles win over body hits so a corner near an edge stays
/// draggable.
fn hit_handle_on_selected(
    store: &AnnotationStore,
    view: &ViewState,
    display: Point,
) -> Option<usize> {
    let selected = store.selected_annotation()?;
    let radius = handle::RADIUS * handle::HIT_TOLERANCE;
    selected
        .corners
        .iter()
        .enumerate()
        .find(|(_, corner)| {
            view.to_display(**corner)
                .is_some_and(|p| p.distance_to(&display) <= radius)
        })
        .map(|(i, _)| i)
}

/// Topmost annotation whose quad (projected to display space) contains
/// the display point.
fn hit_annotation(store: &AnnotationStore, view: &ViewState, display: Point) -> Option<usize> {
    store.hit_test(|ann| {
        let mut projected = [Point::default(); 4];
        for (slot, corner) in projected.iter_mut().zip(ann.corners.iter()) {
            match view.to_display(*corner) {
                Some(p) => *slot = p,
                None => return false,
            }
        }
        point_in_polygon(&projected, display)
    })
}

pub fn handle_pointer_pressed(
    ctx: &mut InteractionContext<'_>,
    pos: Point,
    button: PointerButton,
    modifiers: Modifiers,
) {
    match button {
        PointerButton::Primary => handle_primary_pressed(ctx, pos, modifiers),
        PointerButton::Secondary => handle_secondary_pressed(ctx, pos),
        PointerButton::Middle => {
            *ctx.drag = DragState::Panning { last: pos };
        }
    }
}

fn handle_primary_pressed(ctx: &mut InteractionContext<'_>, pos: Point, modifiers: Modifiers) {
    let Some(image_pt) = ctx.view.to_image(pos) else {
        return;
    };

    if modifiers.shift {
        begin_roi(ctx, image_pt);
        return;
    }

    if modifiers.ctrl {
        // Mask paint: plain rubber-band, no hit-testing
        *ctx.drag = DragState::DrawingBox {
            anchor: image_pt,
            rect: Rect::from_corners(image_pt, image_pt),
            mask: true,
            pending_class: None,
            pending_color: None,
        };
        return;
    }

    if let Some(corner) = hit_handle_on_selected(ctx.store, ctx.view, pos) {
        log::debug!("✋ grabbed corner {} of selection", corner);
        *ctx.drag = DragState::DraggingCorner(corner);
        return;
    }

    if let Some(index) = hit_annotation(ctx.store, ctx.view, pos) {
        if ctx.store.select(Some(index)) {
            ctx.out.push(OutputEvent::SelectionChanged(Some(index)));
        }
        return;
    }

    *ctx.drag = DragState::DrawingBox {
        anchor: image_pt,
        rect: Rect::from_corners(image_pt, image_pt),
        mask: false,
        pending_class: None,
        pending_color: None,
    };
}

fn begin_roi(ctx: &mut InteractionContext<'_>, image_pt: Point) {
    match ctx.roi.mode() {
        RoiMode::Free => {
            ctx.roi.begin_free(image_pt);
            *ctx.drag = DragState::DrawingRoi;
            ctx.out.push(OutputEvent::RoiChanged(ctx.roi.rect()));
        }
        RoiMode::FixedToModelSize(_) => {
            let Some(size) = ctx.view.image_size() else {
                return;
            };
            // Re-centering is atomic: changed and committed in one step
            if let Some(rect) = ctx.roi.place_fixed(image_pt, size) {
                ctx.out.push(OutputEvent::RoiChanged(Some(rect)));
                ctx.out.push(OutputEvent::RoiCommitted(rect));
            }
        }
    }
}

fn handle_secondary_pressed(ctx: &mut InteractionContext<'_>, pos: Point) {
    if let Some(index) = hit_annotation(ctx.store, ctx.view, pos) {
        log::debug!("🗑️ deleting annotation {}", index);
        let selected_before = ctx.store.selected();
        if let Some(change) = ctx.store.remove(index) {
            ctx.out.push(OutputEvent::Annotations(change));
            if ctx.store.selected() != selected_before {
                ctx.out
                    .push(OutputEvent::SelectionChanged(ctx.store.selected()));
            }
        }
    } else {
        // Stray right-click clears whatever drag was in flight
        cancel_drag(ctx);
    }
}

pub fn handle_pointer_moved(ctx: &mut InteractionContext<'_>, pos: Point) {
    match ctx.drag {
        DragState::DrawingBox { anchor, rect, .. } => {
            let anchor = *anchor;
            if let Some(image_pt) = ctx.view.to_image(pos) {
                *rect = Rect::from_corners(anchor, image_pt);
            }
        }
        DragState::DraggingCorner(corner) => {
            let corner = *corner;
            let Some(image_pt) = ctx.view.to_image(pos) else {
                return;
            };
            move_selected_corner(ctx, corner, image_pt);
        }
        DragState::Panning { last } => {
            let last = *last;
            ctx.view.pan_by(pos.x - last.x, pos.y - last.y);
            *ctx.drag = DragState::Panning { last: pos };
        }
        DragState::DrawingRoi => {
            let Some(image_pt) = ctx.view.to_image(pos) else {
                return;
            };
            if let Some(rect) = ctx.roi.update_free(image_pt) {
                ctx.out.push(OutputEvent::RoiChanged(Some(rect)));
            }
        }
        DragState::Idle => update_hover(ctx, pos),
    }
}

fn move_selected_corner(ctx: &mut InteractionContext<'_>, corner: usize, image_pt: Point) {
    let Some(index) = ctx.store.selected() else {
        return;
    };
    let Some(ann) = ctx.store.get(index) else {
        return;
    };
    let mut updated = ann.clone();
    // Corners keep their slots mid-drag; only the grabbed one moves
    updated.corners[corner] = image_pt;
    if let Some(change) = ctx.store.update(index, updated) {
        ctx.out.push(OutputEvent::Annotations(change));
    }
}

fn update_hover(ctx: &mut InteractionContext<'_>, pos: Point) {
    let hover = hit_handle_on_selected(ctx.store, ctx.view, pos)
        .and_then(|_| ctx.store.selected())
        .or_else(|| hit_annotation(ctx.store, ctx.view, pos));
    if ctx.store.set_hover(hover) {
        ctx.out.push(OutputEvent::HoverChanged(hover));
    }
}

pub fn handle_pointer_released(
    ctx: &mut InteractionContext<'_>,
    _pos: Point,
    button: PointerButton,
) {
    match (button, std::mem::take(ctx.drag)) {
        (PointerButton::Middle, DragState::Panning { .. }) => {}
        (
            PointerButton::Primary,
            DragState::DrawingBox {
                rect,
                mask,
                pending_class,
                pending_color,
                ..
            },
        ) => finish_box(ctx, rect, mask, pending_class, pending_color),
        (PointerButton::Primary, DragState::DraggingCorner(_)) => {
            // Final notification so bulk consumers see the settled geometry
            if let Some(index) = ctx.store.selected() {
                if let Some(ann) = ctx.store.get(index).cloned() {
                    if let Some(change) = ctx.store.update(index, ann) {
                        ctx.out.push(OutputEvent::Annotations(change));
                    }
                }
            }
        }
        (PointerButton::Primary, DragState::DrawingRoi) => match ctx.roi.end() {
            Some(rect) => {
                log::debug!("📐 ROI committed: {:?}", rect);
                ctx.out.push(OutputEvent::RoiCommitted(rect));
            }
            None => ctx.out.push(OutputEvent::RoiChanged(None)),
        },
        // Release with no matching drag, or a button mismatch: restore
        (_, state) => *ctx.drag = state,
    }
}

fn finish_box(
    ctx: &mut InteractionContext<'_>,
    rect: Rect,
    mask: bool,
    pending_class: Option<String>,
    pending_color: Option<ColorToken>,
) {
    if rect.width < drag::MIN_BOX_SIZE || rect.height < drag::MIN_BOX_SIZE {
        // Accidental click, not an error
        log::debug!("📦 discarding sub-minimum box {:?}", rect);
        return;
    }
    if mask {
        ctx.out.push(OutputEvent::MaskPainted(rect));
        return;
    }
    let class_token = pending_class.unwrap_or_else(|| DEFAULT_CLASS.to_string());
    let color = pending_color.unwrap_or_default();
    let ann = Annotation::from_rect(rect, class_token.clone(), color);
    let change = ctx.store.add(ann);
    ctx.out.push(OutputEvent::Annotations(change));
    let index = ctx.store.len() - 1;
    if ctx.store.select(Some(index)) {
        ctx.out.push(OutputEvent::SelectionChanged(Some(index)));
    }
    ctx.out.push(OutputEvent::EditPromptRequested {
        index,
        class_token,
        color,
    });
}

pub fn handle_pointer_left(ctx: &mut InteractionContext<'_>) {
    if ctx.store.set_hover(None) {
        ctx.out.push(OutputEvent::HoverChanged(None));
    }
}

pub fn handle_double_click(ctx: &mut InteractionContext<'_>, pos: Point) {
    let Some(index) = hit_annotation(ctx.store, ctx.view, pos) else {
        return;
    };
    if ctx.store.select(Some(index)) {
        ctx.out.push(OutputEvent::SelectionChanged(Some(index)));
    }
    if let Some(ann) = ctx.store.get(index) {
        ctx.out.push(OutputEvent::EditPromptRequested {
            index,
            class_token: ann.class_token.clone(),
            color: ann.color,
        });
    }
}

pub fn handle_wheel(ctx: &mut InteractionContext<'_>, pos: Point, forward: bool) {
    ctx.view.wheel_zoom(pos, forward);
}

/// Cancel any in-flight draw or drag without committing.
pub fn cancel_drag(ctx: &mut InteractionContext<'_>) {
    if matches!(ctx.drag, DragState::DrawingRoi) {
        ctx.roi.cancel();
        ctx.out.push(OutputEvent::RoiChanged(None));
    }
    *ctx.drag = DragState::Idle;
}

/// Apply the result of the external class/color edit dialog.
pub fn handle_edit_applied(
    ctx: &mut InteractionContext<'_>,
    class_token: &str,
    color_token: &str,
    for_new_box: bool,
) {
    if for_new_box {
        if let DragState::DrawingBox {
            mask: false,
            pending_class,
            pending_color,
            ..
        } = ctx.drag
        {
            *pending_class = Some(normalize_class_token(class_token));
            *pending_color = Some(ColorToken::parse(color_token));
            return;
        }
    }
    let Some(index) = ctx.store.selected() else {
        return;
    };
    let Some(ann) = ctx.store.get(index) else {
        return;
    };
    let mut updated = ann.clone();
    updated.class_token = if class_token.trim().is_empty() {
        DEFAULT_CLASS.to_string()
    } else {
        normalize_class_token(class_token)
    };
    updated.color = ColorToken::parse(color_token);
    if let Some(change) = ctx.store.update(index, updated) {
        ctx.out.push(OutputEvent::Annotations(change));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::StoreChange;
    use crate::model::Size;

    struct Fixture {
        store: AnnotationStore,
        view: ViewState,
        roi: RoiManager,
        drag: DragState,
        out: Vec<OutputEvent>,
    }

    impl Fixture {
        /// 800×600 image filling an 800×600 display: identity transform.
        fn new() -> Self {
            let mut view = ViewState::new();
            view.set_display_size(800.0, 600.0);
            view.set_image(Some(Size::new(800, 600)));
            Self {
                store: AnnotationStore::new(),
                view,
                roi: RoiManager::new(RoiMode::Free),
                drag: DragState::Idle,
                out: Vec::new(),
            }
        }

        fn ctx(&mut self) -> InteractionContext<'_> {
            InteractionContext {
                store: &mut self.store,
                view: &mut self.view,
                roi: &mut self.roi,
                drag: &mut self.drag,
                out: &mut self.out,
            }
        }

        fn press(&mut self, x: f32, y: f32, button: PointerButton, modifiers: Modifiers) {
            handle_pointer_pressed(&mut self.ctx(), Point::new(x, y), button, modifiers);
        }

        fn drag_to(&mut self, x: f32, y: f32) {
            handle_pointer_moved(&mut self.ctx(), Point::new(x, y));
        }

        fn release(&mut self, x: f32, y: f32, button: PointerButton) {
            handle_pointer_released(&mut self.ctx(), Point::new(x, y), button);
        }

        fn draw_box(&mut self, from: (f32, f32), to: (f32, f32)) {
            self.press(from.0, from.1, PointerButton::Primary, Modifiers::default());
            self.drag_to(to.0, to.1);
            self.release(to.0, to.1, PointerButton::Primary);
        }
    }

    #[test]
    fn test_draw_box_appends_selects_and_prompts() {
        let mut fx = Fixture::new();
        fx.draw_box((100.0, 100.0), (300.0, 200.0));

        assert_eq!(fx.store.len(), 1);
        assert_eq!(fx.store.selected(), Some(0));
        let ann = fx.store.get(0).unwrap();
        assert_eq!(ann.class_token, "unknown");
        assert_eq!(ann.color, ColorToken::Gray);
        assert_eq!(ann.corners[0], Point::new(100.0, 100.0));
        assert_eq!(ann.corners[1], Point::new(100.0, 200.0));
        assert_eq!(ann.corners[2], Point::new(300.0, 200.0));
        assert_eq!(ann.corners[3], Point::new(300.0, 100.0));

        assert!(fx
            .out
            .iter()
            .any(|e| matches!(e, OutputEvent::Annotations(StoreChange::Added(0)))));
        assert!(fx
            .out
            .iter()
            .any(|e| matches!(e, OutputEvent::EditPromptRequested { index: 0, .. })));
    }

    #[test]
    fn test_sub_minimum_box_discarded() {
        let mut fx = Fixture::new();
        fx.draw_box((100.0, 100.0), (101.0, 101.0));
        assert!(fx.store.is_empty());
        assert!(fx.out.is_empty());
    }

    #[test]
    fn test_click_inside_annotation_selects() {
        let mut fx = Fixture::new();
        fx.draw_box((100.0, 100.0), (300.0, 200.0));
        fx.draw_box((400.0, 300.0), (500.0, 400.0));
        fx.out.clear();

        fx.press(150.0, 150.0, PointerButton::Primary, Modifiers::default());
        fx.release(150.0, 150.0, PointerButton::Primary);
        assert_eq!(fx.store.selected(), Some(0));
        assert!(fx
            .out
            .iter()
            .any(|e| matches!(e, OutputEvent::SelectionChanged(Some(0)))));
        // No new box from a click on an existing annotation
        assert_eq!(fx.store.len(), 2);
    }

    #[test]
    fn test_overlapping_hit_prefers_topmost() {
        let mut fx = Fixture::new();
        // Seed two overlapping quads directly; drawing the second through
        // the state machine would select the first instead of drawing
        fx.store.add(Annotation::from_rect(
            Rect::new(100.0, 100.0, 200.0, 100.0),
            "1",
            ColorToken::Blue,
        ));
        fx.store.add(Annotation::from_rect(
            Rect::new(200.0, 150.0, 200.0, 100.0),
            "2",
            ColorToken::Red,
        ));

        // (250,180) lies inside both; the later annotation is on top
        fx.press(250.0, 180.0, PointerButton::Primary, Modifiers::default());
        assert_eq!(fx.store.selected(), Some(1));
    }

    #[test]
    fn test_corner_drag_moves_only_that_corner() {
        let mut fx = Fixture::new();
        fx.draw_box((100.0, 100.0), (300.0, 200.0));

        // Grab the TL handle of the (auto-selected) annotation
        fx.press(100.0, 100.0, PointerButton::Primary, Modifiers::default());
        assert_eq!(fx.drag, DragState::DraggingCorner(0));
        fx.drag_to(80.0, 90.0);
        fx.release(80.0, 90.0, PointerButton::Primary);

        let ann = fx.store.get(0).unwrap();
        assert_eq!(ann.corners[0], Point::new(80.0, 90.0));
        // Other corners untouched, order preserved
        assert_eq!(ann.corners[1], Point::new(100.0, 200.0));
        assert_eq!(ann.corners[2], Point::new(300.0, 200.0));
        assert_eq!(ann.corners[3], Point::new(300.0, 100.0));
        assert!(fx.drag.is_idle());
    }

    #[test]
    fn test_corner_drag_clamps_to_image() {
        let mut fx = Fixture::new();
        fx.draw_box((100.0, 100.0), (300.0, 200.0));
        fx.press(100.0, 100.0, PointerButton::Primary, Modifiers::default());
        fx.drag_to(-500.0, -500.0);
        fx.release(-500.0, -500.0, PointerButton::Primary);
        let ann = fx.store.get(0).unwrap();
        assert_eq!(ann.corners[0], Point::new(0.0, 0.0));
    }

    #[test]
    fn test_right_click_deletes_hit() {
        let mut fx = Fixture::new();
        fx.draw_box((100.0, 100.0), (300.0, 200.0));
        fx.out.clear();

        fx.press(150.0, 150.0, PointerButton::Secondary, Modifiers::default());
        assert!(fx.store.is_empty());
        assert!(fx
            .out
            .iter()
            .any(|e| matches!(e, OutputEvent::Annotations(StoreChange::Removed(0)))));
        assert!(fx
            .out
            .iter()
            .any(|e| matches!(e, OutputEvent::SelectionChanged(None))));
    }

    #[test]
    fn test_right_click_miss_cancels_drag() {
        let mut fx = Fixture::new();
        fx.press(100.0, 100.0, PointerButton::Primary, Modifiers::default());
        fx.drag_to(200.0, 200.0);
        fx.press(700.0, 500.0, PointerButton::Secondary, Modifiers::default());
        assert!(fx.drag.is_idle());
        // The interrupted box never commits
        fx.release(200.0, 200.0, PointerButton::Primary);
        assert!(fx.store.is_empty());
    }

    #[test]
    fn test_escape_cancels_box_draw() {
        let mut fx = Fixture::new();
        fx.press(100.0, 100.0, PointerButton::Primary, Modifiers::default());
        fx.drag_to(300.0, 200.0);
        cancel_drag(&mut fx.ctx());
        fx.release(300.0, 200.0, PointerButton::Primary);
        assert!(fx.store.is_empty());
    }

    #[test]
    fn test_middle_button_pans() {
        let mut fx = Fixture::new();
        fx.press(400.0, 300.0, PointerButton::Middle, Modifiers::default());
        fx.drag_to(420.0, 280.0);
        fx.drag_to(450.0, 290.0);
        fx.release(450.0, 290.0, PointerButton::Middle);
        assert_eq!(fx.view.pan(), (50.0, -10.0));
        assert!(fx.drag.is_idle());
    }

    #[test]
    fn test_mask_paint_emits_rect_not_annotation() {
        let mut fx = Fixture::new();
        let mods = Modifiers {
            ctrl: true,
            shift: false,
        };
        fx.press(100.0, 100.0, PointerButton::Primary, mods);
        fx.drag_to(200.0, 150.0);
        fx.release(200.0, 150.0, PointerButton::Primary);

        assert!(fx.store.is_empty());
        assert!(fx.out.iter().any(
            |e| matches!(e, OutputEvent::MaskPainted(r) if *r == Rect::new(100.0, 100.0, 100.0, 50.0))
        ));
    }

    #[test]
    fn test_shift_drag_draws_free_roi() {
        let mut fx = Fixture::new();
        let mods = Modifiers {
            ctrl: false,
            shift: true,
        };
        fx.press(100.0, 100.0, PointerButton::Primary, mods);
        fx.drag_to(300.0, 250.0);
        fx.release(300.0, 250.0, PointerButton::Primary);

        let expected = Rect::new(100.0, 100.0, 200.0, 150.0);
        assert_eq!(fx.roi.rect(), Some(expected));
        assert!(fx
            .out
            .iter()
            .any(|e| matches!(e, OutputEvent::RoiCommitted(r) if *r == expected)));
        // changed fired during the drag, committed only once at release
        let committed = fx
            .out
            .iter()
            .filter(|e| matches!(e, OutputEvent::RoiCommitted(_)))
            .count();
        assert_eq!(committed, 1);
    }

    #[test]
    fn test_shift_click_places_fixed_roi() {
        let mut fx = Fixture::new();
        fx.roi = RoiManager::new(RoiMode::FixedToModelSize(Size::new(416, 416)));
        let mods = Modifiers {
            ctrl: false,
            shift: true,
        };
        fx.press(400.0, 300.0, PointerButton::Primary, mods);

        let expected = Rect::new(192.0, 92.0, 416.0, 416.0);
        assert_eq!(fx.roi.rect(), Some(expected));
        assert!(fx
            .out
            .iter()
            .any(|e| matches!(e, OutputEvent::RoiCommitted(r) if *r == expected)));
        assert!(fx.drag.is_idle());
    }

    #[test]
    fn test_hover_tracking() {
        let mut fx = Fixture::new();
        fx.draw_box((100.0, 100.0), (300.0, 200.0));
        fx.store.select(None);
        fx.out.clear();

        fx.drag_to(150.0, 150.0);
        assert_eq!(fx.store.hovered(), Some(0));
        assert!(fx
            .out
            .iter()
            .any(|e| matches!(e, OutputEvent::HoverChanged(Some(0)))));

        fx.drag_to(700.0, 500.0);
        assert_eq!(fx.store.hovered(), None);

        handle_pointer_left(&mut fx.ctx());
        assert_eq!(fx.store.hovered(), None);
    }

    #[test]
    fn test_double_click_opens_edit_prompt() {
        let mut fx = Fixture::new();
        fx.draw_box((100.0, 100.0), (300.0, 200.0));
        fx.out.clear();

        handle_double_click(&mut fx.ctx(), Point::new(150.0, 150.0));
        assert!(fx
            .out
            .iter()
            .any(|e| matches!(e, OutputEvent::EditPromptRequested { index: 0, .. })));
    }

    #[test]
    fn test_edit_applied_to_new_box_sets_pending() {
        let mut fx = Fixture::new();
        fx.press(100.0, 100.0, PointerButton::Primary, Modifiers::default());
        fx.drag_to(300.0, 200.0);
        handle_edit_applied(&mut fx.ctx(), "bs", "B", true);
        fx.release(300.0, 200.0, PointerButton::Primary);

        let ann = fx.store.get(0).unwrap();
        assert_eq!(ann.class_token, "Bs");
        assert_eq!(ann.color, ColorToken::Blue);
    }

    #[test]
    fn test_edit_applied_retags_selection() {
        let mut fx = Fixture::new();
        fx.draw_box((100.0, 100.0), (300.0, 200.0));
        fx.out.clear();

        handle_edit_applied(&mut fx.ctx(), "3", "RED", false);
        let ann = fx.store.get(0).unwrap();
        assert_eq!(ann.class_token, "3");
        assert_eq!(ann.color, ColorToken::Red);
        assert!(fx
            .out
            .iter()
            .any(|e| matches!(e, OutputEvent::Annotations(StoreChange::Updated(0)))));

        // Empty strings fall back to the defaults
        handle_edit_applied(&mut fx.ctx(), "  ", "", false);
        let ann = fx.store.get(0).unwrap();
        assert_eq!(ann.class_token, "unknown");
        assert_eq!(ann.color, ColorToken::Gray);
    }

    #[test]
    fn test_press_without_image_is_noop() {
        let mut fx = Fixture::new();
        fx.view.set_image(None);
        fx.press(100.0, 100.0, PointerButton::Primary, Modifiers::default());
        assert!(fx.drag.is_idle());
        assert!(fx.out.is_empty());
    }
}
