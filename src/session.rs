//! Top-level annotation session.
//!
//! Owns the store, view, ROI, and drag state, and exposes the single
//! entry points hosts drive: input events in, output events drained via
//! [`AnnotationSession::take_events`]. Everything runs to completion on
//! the caller's thread; the only asynchronous boundary is the detector,
//! whose results come back tagged with the image generation they were
//! computed against so stale ones can be discarded.

use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::event::{InputEvent, OutputEvent};
use crate::format::{label_path_for_image, read_label_file, write_label_file};
use crate::geometry::ViewState;
use crate::interaction::{
    cancel_drag, handle_double_click, handle_edit_applied, handle_pointer_left,
    handle_pointer_moved, handle_pointer_pressed, handle_pointer_released, handle_wheel,
    DragState, InteractionContext,
};
use crate::model::{Annotation, Rect, Size};
use crate::roi::{RoiManager, RoiMode};
use crate::store::AnnotationStore;

pub struct AnnotationSession {
    store: AnnotationStore,
    view: ViewState,
    roi: RoiManager,
    drag: DragState,
    settings: Settings,
    image_path: Option<PathBuf>,
    /// Bumped on every image load; detector results carry the generation
    /// they were computed against.
    generation: u64,
    events: Vec<OutputEvent>,
}

impl AnnotationSession {
    pub fn new(settings: Settings) -> Self {
        Self {
            store: AnnotationStore::new(),
            view: ViewState::new(),
            roi: RoiManager::new(RoiMode::Free),
            drag: DragState::Idle,
            settings,
            image_path: None,
            generation: 0,
            events: Vec::new(),
        }
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn roi_rect(&self) -> Option<Rect> {
        self.roi.rect()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn image_path(&self) -> Option<&Path> {
        self.image_path.as_deref()
    }

    /// In-progress rubber-band rectangle, for the display overlay.
    pub fn drag_preview(&self) -> Option<Rect> {
        self.drag.preview_rect()
    }

    /// Drain everything emitted since the last call, in order.
    pub fn take_events(&mut self) -> Vec<OutputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn set_display_size(&mut self, width: f32, height: f32) {
        self.view.set_display_size(width, height);
    }

    /// Switch between free and fixed ROI placement. Fixed placement needs
    /// a configured model input size; without one it degrades to free.
    /// The current rectangle survives the switch.
    pub fn set_roi_mode(&mut self, fixed: bool) {
        let mode = match (fixed, self.settings.model_input_size) {
            (true, Some(size)) => RoiMode::FixedToModelSize(size),
            (true, None) => {
                log::warn!("fixed ROI requested without a model input size, staying free");
                RoiMode::Free
            }
            (false, _) => RoiMode::Free,
        };
        self.roi.set_mode(mode);
    }

    /// Process one input event to completion.
    pub fn handle_input(&mut self, event: InputEvent) {
        let mut ctx = InteractionContext {
            store: &mut self.store,
            view: &mut self.view,
            roi: &mut self.roi,
            drag: &mut self.drag,
            out: &mut self.events,
        };
        match event {
            InputEvent::PointerPressed {
                pos,
                button,
                modifiers,
            } => handle_pointer_pressed(&mut ctx, pos, button, modifiers),
            InputEvent::PointerMoved { pos } => handle_pointer_moved(&mut ctx, pos),
            InputEvent::PointerReleased { pos, button } => {
                handle_pointer_released(&mut ctx, pos, button)
            }
            InputEvent::PointerLeft => handle_pointer_left(&mut ctx),
            InputEvent::DoubleClicked { pos } => handle_double_click(&mut ctx, pos),
            InputEvent::WheelZoomed { pos, forward } => handle_wheel(&mut ctx, pos, forward),
            InputEvent::EscapePressed => cancel_drag(&mut ctx),
            InputEvent::EditApplied {
                class_token,
                color_token,
                for_new_box,
            } => handle_edit_applied(&mut ctx, &class_token, &color_token, for_new_box),
        }
    }

    /// Switch to a new image: bump the generation, reset all per-image
    /// state, then load the sibling label file (missing file ⇒ empty set).
    pub fn load_image(&mut self, path: &Path, size: Size) {
        self.generation += 1;
        self.drag = DragState::Idle;
        self.view.set_image(Some(size));
        self.roi.clear();
        self.events.push(OutputEvent::RoiChanged(None));

        let selected_before = self.store.selected();
        let hovered_before = self.store.hovered();

        let label_path = label_path_for_image(path);
        let annotations = match read_label_file(&label_path, size) {
            Ok(report) => {
                for w in &report.warnings {
                    log::warn!("{:?} line {}: {}", label_path, w.line, w.reason);
                }
                if report.has_warnings() {
                    self.events.push(OutputEvent::Status(format!(
                        "skipped {} malformed label line(s)",
                        report.warnings.len()
                    )));
                }
                report.annotations
            }
            Err(err) => {
                log::error!("failed to read {:?}: {}", label_path, err);
                self.events
                    .push(OutputEvent::Status(format!("label load failed: {}", err)));
                Vec::new()
            }
        };

        log::info!("loaded {:?} with {} labels", path, annotations.len());
        let change = self.store.set_all(annotations);
        self.events.push(OutputEvent::Annotations(change));
        if self.store.selected() != selected_before {
            self.events
                .push(OutputEvent::SelectionChanged(self.store.selected()));
        }
        if self.store.hovered() != hovered_before {
            self.events
                .push(OutputEvent::HoverChanged(self.store.hovered()));
        }

        // No crop needed when the image already matches the model input
        if self.settings.model_input_size == Some(size) {
            let rect = self.roi.set_full_image(size);
            self.events.push(OutputEvent::RoiChanged(Some(rect)));
            self.events.push(OutputEvent::RoiCommitted(rect));
        }

        self.image_path = Some(path.to_path_buf());
    }

    /// Ask the host to run detection over the current ROI crop, or the
    /// full image when no ROI is set.
    pub fn request_detect(&mut self) {
        self.events
            .push(OutputEvent::DetectRequested(self.roi.rect()));
    }

    /// Replace the annotation set with detector results, unless the image
    /// changed while the detector ran.
    pub fn apply_detections(&mut self, detections: Vec<Annotation>, generation: u64) {
        if generation != self.generation {
            log::warn!(
                "discarding stale detector result (generation {} != {})",
                generation,
                self.generation
            );
            return;
        }
        let selected_before = self.store.selected();
        let change = self.store.set_all(detections);
        self.events.push(OutputEvent::Annotations(change));
        if self.store.selected() != selected_before {
            self.events
                .push(OutputEvent::SelectionChanged(self.store.selected()));
        }
    }

    /// Write the current set to the image's label file. Failures surface
    /// as a status event; the in-memory set is untouched either way so the
    /// user can fix the problem and retry.
    pub fn save(&mut self) {
        let (Some(path), Some(size)) = (self.image_path.clone(), self.view.image_size()) else {
            self.events
                .push(OutputEvent::Status("no image loaded".to_string()));
            return;
        };
        let label_path = label_path_for_image(&path);
        match write_label_file(&label_path, self.store.as_slice(), size) {
            Ok(()) => {
                self.events.push(OutputEvent::Status(format!(
                    "saved {} label(s)",
                    self.store.len()
                )));
                self.events.push(OutputEvent::LabelsSaved(label_path));
            }
            Err(err) => {
                log::error!("save to {:?} failed: {}", label_path, err);
                self.events
                    .push(OutputEvent::Status(format!("save failed: {}", err)));
            }
        }
    }
}
