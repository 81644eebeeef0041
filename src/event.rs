//! Typed event channel between the annotation core and its host.
//!
//! The host (display surface, file browser, detector, edit dialog) feeds
//! [`InputEvent`]s into the session and drains [`OutputEvent`]s after each
//! one. All handling is synchronous and single-threaded, so the queue is a
//! plain `Vec` drained in order.

use std::path::PathBuf;

use crate::model::{ColorToken, Point, Rect};

/// Which change a store mutation produced, for incremental consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    /// The whole set was replaced (image load, detector result, clear).
    Reset,
    /// Annotation appended at the index.
    Added(usize),
    /// Annotation at the index changed geometry or metadata.
    Updated(usize),
    /// Annotation at the index was removed.
    Removed(usize),
}

/// Pointer buttons the interaction state machine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Mask-paint modifier (Ctrl).
    pub ctrl: bool,
    /// ROI modifier (Shift).
    pub shift: bool,
}

/// Events the host delivers to the session. Pointer positions are raw
/// display coordinates; the session converts them itself.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerPressed {
        pos: Point,
        button: PointerButton,
        modifiers: Modifiers,
    },
    PointerMoved {
        pos: Point,
    },
    PointerReleased {
        pos: Point,
        button: PointerButton,
    },
    /// Pointer left the display surface.
    PointerLeft,
    /// Primary-button double click.
    DoubleClicked {
        pos: Point,
    },
    /// Wheel tick; `forward` zooms in.
    WheelZoomed {
        pos: Point,
        forward: bool,
    },
    /// Escape: cancel any in-flight draw/drag without committing.
    EscapePressed,
    /// Result of the external class/color edit dialog.
    EditApplied {
        class_token: String,
        color_token: String,
        /// True when the edit belongs to the box currently being drawn
        /// rather than the selected annotation.
        for_new_box: bool,
    },
}

/// Events the session emits for the host to consume.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputEvent {
    /// The annotation set changed; carries what changed.
    Annotations(StoreChange),
    SelectionChanged(Option<usize>),
    HoverChanged(Option<usize>),
    /// ROI rectangle moved or was cleared (`None`).
    RoiChanged(Option<Rect>),
    /// ROI finalized (drag release or full-image shortcut).
    RoiCommitted(Rect),
    /// Host should run detection on the given image crop (`None` = full
    /// image) and answer with [`crate::session::AnnotationSession::apply_detections`].
    DetectRequested(Option<Rect>),
    /// Host should open the class/color edit dialog for the annotation.
    EditPromptRequested {
        index: usize,
        class_token: String,
        color: ColorToken,
    },
    /// Host should stamp an opaque block into its raster (redaction).
    MaskPainted(Rect),
    /// Labels were written to this path.
    LabelsSaved(PathBuf),
    /// Transient user-visible status line.
    Status(String),
}
