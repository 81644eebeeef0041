//! quadlabel - Quadrilateral annotation engine
//!
//! Geometry, interaction, and persistence core for labeling images with
//! 4-corner bounding annotations: view/image coordinate transforms,
//! quad hit-testing and drag editing, ROI management, and the normalized
//! label TXT codec with legacy pixel-coordinate compatibility.

pub mod config;
pub mod constants;
pub mod event;
pub mod format;
pub mod geometry;
pub mod interaction;
pub mod model;
pub mod roi;
pub mod session;
pub mod store;

pub use config::Settings;
pub use event::{InputEvent, OutputEvent};
pub use session::AnnotationSession;
