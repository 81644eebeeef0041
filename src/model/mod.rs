//! Data model: geometry primitives, annotations, and label vocabularies.

mod annotation;
mod vocab;

pub use annotation::{point_in_polygon, Annotation, Point, Rect, Size, CORNER_COUNT};
pub use vocab::{normalize_class_token, ColorToken, DEFAULT_CLASS};
