//! Interaction and view constants.

/// Zoom limits and wheel step.
pub mod zoom {
    /// Wheel step factor; a forward tick multiplies, a backward tick divides.
    pub const STEP: f32 = 1.15;
    /// Minimum view scale.
    pub const MIN: f32 = 0.2;
    /// Maximum view scale.
    pub const MAX: f32 = 8.0;
}

/// Corner-handle geometry (display pixels).
pub mod handle {
    /// Drawn handle radius.
    pub const RADIUS: f32 = 6.0;
    /// Hit tolerance multiplier applied to the radius.
    pub const HIT_TOLERANCE: f32 = 1.6;
}

/// New-box drag constraints (image pixels).
pub mod drag {
    /// Minimum width/height for a committed box; smaller drags are
    /// treated as accidental clicks and discarded.
    pub const MIN_BOX_SIZE: f32 = 2.0;
}
