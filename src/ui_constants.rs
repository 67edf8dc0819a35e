//! Named constants for UI layout dimensions.
//!
//! Only layout constants (dimensions, sizes, spacing) belong here.
//! Tab width and strip height are user preferences and live in the config.

// ---------------------------------------------------------------------------
// Tab strip  (src/tab_widget/tab_bar.rs)
// ---------------------------------------------------------------------------

/// Side length of the square close button drawn on every tab.
pub const TAB_CLOSE_BUTTON_SIZE: f32 = 14.0;
/// Gap between the close button and the right edge of its tab.
pub const TAB_CLOSE_BUTTON_MARGIN: f32 = 6.0;
/// Width of each of the two scroll buttons shown when tabs overflow.
pub const TAB_SCROLL_BUTTON_WIDTH: f32 = 20.0;
/// Horizontal pointer travel before a left press turns into a tab drag.
pub const TAB_DRAG_THRESHOLD: f64 = 4.0;
/// Pixels the strip scrolls per mouse wheel line.
pub const TAB_WHEEL_LINE_PIXELS: f32 = 40.0;
