/// Presentation tuning for the DOM layer.
///
/// Pure-logic tuning lives in `core::pan::PanConfig` and
/// `core::game::GameConfig`; only values that exist for the benefit of CSS
/// and stacking belong here.
// Stress hue mapping: calm blue at 0%, red at 100%.
pub const STRESS_HUE_BASE: f32 = 210.0;
pub const STRESS_HUE_SLOPE: f32 = 2.10;

// Snap-back feedback when a released person misses every house.
pub const SNAP_BACK_MS: i32 = 250;
pub const SNAP_BACK_OFFSET_PX: f32 = -20.0;

// Person token stacking while dragged vs. at rest.
pub const DRAG_Z_INDEX: &str = "999";
pub const REST_Z_INDEX: &str = "1";

// Success overlay appears after a short beat; crisis shows immediately.
pub const SUCCESS_OVERLAY_DELAY_MS: i32 = 300;
