// Pure panning logic for the split-landing panels.
//
// Nothing in here touches the DOM. The web frontend feeds pointer/wheel/key
// deltas and measured viewport/image sizes in, and reads positions, edge
// flags and caption picks back out, so all of this runs on the host in tests.

/// Tuning for the pan interaction and caption activation.
///
/// These values are configuration, tuned for visual effect; the defaults are
/// the canonical ones.
#[derive(Clone, Debug)]
pub struct PanConfig {
    /// Wheel delta multiplier (px of pan per px of wheel delta).
    pub wheel_speed: f32,
    /// Pan distance for one arrow-key press, in px.
    pub keyboard_step: f32,
    /// Per-frame interpolation fraction toward the target, in (0, 1).
    pub damping: f32,
    /// How close (px) the target must be to `max_x` for the edge overlay.
    pub edge_tolerance: f32,
    /// Maximum vertical hover nudge, in px.
    pub nudge_max: f32,
    /// Minimum scaled-width factor relative to the viewport.
    pub overshoot: f32,
    /// Target offset past which the panel counts as "panned once".
    pub panned_threshold: f32,
    /// Caption proximity threshold floor, in px.
    pub caption_floor_px: f32,
    /// Caption proximity threshold as a fraction of the viewport width.
    pub caption_viewport_frac: f32,
    /// Minimum intensity for a caption to activate.
    pub caption_min_intensity: f32,
}

impl Default for PanConfig {
    fn default() -> Self {
        Self {
            wheel_speed: 0.35,
            keyboard_step: 48.0,
            damping: 0.12,
            edge_tolerance: 4.0,
            nudge_max: 12.0,
            overshoot: 1.25,
            panned_threshold: 8.0,
            caption_floor_px: 80.0,
            caption_viewport_frac: 0.16,
            caption_min_intensity: 0.08,
        }
    }
}

/// Clamp that treats NaN as the lower bound instead of propagating it.
/// Zero-sized rects produce NaN ratios; a pinned value beats a broken layout.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}

/// Natural pixel dimensions of a background image.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ImageDims {
    pub width: f32,
    pub height: f32,
}

/// Derived per-panel pan limits.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanMetrics {
    pub max_x: f32,
    pub scaled_width: f32,
    pub viewport_width: f32,
    /// Background width as a percentage of the viewport, for presentation.
    /// Zero when the fallback path was taken (background size untouched).
    pub width_percent: f32,
}

/// Zero-pan metrics used when the image is missing or failed to load.
pub fn fallback_metrics(viewport_width: f32) -> PanMetrics {
    let w = if viewport_width.is_finite() && viewport_width > 0.0 {
        viewport_width
    } else {
        0.0
    };
    PanMetrics {
        max_x: 0.0,
        scaled_width: w,
        viewport_width: w,
        width_percent: 0.0,
    }
}

/// Compute pan limits from the panel rect and the image's natural size.
///
/// The image is scaled to fill the panel height; the scaled width is bounded
/// below by `viewport * overshoot` so every panel has at least a little
/// travel. Degenerate inputs fall back to zero-pan metrics.
pub fn compute_metrics(
    viewport_width: f32,
    viewport_height: f32,
    dims: ImageDims,
    cfg: &PanConfig,
) -> PanMetrics {
    if dims.width <= 0.0 || dims.height <= 0.0 || viewport_width <= 0.0 || viewport_height <= 0.0 {
        return fallback_metrics(viewport_width.max(0.0));
    }
    let scale = viewport_height / dims.height;
    let base_width = dims.width * scale;
    let scaled_width = base_width.max(viewport_width * cfg.overshoot);
    let width_percent = (scaled_width / viewport_width) * 100.0;
    let max_x = (scaled_width - viewport_width).max(0.0);
    PanMetrics {
        max_x,
        scaled_width,
        viewport_width,
        width_percent,
    }
}

/// Scroll state for one panel.
#[derive(Clone, Debug, Default)]
pub struct PanState {
    /// Current offset, px. Rendered as `-x`.
    pub x: f32,
    /// Offset the damped interpolation is heading toward.
    pub target_x: f32,
    pub max_x: f32,
    pub hovering: bool,
    pub panned_once: bool,
    pub nudge_y: f32,
    pub scaled_width: f32,
    pub viewport_width: f32,
}

impl PanState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a discrete input delta (already scaled). Discrete inputs jump
    /// both the target and the current offset. Returns true the first time
    /// the panel moves past the panned threshold.
    pub fn pan_by(&mut self, delta: f32, cfg: &PanConfig) -> bool {
        let next = clamp(self.target_x + delta, 0.0, self.max_x);
        self.target_x = next;
        self.x = next;
        if !self.panned_once && next > cfg.panned_threshold {
            self.panned_once = true;
            return true;
        }
        false
    }

    /// One frame of interpolation toward the target.
    ///
    /// The damping fraction is applied per frame, not per second; the feel
    /// is tuned for display refresh rates.
    pub fn step(&mut self, cfg: &PanConfig) {
        self.x += (self.target_x - self.x) * cfg.damping;
        self.x = clamp(self.x, 0.0, self.max_x);
    }

    /// True when the user has panned to the right edge of the image.
    pub fn at_right_edge(&self, cfg: &PanConfig) -> bool {
        self.max_x > 0.0 && self.target_x >= self.max_x - cfg.edge_tolerance
    }

    /// Adopt freshly computed metrics, pulling any out-of-range offsets back
    /// inside the new limit.
    pub fn apply_metrics(&mut self, m: &PanMetrics) {
        self.max_x = m.max_x;
        self.scaled_width = m.scaled_width;
        self.viewport_width = m.viewport_width;
        if self.target_x > m.max_x {
            self.target_x = m.max_x;
        }
        if self.x > m.max_x {
            self.x = m.max_x;
        }
    }
}

/// Vertical nudge for a hover position, where `rel_y` is 0 at the top edge
/// and 1 at the bottom.
#[inline]
pub fn nudge_for(rel_y: f32, cfg: &PanConfig) -> f32 {
    if !rel_y.is_finite() {
        return 0.0;
    }
    (rel_y - 0.5) * 2.0 * cfg.nudge_max
}

/// Pick the dominant wheel axis, horizontal winning ties to vertical only
/// when strictly larger.
#[inline]
pub fn dominant_wheel_delta(delta_x: f32, delta_y: f32) -> f32 {
    if delta_x.abs() > delta_y.abs() {
        delta_x
    } else {
        delta_y
    }
}

/// A caption trigger point within the scaled background image.
#[derive(Clone, Copy, Debug)]
pub struct CaptionDescriptor {
    /// Normalized horizontal anchor, 0..1 of the scaled image width.
    pub anchor: f32,
    pub text: &'static str,
}

/// Result of caption selection for one panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptionPick {
    pub index: usize,
    pub intensity: f32,
    /// Horizontal offset of the anchor from the viewport's left edge, px.
    pub center_x: f32,
}

/// Choose the caption whose anchor the current offset is closest to
/// centering, if any clears the activation threshold.
///
/// Intensity falls off inverse-linearly with distance over a threshold that
/// is the larger of a fixed pixel floor and a fraction of the viewport
/// width. At most one caption is ever picked.
pub fn pick_caption(
    state: &PanState,
    descriptors: &[CaptionDescriptor],
    cfg: &PanConfig,
) -> Option<CaptionPick> {
    if state.scaled_width <= 0.0 || state.viewport_width <= 0.0 {
        return None;
    }
    let threshold = cfg
        .caption_floor_px
        .max(state.viewport_width * cfg.caption_viewport_frac);

    let mut best: Option<CaptionPick> = None;
    for (index, descriptor) in descriptors.iter().enumerate() {
        let anchor_abs = descriptor.anchor * state.scaled_width;
        let centered = clamp(anchor_abs - state.viewport_width / 2.0, 0.0, state.max_x);
        let distance = (state.x - centered).abs();
        let intensity = clamp(1.0 - distance / threshold, 0.0, 1.0);
        let beats = match best {
            Some(b) => intensity > b.intensity,
            None => intensity > 0.0,
        };
        if beats {
            best = Some(CaptionPick {
                index,
                intensity,
                center_x: anchor_abs - state.x,
            });
        }
    }
    best.filter(|b| b.intensity >= cfg.caption_min_intensity)
}

/// Pull the URL out of a computed `background-image` value such as
/// `url("city.jpg")`. Quoting is optional; `none` and anything unrecognized
/// yield `None`.
pub fn extract_image_url(value: &str) -> Option<&str> {
    if value.is_empty() || value == "none" {
        return None;
    }
    let start = value.find("url(")? + 4;
    let rest = &value[start..];
    let end = rest.find(')')?;
    let inner = rest[..end].trim();
    let unquoted = inner
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| inner.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(inner);
    if unquoted.is_empty() {
        None
    } else {
        Some(unquoted)
    }
}
