use crate::foundation::core::{FrameSize, Size, Vec2};

/// Fixed padding budget around the fitted frame: 32px per side.
pub const FIT_PADDING: f64 = 64.0;

const ZOOM_STEP: f64 = 0.1;
const ZOOM_MIN: f64 = 0.1;
const ZOOM_MAX: f64 = 3.0;

/// Display-only fit/zoom/pan state for the preview surface.
///
/// Never consulted by export: exported pixels always render at the frame's
/// native size with any viewport transform neutralized.
///
/// While `auto_fit` is on, callers must re-invoke [`Viewport::refit`] on
/// every frame-size change *and* every measured resize of the containing
/// viewport (window resize, panel collapse) — fitting is a continuous
/// observation, not a one-time measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    zoom_scale: f64,
    auto_fit: bool,
    pan: Vec2,
    panning: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom_scale: 0.5,
            auto_fit: true,
            pan: Vec2::ZERO,
            panning: false,
        }
    }
}

/// Scale that fits `frame` into `viewport` with the fixed padding budget,
/// floored at 0.1 for degenerate inputs.
pub fn fit_scale(frame: FrameSize, viewport: Size) -> f64 {
    let available_w = (viewport.width - FIT_PADDING).max(0.0);
    let available_h = (viewport.height - FIT_PADDING).max(0.0);

    let scale_x = available_w / f64::from(frame.width);
    let scale_y = available_h / f64::from(frame.height);
    let scale = scale_x.min(scale_y);

    if !scale.is_finite() || scale <= 0.0 {
        return 0.1;
    }
    scale
}

impl Viewport {
    pub fn zoom_scale(&self) -> f64 {
        self.zoom_scale
    }

    pub fn auto_fit(&self) -> bool {
        self.auto_fit
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn is_panning(&self) -> bool {
        self.panning
    }

    /// Recompute the fit scale if auto-fit is active. Resets pan.
    pub fn refit(&mut self, frame: FrameSize, viewport: Size) {
        if !self.auto_fit {
            return;
        }
        self.zoom_scale = fit_scale(frame, viewport);
        self.pan = Vec2::ZERO;
    }

    /// Re-enable fit-to-screen and recompute immediately.
    pub fn fit_to_screen(&mut self, frame: FrameSize, viewport: Size) {
        self.auto_fit = true;
        self.pan = Vec2::ZERO;
        self.refit(frame, viewport);
    }

    pub fn zoom_in(&mut self) {
        self.auto_fit = false;
        self.zoom_scale = step(self.zoom_scale, ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.auto_fit = false;
        self.zoom_scale = step(self.zoom_scale, -ZOOM_STEP);
    }

    /// Start panning (designated pan pointer button held).
    pub fn begin_pan(&mut self) {
        self.panning = true;
        self.auto_fit = false;
    }

    /// Accumulate a raw pointer movement delta. No-op unless panning.
    pub fn pan_by(&mut self, delta: Vec2) {
        if self.panning {
            self.pan += delta;
        }
    }

    pub fn end_pan(&mut self) {
        self.panning = false;
    }
}

fn step(zoom: f64, delta: f64) -> f64 {
    let next = ((zoom + delta) * 10.0).round() / 10.0;
    next.clamp(ZOOM_MIN, ZOOM_MAX)
}
