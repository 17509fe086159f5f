use crate::{
    composition::model::{CompositionMode, CompositionState, ShadowLayer},
    foundation::core::{Rgba, Vec2},
};

/// Amplification of the light handle's visual travel relative to the
/// shadow offset range it maps onto.
pub const LIGHT_MULTIPLIER: f64 = 4.0;

/// Scale floor applied before inverting the handle mapping, mirroring the
/// handle's own display-size compensation.
const MIN_SCALE: f64 = 0.1;

/// Convert a screen-space shadow displacement into the object-local offset
/// that produces it under the given rotation.
///
/// Shadows are authored in screen space (what the viewer sees) but applied
/// in the object's rotated frame, so the vector is counter-rotated by the
/// object rotation: a shadow dragged "below" stays visually below no matter
/// how the object is rotated.
pub fn local_shadow_offset(screen: Vec2, rotation_deg: f64) -> Vec2 {
    let rad = -rotation_deg.to_radians();
    let (sin, cos) = rad.sin_cos();
    Vec2::new(
        screen.x * cos - screen.y * sin,
        screen.x * sin + screen.y * cos,
    )
}

/// Screen position of the light-source handle.
///
/// The handle is not independent state: it is derived from shadow layer 1
/// (light sits visually opposite the shadow, hence the negation), amplified
/// by [`LIGHT_MULTIPLIER`] and tracked against the object's uniform scale.
pub fn screen_light_pos(state: &CompositionState) -> Vec2 {
    Vec2::new(
        -state.shadow1.x * LIGHT_MULTIPLIER * state.scale,
        -state.shadow1.y * LIGHT_MULTIPLIER * state.scale,
    )
}

/// Result of dragging the light handle to a new screen position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightDrag {
    /// New screen-space displacement for shadow layer 1.
    pub shadow_offset: Vec2,
    /// New overlay gradient direction in degrees, `[0, 360)`.
    pub direction: f64,
}

/// Invert the handle mapping for a drag to screen position `screen`.
///
/// This is the exact inverse of [`screen_light_pos`] (a bijection up to
/// floating rounding), with `scale` floored at 0.1 so a near-zero object
/// scale cannot blow up the division. The gradient direction is recomputed
/// from the unscaled light vector so the overlay highlight follows the
/// handle: a handle straight above the object yields direction 0.
pub fn light_drag_target(state: &CompositionState, screen: Vec2) -> LightDrag {
    let scale = state.scale.max(MIN_SCALE);
    let unscaled = screen / scale;
    let shadow_offset = -unscaled / LIGHT_MULTIPLIER;

    let light = -unscaled;
    let mut direction = light.x.atan2(-light.y).to_degrees() + 180.0;
    if direction < 0.0 {
        direction += 360.0;
    }
    LightDrag {
        shadow_offset,
        direction: direction.round().rem_euclid(360.0),
    }
}

/// The gradient direction actually rendered.
///
/// Counter-rotated by the object rotation so the highlight stays fixed
/// relative to the screen, not the rotated object.
pub fn effective_gradient_direction(state: &CompositionState) -> f64 {
    (state.lighting.direction - state.rotate).rem_euclid(360.0)
}

/// Display scale for the handle knob, keeping it a constant on-screen size
/// regardless of object scale and viewport zoom.
pub fn handle_display_scale(scale: f64, zoom_scale: f64) -> f64 {
    1.0 / (scale.max(MIN_SCALE) * zoom_scale.max(MIN_SCALE))
}

/// How shadows are painted for the current mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShadowKind {
    /// Card mode: box shadows on the container, `spread`/`inset` honored.
    Boxed,
    /// Cutout mode: silhouette-following drop shadows; `spread`/`inset`
    /// are ignored (left in state, not cleared) and never inset.
    Silhouette,
}

/// A shadow layer after screen-to-local conversion and mode resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedShadow {
    pub offset: Vec2,
    pub blur: f64,
    pub spread: f64,
    pub color: Rgba,
    pub inset: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedBorder {
    pub width: f64,
    pub color: Rgba,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedLighting {
    pub opacity: f64,
    /// Screen-fixed direction, already counter-rotated by the object
    /// rotation.
    pub direction: f64,
}

/// Derived presentation values consumed by the rendering surface.
///
/// Pure function of one [`CompositionState`] snapshot; container styling
/// (border, corner radius, fill, backdrop blur, lighting overlay) is
/// absent in cutout mode even though the state still holds those fields.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedStyle {
    pub shadow_kind: ShadowKind,
    pub shadows: Vec<ResolvedShadow>,
    pub corner_radius: f64,
    pub border: Option<ResolvedBorder>,
    pub card_fill: Option<Rgba>,
    pub backdrop_blur: f64,
    pub lighting: Option<ResolvedLighting>,
}

pub fn resolve_style(state: &CompositionState) -> ResolvedStyle {
    let cutout = state.mode == CompositionMode::Cutout;
    let kind = if cutout {
        ShadowKind::Silhouette
    } else {
        ShadowKind::Boxed
    };

    let mut shadows = Vec::with_capacity(2);
    for layer in [&state.shadow1, &state.shadow2] {
        if let Some(resolved) = resolve_layer(layer, state.rotate, kind) {
            shadows.push(resolved);
        }
    }

    if cutout {
        return ResolvedStyle {
            shadow_kind: kind,
            shadows,
            corner_radius: 0.0,
            border: None,
            card_fill: None,
            backdrop_blur: 0.0,
            lighting: None,
        };
    }

    ResolvedStyle {
        shadow_kind: kind,
        shadows,
        corner_radius: state.border_radius,
        border: (state.border.width > 0.0).then(|| ResolvedBorder {
            width: state.border.width,
            color: state.border.color.with_alpha(state.border.opacity),
        }),
        card_fill: Some(state.card_bg.with_alpha(state.glass_opacity)),
        backdrop_blur: state.glass_blur,
        lighting: state.lighting.enabled.then(|| ResolvedLighting {
            opacity: state.lighting.opacity,
            direction: effective_gradient_direction(state),
        }),
    }
}

fn resolve_layer(layer: &ShadowLayer, rotate: f64, kind: ShadowKind) -> Option<ResolvedShadow> {
    if !layer.enabled {
        return None;
    }
    let offset = local_shadow_offset(Vec2::new(layer.x, layer.y), rotate);
    let silhouette = kind == ShadowKind::Silhouette;
    Some(ResolvedShadow {
        offset,
        blur: layer.blur,
        spread: if silhouette { 0.0 } else { layer.spread },
        color: layer.color.with_alpha(layer.opacity),
        inset: if silhouette { false } else { layer.inset },
    })
}
