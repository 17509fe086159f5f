use crate::foundation::{
    core::{FrameSize, Rgb},
    error::{StudioError, StudioResult},
};

/// How the active image is mounted inside the frame.
///
/// `Card` draws the image on a styled container (box shadows, border,
/// backdrop blur). `Cutout` treats the image silhouette as the subject:
/// shadows follow the alpha edge and container styling is not rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositionMode {
    Card,
    Cutout,
}

/// Aspect-ratio tag for the output frame.
///
/// `Custom` means width/height were edited directly and no preset applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "custom")]
    Custom,
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "2:3")]
    TwoThree,
    #[serde(rename = "3:2")]
    ThreeTwo,
    #[serde(rename = "16:9")]
    SixteenNine,
    #[serde(rename = "9:16")]
    NineSixteen,
    #[serde(rename = "4:5")]
    FourFive,
}

impl AspectRatio {
    /// Fixed preset set, in panel order.
    pub const PRESETS: [AspectRatio; 6] = [
        AspectRatio::Square,
        AspectRatio::TwoThree,
        AspectRatio::ThreeTwo,
        AspectRatio::SixteenNine,
        AspectRatio::NineSixteen,
        AspectRatio::FourFive,
    ];

    /// `(ratio_w, ratio_h)` for preset tags; `None` for `Custom`.
    pub fn ratio(self) -> Option<(f64, f64)> {
        match self {
            AspectRatio::Custom => None,
            AspectRatio::Square => Some((1.0, 1.0)),
            AspectRatio::TwoThree => Some((2.0, 3.0)),
            AspectRatio::ThreeTwo => Some((3.0, 2.0)),
            AspectRatio::SixteenNine => Some((16.0, 9.0)),
            AspectRatio::NineSixteen => Some((9.0, 16.0)),
            AspectRatio::FourFive => Some((4.0, 5.0)),
        }
    }
}

/// One of the two shadow slots.
///
/// `x`/`y` are a screen-space displacement: layer 1 doubles as the global
/// light-source vector and both layers are counter-rotated into object-local
/// offsets at resolve time. `spread` and `inset` only apply in card mode.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShadowLayer {
    pub enabled: bool,
    pub x: f64,
    pub y: f64,
    pub blur: f64,
    pub spread: f64,
    pub color: Rgb,
    pub opacity: f64,
    pub inset: bool,
}

impl ShadowLayer {
    fn validate(&self, slot: &str) -> StudioResult<()> {
        if !self.blur.is_finite() || self.blur < 0.0 {
            return Err(StudioError::validation(format!("{slot} blur must be >= 0")));
        }
        if !self.x.is_finite() || !self.y.is_finite() || !self.spread.is_finite() {
            return Err(StudioError::validation(format!(
                "{slot} offsets/spread must be finite"
            )));
        }
        unit(&format!("{slot} opacity"), self.opacity)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BorderConfig {
    pub width: f64,
    pub color: Rgb,
    pub opacity: f64,
    pub radius: f64,
}

impl BorderConfig {
    fn validate(&self) -> StudioResult<()> {
        if !self.width.is_finite() || self.width < 0.0 {
            return Err(StudioError::validation("border width must be >= 0"));
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(StudioError::validation("border radius must be >= 0"));
        }
        unit("border opacity", self.opacity)
    }
}

/// Directional light overlay gradient.
///
/// `direction` is degrees in `[0, 360)`; it is kept visually synchronized
/// with shadow layer 1 while the light handle is dragged, but remains an
/// independent field the user can set on its own.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LightingConfig {
    pub enabled: bool,
    pub opacity: f64,
    pub direction: f64,
}

impl LightingConfig {
    fn validate(&self) -> StudioResult<()> {
        unit("lighting opacity", self.opacity)?;
        if !self.direction.is_finite() || self.direction < 0.0 || self.direction >= 360.0 {
            return Err(StudioError::validation(
                "lighting direction must be in [0, 360)",
            ));
        }
        Ok(())
    }
}

/// Built-in style presets, applied as a whole-state replacement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum StylePreset {
    Clean,
    Dark,
}

/// The complete serializable description of the current composition.
///
/// This is the single process-wide style value; it is mutated only by
/// whole-value replacement and every derived computation (resize, shadow
/// transform, fit scale) is a pure function of one snapshot of it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CompositionState {
    pub mode: CompositionMode,
    pub frame: FrameSize,
    pub aspect_ratio: AspectRatio,
    pub canvas_bg: Rgb,
    pub card_bg: Rgb,
    /// Uniform scale applied to the mounted image, > 0.
    pub scale: f64,
    /// Rotation in degrees (counter-clockwise negative, CSS convention).
    pub rotate: f64,
    pub border_radius: f64,
    pub shadow1: ShadowLayer,
    pub shadow2: ShadowLayer,
    pub border: BorderConfig,
    /// Card fill opacity in `0..=1` (1 = opaque card).
    pub glass_opacity: f64,
    /// Backdrop blur radius in pixels, card mode only.
    pub glass_blur: f64,
    pub lighting: LightingConfig,
}

impl Default for CompositionState {
    fn default() -> Self {
        Self {
            mode: CompositionMode::Card,
            frame: FrameSize {
                width: 1080,
                height: 1080,
            },
            aspect_ratio: AspectRatio::Square,
            canvas_bg: Rgb::new(0xf3, 0xf4, 0xf6),
            card_bg: Rgb::new(0xff, 0xff, 0xff),
            scale: 0.45,
            rotate: 0.0,
            border_radius: 32.0,
            shadow1: ShadowLayer {
                enabled: true,
                x: 0.0,
                y: 40.0,
                blur: 60.0,
                spread: -10.0,
                color: Rgb::new(0x0f, 0x17, 0x2a),
                opacity: 0.25,
                inset: false,
            },
            shadow2: ShadowLayer {
                enabled: false,
                x: 0.0,
                y: 0.0,
                blur: 0.0,
                spread: 0.0,
                color: Rgb::new(0, 0, 0),
                opacity: 0.0,
                inset: false,
            },
            border: BorderConfig {
                width: 0.0,
                color: Rgb::new(0xff, 0xff, 0xff),
                opacity: 1.0,
                radius: 32.0,
            },
            glass_opacity: 1.0,
            glass_blur: 0.0,
            lighting: LightingConfig {
                enabled: true,
                opacity: 0.05,
                direction: 135.0,
            },
        }
    }
}

impl CompositionState {
    pub fn validate(&self) -> StudioResult<()> {
        if self.frame.width == 0 || self.frame.height == 0 {
            return Err(StudioError::validation("frame width/height must be > 0"));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(StudioError::validation("scale must be > 0"));
        }
        if !self.rotate.is_finite() {
            return Err(StudioError::validation("rotate must be finite"));
        }
        if !self.border_radius.is_finite() || self.border_radius < 0.0 {
            return Err(StudioError::validation("border_radius must be >= 0"));
        }
        if !self.glass_blur.is_finite() || self.glass_blur < 0.0 {
            return Err(StudioError::validation("glass_blur must be >= 0"));
        }
        unit("glass_opacity", self.glass_opacity)?;
        self.shadow1.validate("shadow1")?;
        self.shadow2.validate("shadow2")?;
        self.border.validate()?;
        self.lighting.validate()
    }

    /// Apply a built-in style preset, keeping the current frame size and
    /// aspect-ratio tag.
    pub fn with_style_preset(&self, preset: StylePreset) -> Self {
        let defaults = Self::default();
        match preset {
            StylePreset::Clean => Self {
                mode: CompositionMode::Card,
                canvas_bg: Rgb::new(0xf3, 0xf4, 0xf6),
                card_bg: Rgb::new(0xff, 0xff, 0xff),
                border_radius: 24.0,
                rotate: 0.0,
                scale: 0.45,
                glass_opacity: 1.0,
                glass_blur: 0.0,
                border: BorderConfig {
                    width: 0.0,
                    color: Rgb::new(0xff, 0xff, 0xff),
                    opacity: 1.0,
                    radius: 24.0,
                },
                shadow1: ShadowLayer {
                    enabled: true,
                    x: 0.0,
                    y: 30.0,
                    blur: 50.0,
                    spread: -10.0,
                    color: Rgb::new(0x0f, 0x17, 0x2a),
                    opacity: 0.20,
                    inset: false,
                },
                shadow2: ShadowLayer {
                    enabled: false,
                    ..defaults.shadow2
                },
                lighting: LightingConfig {
                    enabled: true,
                    opacity: 0.05,
                    direction: 135.0,
                },
                ..self.clone()
            },
            StylePreset::Dark => Self {
                mode: CompositionMode::Card,
                canvas_bg: Rgb::new(0x11, 0x11, 0x11),
                card_bg: Rgb::new(0x22, 0x22, 0x22),
                border_radius: 30.0,
                rotate: 0.0,
                scale: 0.45,
                glass_opacity: 1.0,
                glass_blur: 0.0,
                border: BorderConfig {
                    width: 1.0,
                    color: Rgb::new(0x44, 0x44, 0x44),
                    opacity: 1.0,
                    radius: 30.0,
                },
                shadow1: ShadowLayer {
                    enabled: true,
                    x: 0.0,
                    y: 35.0,
                    blur: 70.0,
                    spread: -15.0,
                    color: Rgb::new(0, 0, 0),
                    opacity: 0.7,
                    inset: false,
                },
                // Top lighting edge.
                shadow2: ShadowLayer {
                    enabled: true,
                    x: 0.0,
                    y: 1.0,
                    blur: 0.0,
                    spread: 0.0,
                    color: Rgb::new(0x55, 0x55, 0x55),
                    opacity: 1.0,
                    inset: true,
                },
                lighting: LightingConfig {
                    enabled: true,
                    opacity: 0.1,
                    direction: 90.0,
                },
                ..self.clone()
            },
        }
    }

    pub fn to_json_string(&self) -> StudioResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| StudioError::serde(e.to_string()))
    }

    pub fn from_json_str(s: &str) -> StudioResult<Self> {
        let state: Self =
            serde_json::from_str(s).map_err(|e| StudioError::serde(e.to_string()))?;
        state.validate()?;
        Ok(state)
    }
}

fn unit(name: &str, v: f64) -> StudioResult<()> {
    if !v.is_finite() || !(0.0..=1.0).contains(&v) {
        return Err(StudioError::validation(format!("{name} must be in 0..=1")));
    }
    Ok(())
}
