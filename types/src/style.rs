use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Enumerations
// ─────────────────────────────────────────────────────────────────────────────

/// Which indicator the HUD displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Spinning activity indicator
    #[default]
    Indeterminate,
    /// Pie-chart style progress
    Determinate,
    /// Horizontal progress bar
    DeterminateBar,
    /// Ring-shaped progress
    AnnularDeterminate,
    /// Host supplied view
    CustomView,
    /// Labels only
    TextOnly,
}

impl Mode {
    /// Whether the mode shows a progress value
    pub fn is_determinate(self) -> bool {
        matches!(
            self,
            Mode::Determinate | Mode::DeterminateBar | Mode::AnnularDeterminate
        )
    }
}

/// Transition used when the HUD is shown and hidden
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationStyle {
    /// Opacity only
    #[default]
    Fade,
    /// Opacity + grow from half size on show
    ZoomIn,
    /// Opacity + shrink from one and a half size on show
    #[serde(alias = "zoom")]
    ZoomOut,
}

impl AnimationStyle {
    /// Scale the HUD starts from when shown with animation
    pub fn show_from_scale(self) -> f32 {
        match self {
            AnimationStyle::Fade => 1.0,
            AnimationStyle::ZoomIn => 0.5,
            AnimationStyle::ZoomOut => 1.5,
        }
    }

    /// Scale the HUD ends at when hidden with animation
    pub fn hide_to_scale(self) -> f32 {
        match self {
            AnimationStyle::Fade => 1.0,
            AnimationStyle::ZoomIn => 1.5,
            AnimationStyle::ZoomOut => 0.5,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Font
// ─────────────────────────────────────────────────────────────────────────────

/// Font description handed to the host text measurer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Font {
    /// Family name; empty means the host's system font
    pub family: String,
    pub size: f32,
    pub bold: bool,
}

impl Font {
    pub fn bold_system(size: f32) -> Self {
        Self {
            family: String::new(),
            size,
            bold: true,
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::bold_system(16.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HUD style
// ─────────────────────────────────────────────────────────────────────────────

/// Complete appearance and timing configuration of a HUD
///
/// Colors are RGBA bytes. Times are in seconds; negative times behave as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudStyle {
    pub mode: Mode,
    pub animation: AnimationStyle,

    pub label_font: Font,
    pub label_color: [u8; 4],
    pub details_font: Font,
    pub details_color: [u8; 4],

    /// Tint of the spinner and determinate indicators
    pub indicator_color: [u8; 4],
    /// Fill of the rounded bezel behind the content
    pub bezel_color: [u8; 4],
    /// Draw a radial dimming gradient over the whole container
    pub dim_background: bool,

    /// Space between bezel edge and its content
    pub margin: f32,
    pub corner_radius: f32,
    /// Minimum bezel size as `[width, height]`
    pub min_size: [f32; 2],
    /// Force equal bezel width and height when it fits
    pub square: bool,
    /// Offset of the bezel from the container center
    pub x_offset: f32,
    pub y_offset: f32,

    /// Delay before the HUD appears; skipped entirely if the task finished
    pub grace_time: f32,
    /// Minimum time the HUD stays visible once shown
    pub min_show_time: f32,
    /// Detach from the container once hidden
    pub remove_on_hide: bool,
}

impl Default for HudStyle {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            animation: AnimationStyle::default(),
            label_font: Font::bold_system(16.0),
            label_color: [255, 255, 255, 255],
            details_font: Font::bold_system(12.0),
            details_color: [255, 255, 255, 255],
            indicator_color: [255, 255, 255, 255],
            bezel_color: [0, 0, 0, 204],
            dim_background: true,
            margin: 20.0,
            corner_radius: 10.0,
            min_size: [0.0, 0.0],
            square: false,
            x_offset: 0.0,
            y_offset: 0.0,
            grace_time: 0.0,
            min_show_time: 0.0,
            remove_on_hide: false,
        }
    }
}
