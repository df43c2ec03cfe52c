//! Hudkit Overlay Library
//!
//! Busy-indicator HUD drawn over host content: spinner, pie, ring or bar
//! progress, custom views and text labels, with grace and minimum show
//! timing.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                 finder / dispatch                   │
//! │     hud_for, show_hud_added_to, HudSender           │
//! │        (container lookup, cross-thread queue)       │
//! ├─────────────────────────────────────────────────────┤
//! │                    lifecycle/                       │
//! │         Hud, SharedHud, TimerQueue, Clock           │
//! │     (phases, grace / min show timers, transitions)  │
//! ├─────────────────────────────────────────────────────┤
//! │               indicator + layout                    │
//! │        IndicatorSelector, layout::compute           │
//! │      (mode → indicator, bezel and label frames)     │
//! ├─────────────────────────────────────────────────────┤
//! │                     render/                         │
//! │  Spinner, RoundProgress, BarProgress, scene, Renderer│
//! │          (display lists, tiny-skia raster)          │
//! ├─────────────────────────────────────────────────────┤
//! │                      host                           │
//! │  Container, TextMeasurer, CustomView, HudDelegate   │
//! │            (traits implemented by the host)         │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod finder;
pub mod geometry;
pub mod host;
pub mod indicator;
pub mod layout;
pub mod lifecycle;
pub mod render;
pub mod utils;

// Re-export commonly used types
pub use config::{default_style_path, load_style, load_style_or_default, save_style};
pub use dispatch::{HudCommand, HudSender};
pub use error::HudError;
pub use finder::{all_huds_for, hide_all_huds_for, hide_hud_for, hud_for, show_hud_added_to};
pub use geometry::{Point, Rect, Size};
pub use host::{
    ApproximateMeasurer, ChildView, Container, CustomView, HeadlessContainer, HudDelegate,
    TextMeasurer, ViewId,
};
pub use indicator::{ActiveIndicator, IndicatorKind, IndicatorSelector};
pub use layout::Layout;
pub use lifecycle::{Appearance, Clock, Hud, ManualClock, Phase, SharedHud, SystemClock};
pub use render::{colors, scene, Drawing, DrawOp, Renderer};
pub use utils::color_from_rgba;

pub use hudkit_types::{AnimationStyle, Font, HudStyle, Mode};

// Re-export tiny_skia Color for external use
pub use tiny_skia::Color;
