//! Shared style and configuration types for hudkit
//!
//! These types are plain data: they carry no rendering or timing behavior and
//! can be (de)serialized with serde so hosts can ship HUD styles as TOML.

pub mod formatting;
mod style;

pub use style::{AnimationStyle, Font, HudStyle, Mode};
