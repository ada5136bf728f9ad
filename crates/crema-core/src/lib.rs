//! Core types shared by the crema crates.
//!
//! Everything here is plain data: page geometry in px, the animatable
//! property set of a single element, and the user-facing settings enums.

mod geometry;
mod props;
mod settings;

pub use geometry::{DeviceClass, Point, Rect, Viewport, CELL_HEIGHT_PX, CELL_WIDTH_PX};
pub use props::{Property, PropertySet};
pub use settings::{AnimationSpeed, RoastTheme};
