//! Axis-aligned bounding box types for pixel-space annotations.

mod common;

pub use rect::*;
pub mod rect;

pub use xyxy::*;
pub mod xyxy;

pub use hw::*;
pub mod hw;

pub use transform::*;
pub mod transform;

pub mod prelude {
    pub use crate::rect::{Rect, RectExt};
}
