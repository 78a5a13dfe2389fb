//! Layout arithmetic for displaying an image inside a box.
//!
//! Everything here is pure: callers read dimensions from the DOM (or wherever
//! they live), pass plain numbers in, and apply the results themselves.
//!
//! # Fit Policies
//!
//! - **Long edge** (default): the longer source edge is pinned to its bound,
//!   or the shorter one when its bound is tighter; the result stays in the box
//! - **Short edge** (`overflow`): the shorter source edge is pinned, the
//!   image may spill past the box on the other axis
//! - **Contain** (`fixed`): equal-ratio fit that never exceeds either bound
//! - **Stretch**: cover fit that is applied even when the source is smaller
//!
//! # Coordinate System
//!
//! Offsets are measured from the container's top-left corner, in the same
//! units as the sizes passed in (CSS pixels in practice).

mod center;
mod fit;

pub use center::center;
pub use fit::{fit, FitMode, FitParams, FitRequest};

use serde::{Deserialize, Serialize};

/// Width and height of an image or a container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// True when both edges are finite and strictly positive.
    pub fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Position of an image's top-left corner inside its container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub top: f64,
    pub left: f64,
}

impl Offset {
    pub fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }
}
