//! Quarter-turn rotation of a displayed image.
//!
//! Rotation here is presentational: nothing touches pixels. Each step adds
//! or removes 90 degrees from an angle accumulated on the node and produces
//! the style declarations a browser needs to show it.
//!
//! # Rendering Paths
//!
//! 1. CSS transforms (prefixed or standard), optionally with a transition on
//!    the first rotation so later steps animate
//! 2. A legacy matrix filter for engines without transforms, which also
//!    needs the element shifted since the filter expands around its corner
//!
//! # Coordinate System
//!
//! - Positive degrees rotate clockwise, as CSS `rotate()` does
//! - The angle is not normalized: 270 → 360 keeps animating forward

mod rotation;
mod style;

pub use rotation::{
    plan_rotation, RotateDirection, RotationStep, RotationStyle, ROTATION_STEP_DEGREES,
};
pub use style::{legacy_position, CssPrefix, MatrixFilter, StyleDeclaration};
