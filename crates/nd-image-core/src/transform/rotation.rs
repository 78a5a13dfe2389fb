//! Planning a single rotation step.

use super::style::{CssPrefix, MatrixFilter, StyleDeclaration};

/// Degrees added or removed by one rotation.
pub const ROTATION_STEP_DEGREES: i32 = 90;

/// Direction of a quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotateDirection {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl RotateDirection {
    /// Map the `dir` flag callers pass: `true` means counter-clockwise.
    pub fn from_counter_clockwise(counter_clockwise: bool) -> Self {
        if counter_clockwise {
            RotateDirection::CounterClockwise
        } else {
            RotateDirection::Clockwise
        }
    }

    /// Signed change in degrees.
    pub fn delta(self) -> i32 {
        match self {
            RotateDirection::Clockwise => ROTATION_STEP_DEGREES,
            RotateDirection::CounterClockwise => -ROTATION_STEP_DEGREES,
        }
    }
}

/// How the new angle is expressed on the element.
#[derive(Debug, Clone, PartialEq)]
pub enum RotationStyle {
    /// A CSS transform property.
    Transform(StyleDeclaration),
    /// Legacy matrix filter; the caller also moves the element with
    /// [`super::legacy_position`].
    Matrix(MatrixFilter),
}

/// Everything needed to apply one rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationStep {
    /// Accumulated angle after this step, to be stored back on the node.
    pub degree: i32,
    /// Transition to install before the transform; only set on the first
    /// rotation of a node, when transforms exist and animation is wanted.
    pub transition: Option<StyleDeclaration>,
    pub style: RotationStyle,
}

/// Plan the next rotation of a node.
///
/// # Arguments
///
/// * `prefix` - Detected transform support, `None` for the legacy path
/// * `current` - Angle already stored on the node, `None` if never rotated
/// * `direction` - Which way to turn
/// * `animate` - Whether a first rotation should install a transition
pub fn plan_rotation(
    prefix: Option<CssPrefix>,
    current: Option<i32>,
    direction: RotateDirection,
    animate: bool,
) -> RotationStep {
    let transition = match (current, prefix) {
        (None, Some(prefix)) if animate => Some(prefix.transition()),
        _ => None,
    };
    let degree = current.unwrap_or(0) + direction.delta();

    let style = match prefix {
        Some(prefix) => RotationStyle::Transform(prefix.transform(degree)),
        None => RotationStyle::Matrix(MatrixFilter::for_degrees(degree)),
    };

    RotationStep {
        degree,
        transition,
        style,
    }
}
