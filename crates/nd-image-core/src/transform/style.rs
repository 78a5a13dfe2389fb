//! Style declarations for transform-based and legacy rotation.

use crate::geometry::{Offset, Size};

const TRANSITION_TIMING: &str = ".2s ease-in";

/// A single inline style property and its value.
///
/// Property names are in the camelCase form used on `element.style`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDeclaration {
    pub property: &'static str,
    pub value: String,
}

impl StyleDeclaration {
    pub fn new(property: &'static str, value: impl Into<String>) -> Self {
        Self {
            property,
            value: value.into(),
        }
    }
}

/// Which spelling of `transform` the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CssPrefix {
    Webkit,
    Moz,
    Opera,
    Unprefixed,
}

impl CssPrefix {
    /// Candidates in the order they are probed.
    pub const PROBE_ORDER: [CssPrefix; 4] = [
        CssPrefix::Webkit,
        CssPrefix::Moz,
        CssPrefix::Opera,
        CssPrefix::Unprefixed,
    ];

    /// Pick the first prefix whose transform property `supports` accepts.
    ///
    /// Returns `None` when no spelling is supported, which selects the
    /// legacy matrix filter path.
    pub fn detect(mut supports: impl FnMut(&str) -> bool) -> Option<CssPrefix> {
        Self::PROBE_ORDER
            .into_iter()
            .find(|prefix| supports(prefix.transform_property()))
    }

    pub fn transform_property(self) -> &'static str {
        match self {
            CssPrefix::Webkit => "webkitTransform",
            CssPrefix::Moz => "MozTransform",
            CssPrefix::Opera => "OTransform",
            CssPrefix::Unprefixed => "transform",
        }
    }

    pub fn transition_property(self) -> &'static str {
        match self {
            CssPrefix::Webkit => "webkitTransition",
            CssPrefix::Moz => "MozTransition",
            CssPrefix::Opera => "OTransition",
            CssPrefix::Unprefixed => "transition",
        }
    }

    /// Hyphenated vendor prefix as it appears in property values.
    fn vendor(self) -> Option<&'static str> {
        match self {
            CssPrefix::Webkit => Some("-webkit-"),
            CssPrefix::Moz => Some("-moz-"),
            CssPrefix::Opera => Some("-o-"),
            CssPrefix::Unprefixed => None,
        }
    }

    /// Transition animating the transform property.
    pub fn transition(self) -> StyleDeclaration {
        let value = match self.vendor() {
            Some(vendor) => format!("{}transform {}", vendor, TRANSITION_TIMING),
            None => format!("transform {}", TRANSITION_TIMING),
        };
        StyleDeclaration::new(self.transition_property(), value)
    }

    /// Transform rotating to `degree`.
    pub fn transform(self, degree: i32) -> StyleDeclaration {
        StyleDeclaration::new(self.transform_property(), format!("rotate({}deg)", degree))
    }
}

/// Rotation matrix for the legacy `DXImageTransform` filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixFilter {
    pub m11: f64,
    pub m12: f64,
    pub m21: f64,
    pub m22: f64,
}

impl MatrixFilter {
    pub fn for_degrees(degree: i32) -> Self {
        let (sin, cos) = f64::from(degree).to_radians().sin_cos();
        Self {
            m11: snap(cos),
            m12: snap(-sin),
            m21: snap(sin),
            m22: snap(cos),
        }
    }

    /// The `filter` property value.
    ///
    /// `M21` is left unquoted; the filter parser accepts both forms.
    pub fn to_css(&self) -> String {
        format!(
            "progid:DXImageTransform.Microsoft.Matrix(M11=\"{}\", M12=\"{}\", M21={}, M22=\"{}\", sizingMethod=\"auto expand\")",
            self.m11, self.m12, self.m21, self.m22
        )
    }
}

/// Round away floating point noise so right angles print as 0/1/-1.
fn snap(value: f64) -> f64 {
    let rounded = value.round();
    if (value - rounded).abs() < 1e-12 {
        // Adding zero turns -0.0 into 0.0
        rounded + 0.0
    } else {
        value
    }
}

/// New position of an element rotated through the legacy filter.
///
/// The filter grows the box from its top-left corner, so a quarter turn
/// shifts the element by half the difference between its edges.
pub fn legacy_position(position: Offset, size: Size) -> Offset {
    let shift = (size.width - size.height) / 2.0;
    Offset {
        top: position.top - shift,
        left: position.left + shift,
    }
}
