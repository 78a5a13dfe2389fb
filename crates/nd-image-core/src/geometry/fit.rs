//! Scaling an image's dimensions into a bounding box.
//!
//! Each policy pins exactly one axis to its bound and derives the other from
//! the source aspect ratio, so the pinned edge comes out exact rather than
//! carrying rounding error from a multiplied scale factor.

use super::Size;
use crate::error::GeometryError;
use serde::{Deserialize, Serialize};

/// How a source is scaled into its bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitMode {
    /// Pin the longer source edge to its bound (width on ties), or the
    /// shorter one when that bound is tighter, so the result stays in the box.
    #[default]
    LongEdge,
    /// Pin the shorter source edge to its bound (width on ties).
    ShortEdge,
    /// Equal-ratio containment: the result never exceeds either bound.
    Contain,
    /// Cover the box, scaling up as well as down.
    Stretch,
}

/// A fully resolved fit request.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitRequest {
    /// Source width
    pub width: f64,
    /// Source height
    pub height: f64,
    /// Bounding box width; infinite leaves the axis unconstrained
    pub max_width: f64,
    /// Bounding box height; infinite leaves the axis unconstrained
    pub max_height: f64,
    /// Pin the short edge instead of the long edge
    #[serde(default)]
    pub overflow: bool,
    /// Cover the box even when the source is smaller
    #[serde(default)]
    pub stretch: bool,
    /// Equal-ratio containment
    #[serde(default)]
    pub fixed: bool,
}

impl FitRequest {
    pub fn new(width: f64, height: f64, max_width: f64, max_height: f64) -> Self {
        Self {
            width,
            height,
            max_width,
            max_height,
            ..Default::default()
        }
    }

    pub fn with_overflow(mut self, overflow: bool) -> Self {
        self.overflow = overflow;
        self
    }

    pub fn with_stretch(mut self, stretch: bool) -> Self {
        self.stretch = stretch;
        self
    }

    pub fn with_fixed(mut self, fixed: bool) -> Self {
        self.fixed = fixed;
        self
    }

    /// The policy selected by the flags: stretch, then fixed, then overflow.
    pub fn mode(&self) -> FitMode {
        if self.stretch {
            FitMode::Stretch
        } else if self.fixed {
            FitMode::Contain
        } else if self.overflow {
            FitMode::ShortEdge
        } else {
            FitMode::LongEdge
        }
    }

    pub fn source(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn exceeds_bounds(&self) -> bool {
        self.width > self.max_width || self.height > self.max_height
    }
}

/// Loosely specified fit parameters, as passed from JavaScript.
///
/// Every field is optional. `max` sets both bounds unless `maxWidth` or
/// `maxHeight` override it, and a missing `width`/`height` falls back to the
/// image node's current size. Zero counts as missing, matching the
/// `a || b` defaulting JavaScript callers rely on.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FitParams {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub max: Option<f64>,
    pub max_width: Option<f64>,
    pub max_height: Option<f64>,
    pub overflow: bool,
    pub stretch: bool,
    pub fixed: bool,
}

impl FitParams {
    /// Resolve into a concrete request, taking missing source dimensions
    /// from `natural` (usually the image node's current size).
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::MissingDimension` when a source edge is given
    /// neither here nor by `natural`. A bound given neither directly nor
    /// through `max` leaves its axis unconstrained.
    pub fn resolve(&self, natural: Option<Size>) -> Result<FitRequest, GeometryError> {
        let width = non_zero(self.width)
            .or(natural.map(|size| size.width))
            .ok_or(GeometryError::MissingDimension("width"))?;
        let height = non_zero(self.height)
            .or(natural.map(|size| size.height))
            .ok_or(GeometryError::MissingDimension("height"))?;
        let max_width = non_zero(self.max_width)
            .or(non_zero(self.max))
            .unwrap_or(f64::INFINITY);
        let max_height = non_zero(self.max_height)
            .or(non_zero(self.max))
            .unwrap_or(f64::INFINITY);

        Ok(FitRequest {
            width,
            height,
            max_width,
            max_height,
            overflow: self.overflow,
            stretch: self.stretch,
            fixed: self.fixed,
        })
    }
}

fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

/// Compute the scaled dimensions for a fit request.
///
/// Sources already inside the box are returned unchanged, except under
/// [`FitMode::Stretch`] which always applies. An infinite bound constrains
/// nothing; with both bounds infinite the source is returned as-is.
/// Degenerate input (a zero, negative or non-finite source edge, or a zero,
/// negative or NaN bound) is also returned unchanged.
///
/// # Example
///
/// ```
/// use nd_image_core::geometry::{fit, FitRequest, Size};
///
/// let size = fit(&FitRequest::new(200.0, 100.0, 100.0, 100.0));
/// assert_eq!(size, Size::new(100.0, 50.0));
/// ```
pub fn fit(request: &FitRequest) -> Size {
    let source = request.source();
    if !source.is_drawable() || !has_usable_bounds(request) {
        return source;
    }

    let pin_width = match request.mode() {
        FitMode::Stretch => {
            // The axis with the smaller bound/source ratio limits the cover;
            // scale by the other axis's ratio.
            let x_ratio = request.max_width / request.width;
            let y_ratio = request.max_height / request.height;
            x_ratio >= y_ratio
        }
        _ if !request.exceeds_bounds() => return source,
        FitMode::Contain => {
            let x_rate = request.width / request.max_width;
            let y_rate = request.height / request.max_height;
            if x_rate > y_rate {
                let size = scale_to_width(source, request.max_width);
                return Size::new(size.width, size.height.min(request.max_height));
            }
            let size = scale_to_height(source, request.max_height);
            return Size::new(size.width.min(request.max_width), size.height);
        }
        FitMode::LongEdge => {
            let long_is_width = request.width >= request.height;
            let size = pin(request, long_is_width);
            if size.width <= request.max_width && size.height <= request.max_height {
                return size;
            }
            // The short edge's bound is the tighter one
            let size = pin(request, !long_is_width);
            return Size::new(
                size.width.min(request.max_width),
                size.height.min(request.max_height),
            );
        }
        FitMode::ShortEdge => request.width <= request.height,
    };

    pin(request, pin_width)
}

/// Both bounds positive (NaN excluded) and at least one finite.
fn has_usable_bounds(request: &FitRequest) -> bool {
    request.max_width > 0.0
        && request.max_height > 0.0
        && (request.max_width.is_finite() || request.max_height.is_finite())
}

/// Pin one axis to its bound, switching to the other axis when the
/// requested one is unconstrained.
fn pin(request: &FitRequest, pin_width: bool) -> Size {
    let source = request.source();
    let pin_width = match (request.max_width.is_finite(), request.max_height.is_finite()) {
        (false, _) => false,
        (_, false) => true,
        _ => pin_width,
    };
    if pin_width {
        scale_to_width(source, request.max_width)
    } else {
        scale_to_height(source, request.max_height)
    }
}

fn scale_to_width(source: Size, width: f64) -> Size {
    Size::new(width, width / source.aspect_ratio())
}

fn scale_to_height(source: Size, height: f64) -> Size {
    Size::new(height * source.aspect_ratio(), height)
}
