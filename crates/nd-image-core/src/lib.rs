//! ND Image Core - image readiness and layout library
//!
//! This crate provides the platform-independent half of the ND image
//! helpers: early detection of an image's intrinsic size while it is still
//! downloading, fit and centering arithmetic, and quarter-turn rotation
//! styles. Browser bindings live in `nd-image-wasm`.

pub mod config;
pub mod error;
pub mod geometry;
pub mod load;
pub mod transform;

pub use config::LoaderConfig;
pub use error::{ConfigError, GeometryError, LoadError};
pub use geometry::{center, fit, FitMode, FitParams, FitRequest, Offset, Size};
pub use load::{Host, ImageHandle, LoadRequest, Loader, ReadinessProbe, Scheduler};
pub use transform::{
    legacy_position, plan_rotation, CssPrefix, MatrixFilter, RotateDirection, RotationStep,
    RotationStyle, StyleDeclaration,
};
