//! Error types shared by the loader, configuration and geometry modules.

use thiserror::Error;

/// Errors produced while loading an image.
///
/// Only [`LoadError::Failed`] is delivered to a request's `error` callback;
/// the other variants are returned directly from [`crate::Loader::load`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The host reported a failure and the image was still not complete
    /// once the grace delay elapsed.
    #[error("Failed to load image: {src}")]
    Failed { src: String },

    /// The request named neither a URL nor an existing image node.
    #[error("Load request needs a url or an image node")]
    MissingSource,

    /// The host could not construct a new image handle.
    #[error("Could not create image: {0}")]
    CreateImage(String),
}

/// Invalid loader configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A zero-length poll period would re-run the tick without yielding.
    #[error("Poll interval must be greater than zero")]
    ZeroPollInterval,
}

/// Fit parameters that cannot be resolved into a concrete request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// Neither the parameters nor the image node provided this dimension.
    #[error("Missing source {0}: pass it explicitly or supply an image node")]
    MissingDimension(&'static str),
}
