//! Parameters of a single load request.

use crate::error::LoadError;

/// Invoked once the image's dimensions are known.
pub type ReadyCallback<I> = Box<dyn FnOnce(&I)>;

/// Invoked once the image has fully loaded, always after `ready`.
pub type LoadCallback<I> = Box<dyn FnOnce(&I)>;

/// Invoked when the image failed to load.
pub type ErrorCallback<I> = Box<dyn FnOnce(&I, LoadError)>;

/// What to load and whom to tell.
///
/// Either `url`, `node`, or both must be set. With only a node, the node's
/// current source is watched as-is; with both, the URL is assigned to the
/// node.
///
/// # Example
///
/// ```ignore
/// let request = LoadRequest::from_url("/photos/large.jpg", |img| {
///     println!("{}x{}", img.width(), img.height());
/// })
/// .on_load(|_| println!("done"))
/// .on_error(|_, err| eprintln!("{}", err));
/// ```
pub struct LoadRequest<I> {
    pub url: Option<String>,
    pub node: Option<I>,
    pub ready: ReadyCallback<I>,
    pub load: Option<LoadCallback<I>>,
    pub error: Option<ErrorCallback<I>>,
}

impl<I> LoadRequest<I> {
    /// Load `url` into a freshly created image.
    pub fn from_url(url: impl Into<String>, ready: impl FnOnce(&I) + 'static) -> Self {
        Self {
            url: Some(url.into()),
            node: None,
            ready: Box::new(ready),
            load: None,
            error: None,
        }
    }

    /// Watch an existing image element.
    pub fn from_node(node: I, ready: impl FnOnce(&I) + 'static) -> Self {
        Self {
            url: None,
            node: Some(node),
            ready: Box::new(ready),
            load: None,
            error: None,
        }
    }

    /// Assign `url` to the image before watching it.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn on_load(mut self, load: impl FnOnce(&I) + 'static) -> Self {
        self.load = Some(Box::new(load));
        self
    }

    pub fn on_error(mut self, error: impl FnOnce(&I, LoadError) + 'static) -> Self {
        self.error = Some(Box::new(error));
        self
    }
}
