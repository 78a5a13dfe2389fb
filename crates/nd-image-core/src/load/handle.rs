//! Seams between the loader and its environment.

use crate::error::LoadError;

/// A native image element, shared by reference.
///
/// Clones must refer to the same underlying image.
pub trait ImageHandle: Clone + 'static {
    /// Keeps a notification listener attached; dropping it detaches.
    type Binding: 'static;

    /// Current source URL.
    fn src(&self) -> String;

    /// Assign a source URL, which starts (or restarts) loading.
    fn set_src(&self, src: &str);

    /// Current width; changes while data streams in.
    fn width(&self) -> u32;

    /// Current height; changes while data streams in.
    fn height(&self) -> u32;

    /// Whether the host considers the resource fully resolved.
    fn complete(&self) -> bool;

    /// Listen for the load-completion notification.
    fn on_load(&self, callback: Box<dyn FnMut()>) -> Self::Binding;

    /// Listen for the load-failure notification.
    fn on_error(&self, callback: Box<dyn FnMut()>) -> Self::Binding;
}

/// Image construction and timers provided by the environment.
pub trait Host: 'static {
    type Image: ImageHandle;

    /// A running recurring timer; dropping it cancels the timer.
    type Interval: 'static;

    /// Construct a fresh image element.
    fn create_image(&self) -> Result<Self::Image, LoadError>;

    /// Run `tick` every `period_ms` milliseconds until the returned handle
    /// is dropped.
    fn set_interval(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> Self::Interval;

    /// Run `callback` once after `delay_ms` milliseconds.
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>);
}
