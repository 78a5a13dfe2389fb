//! Detecting when an image's intrinsic size becomes available.
//!
//! Browsers only announce "fully downloaded" (`load`), but layout usually
//! needs the dimensions, which arrive much earlier for large images. This
//! module polls instead: every pending request owns a [`ReadinessProbe`]
//! that compares the image's current size against a snapshot taken when the
//! request started, and a single shared [`Scheduler`] timer drives all of
//! them.
//!
//! # Architecture
//!
//! - [`ImageHandle`] and [`Host`] abstract the native image element and the
//!   timer facilities, so everything here runs (and is tested) without a
//!   browser
//! - [`Loader`] is the entry point: it resolves cached images synchronously,
//!   wires load/error notifications, and registers probes
//! - [`Scheduler`] owns the active probes and at most one recurring timer
//!
//! # Callback Ordering
//!
//! For one request `ready` fires at most once and always before `load`.
//! `error` fires at most once and never after `load`, though it can follow
//! `ready` when the size arrived before the download failed. A failure report
//! is re-checked after a grace delay, and an image that turned out complete
//! by then is treated as loaded.
//!
//! All of this is single-threaded. No `RefCell` borrow is held while user
//! callbacks run, so callbacks may start new loads.

mod handle;
mod loader;
mod probe;
mod request;
mod scheduler;

#[cfg(test)]
pub(crate) mod testing;

pub use handle::{Host, ImageHandle};
pub use loader::Loader;
pub use probe::ReadinessProbe;
pub use request::{ErrorCallback, LoadCallback, LoadRequest, ReadyCallback};
pub use scheduler::Scheduler;
