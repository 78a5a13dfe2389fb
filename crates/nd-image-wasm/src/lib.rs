//! ND Image WASM - WebAssembly bindings for nd-image
//!
//! This crate exposes the nd-image-core functionality to JavaScript, backed
//! by DOM image elements and the page's timers.
//!
//! # Module Structure
//!
//! - `loader` - Early dimension detection (`load`, `ImageLoader`)
//! - `geometry` - Fit and centering arithmetic (`zoom`, `center`)
//! - `rotate` - Quarter-turn CSS rotation with a legacy filter fallback
//! - `logging` - Console output for the library's `log` records
//! - `handle`, `host` - DOM image element and browser timers for the loader
//!
//! # Usage
//!
//! ```typescript
//! import init, { load, zoom, center } from '@nd/image';
//!
//! await init();
//!
//! load({
//!   url: '/photos/large.jpg',
//!   ready() {
//!     const size = zoom({ node: this, max: 400 });
//!     center({ node: this, width: 400, height: 400 });
//!   },
//! });
//! ```

use log::LevelFilter;
use wasm_bindgen::prelude::*;

mod geometry;
mod handle;
mod host;
mod loader;
mod logging;
mod params;
mod rotate;

pub use geometry::{center, zoom};
pub use handle::DomImage;
pub use host::BrowserHost;
pub use loader::{load, ImageLoader};
pub use logging::init_logging;
pub use rotate::rotate;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logging::install(LevelFilter::Warn);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
