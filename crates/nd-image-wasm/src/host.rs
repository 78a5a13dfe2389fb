//! Browser timers and image construction for the loader.

use crate::handle::DomImage;
use crate::params::describe;
use gloo::timers::callback::{Interval, Timeout};
use nd_image_core::{Host, LoadError};
use web_sys::HtmlImageElement;

/// The page's event loop as a loader host.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHost;

impl Host for BrowserHost {
    type Image = DomImage;
    type Interval = Interval;

    fn create_image(&self) -> Result<DomImage, LoadError> {
        HtmlImageElement::new()
            .map(DomImage::new)
            .map_err(|err| LoadError::CreateImage(describe(&err)))
    }

    fn set_interval(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> Interval {
        Interval::new(period_ms, tick)
    }

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, callback).forget();
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use nd_image_core::ImageHandle;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_create_image() {
        let image = BrowserHost.create_image().unwrap();
        assert!(image.src().is_empty());
    }
}
