//! Image readiness bindings.
//!
//! `load(params)` reports an image's dimensions as soon as the browser
//! knows them, well before the `load` event for large images.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! load({
//!   url: '/photos/large.jpg',
//!   ready() { layout(this.width, this.height); },
//!   load() { this.classList.add('loaded'); },
//!   error(message) { console.warn(message); },
//! });
//! ```

use crate::handle::DomImage;
use crate::host::BrowserHost;
use crate::params::{function_field, node_field, report, string_field, to_js_error};
use js_sys::Function;
use nd_image_core::load::{ErrorCallback, LoadCallback};
use nd_image_core::{LoadError, LoadRequest, Loader, LoaderConfig};
use wasm_bindgen::prelude::*;
use web_sys::HtmlImageElement;

thread_local! {
    static DEFAULT_LOADER: Loader<BrowserHost> = Loader::with_defaults(BrowserHost);
}

/// Start a load on the page-wide default loader.
///
/// # Arguments
///
/// * `params.url` - Image URL; optional when `node` is given
/// * `params.node` - Existing `<img>` (or a wrapper whose `[0]` is one)
/// * `params.ready` - Called with `this` = the image once its size is known
/// * `params.load` - Called after `ready` once fully loaded
/// * `params.error` - Called with the failure message if loading failed
///
/// # Returns
///
/// The image element being watched.
#[wasm_bindgen]
pub fn load(params: JsValue) -> Result<HtmlImageElement, JsValue> {
    let request = parse_request(&params)?;
    DEFAULT_LOADER.with(|loader| start(loader, request))
}

/// A loader with its own timer and configuration.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const loader = new ImageLoader({ pollIntervalMs: 20 });
/// loader.load({ url, ready() { ... } });
/// console.log(loader.pending, loader.polling);
/// loader.shutdown();
/// ```
#[wasm_bindgen]
pub struct ImageLoader {
    inner: Loader<BrowserHost>,
}

#[wasm_bindgen]
impl ImageLoader {
    /// Create a loader from a partial config object, or defaults when
    /// `config` is `undefined`/`null`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ImageLoader, JsValue> {
        let config = parse_config(config)?;
        let inner = Loader::new(BrowserHost, config).map_err(to_js_error)?;
        Ok(ImageLoader { inner })
    }

    /// Same as the free `load` function, on this loader.
    pub fn load(&self, params: JsValue) -> Result<HtmlImageElement, JsValue> {
        let request = parse_request(&params)?;
        start(&self.inner, request)
    }

    /// Number of images still being polled.
    #[wasm_bindgen(getter)]
    pub fn pending(&self) -> usize {
        self.inner.scheduler().pending()
    }

    /// Whether this loader's poll timer is running.
    #[wasm_bindgen(getter)]
    pub fn polling(&self) -> bool {
        self.inner.scheduler().is_running()
    }

    /// Stop polling and abandon every request still waiting for its size.
    /// Abandoned requests invoke none of their callbacks afterwards.
    pub fn shutdown(&self) {
        self.inner.scheduler().shutdown();
    }
}

fn start(
    loader: &Loader<BrowserHost>,
    request: LoadRequest<DomImage>,
) -> Result<HtmlImageElement, JsValue> {
    loader
        .load(request)
        .map(DomImage::into_element)
        .map_err(to_js_error)
}

fn parse_config(config: JsValue) -> Result<LoaderConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(LoaderConfig::default());
    }
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Invalid loader config: {}", e)))
}

fn parse_request(params: &JsValue) -> Result<LoadRequest<DomImage>, JsValue> {
    let url = string_field(params, "url")?;
    let node = node_field::<HtmlImageElement>(params, "node", "an image element")?;
    let ready = function_field(params, "ready")?
        .ok_or_else(|| JsValue::from_str("`ready` callback is required"))?;
    let load = function_field(params, "load")?;
    let error = function_field(params, "error")?;

    Ok(LoadRequest {
        url,
        node: node.map(DomImage::new),
        ready: Box::new(move |image: &DomImage| report("ready", ready.call0(image.element()))),
        load: load.map(load_callback),
        error: error.map(error_callback),
    })
}

fn load_callback(callback: Function) -> LoadCallback<DomImage> {
    Box::new(move |image: &DomImage| report("load", callback.call0(image.element())))
}

fn error_callback(callback: Function) -> ErrorCallback<DomImage> {
    Box::new(move |image: &DomImage, err: LoadError| {
        report("error", callback.call1(image.element(), &to_js_error(err)))
    })
}
