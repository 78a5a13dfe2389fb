//! Fit and centering bindings.
//!
//! Both functions only compute; applying the result is left to the optional
//! `callback`, which runs with `this` = the node.

use crate::params::{function_field, node_size, node_value, report, to_js_error};
use js_sys::Function;
use nd_image_core::geometry::{center as center_offset, fit, FitParams, Size};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

/// Scale an image's dimensions into a bounding box.
///
/// # Arguments
///
/// * `params.node` - Image supplying `width`/`height` when not given
/// * `params.width`, `params.height` - Source size
/// * `params.max` - Bound for both axes
/// * `params.maxWidth`, `params.maxHeight` - Per-axis bounds, overriding `max`;
///   an axis with no bound is unconstrained
/// * `params.overflow` - Pin the short edge (cover) instead of the long edge
/// * `params.fixed` - Equal-ratio fit that never exceeds either bound
/// * `params.stretch` - Cover the box, scaling small images up too
/// * `params.callback` - Called with `(width, height)`
///
/// # Returns
///
/// `{ width, height }`
///
/// # Example (TypeScript)
///
/// ```typescript
/// const { width, height } = zoom({ node: img, max: 200 });
/// ```
#[wasm_bindgen]
pub fn zoom(params: JsValue) -> Result<JsValue, JsValue> {
    let fit_params: FitParams = serde_wasm_bindgen::from_value(params.clone())
        .map_err(|e| JsValue::from_str(&format!("Invalid zoom params: {}", e)))?;
    let node = node_value(&params, "node");
    let natural = node.as_ref().and_then(node_size);

    let request = fit_params.resolve(natural).map_err(to_js_error)?;
    let size = fit(&request);

    if let Some(callback) = function_field(&params, "callback")? {
        let this = node.unwrap_or(JsValue::UNDEFINED);
        invoke(&callback, &this, size.width, size.height);
    }

    serde_wasm_bindgen::to_value(&size).map_err(to_js_error)
}

#[derive(Deserialize)]
struct ContainerParams {
    width: f64,
    height: f64,
}

/// Offsets that center `params.node` inside a `params.width` ×
/// `params.height` container.
///
/// # Returns
///
/// `{ top, left }`, also passed to `params.callback` as `(top, left)`.
#[wasm_bindgen]
pub fn center(params: JsValue) -> Result<JsValue, JsValue> {
    let container: ContainerParams = serde_wasm_bindgen::from_value(params.clone())
        .map_err(|e| JsValue::from_str(&format!("Invalid center params: {}", e)))?;
    let node = node_value(&params, "node").ok_or_else(|| JsValue::from_str("`node` is required"))?;
    let image = node_size(&node)
        .ok_or_else(|| JsValue::from_str("`node` must report numeric width and height"))?;

    let offset = center_offset(Size::new(container.width, container.height), image);

    if let Some(callback) = function_field(&params, "callback")? {
        invoke(&callback, &node, offset.top, offset.left);
    }

    serde_wasm_bindgen::to_value(&offset).map_err(to_js_error)
}

fn invoke(callback: &Function, this: &JsValue, first: f64, second: f64) {
    report(
        "callback",
        callback.call2(this, &JsValue::from(first), &JsValue::from(second)),
    );
}
