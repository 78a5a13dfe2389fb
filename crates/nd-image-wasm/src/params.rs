//! Reading loosely shaped parameter objects passed from JavaScript.
//!
//! Callers hand over plain objects (`{ url, node, ready }`), sometimes with
//! nodes wrapped in an array-like collection. These helpers pull typed
//! fields out of them and turn failures into `JsValue` errors.

use js_sys::{Function, Reflect};
use log::warn;
use nd_image_core::Size;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Convert any displayable error into a thrown JS string.
pub(crate) fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Human-readable text for a thrown JS value.
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// `target[key]`, or `undefined` when `target` is not an object.
pub(crate) fn field(target: &JsValue, key: &str) -> JsValue {
    Reflect::get(target, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

fn is_absent(value: &JsValue) -> bool {
    value.is_undefined() || value.is_null()
}

pub(crate) fn string_field(params: &JsValue, key: &str) -> Result<Option<String>, JsValue> {
    let value = field(params, key);
    if is_absent(&value) {
        return Ok(None);
    }
    value
        .as_string()
        .map(Some)
        .ok_or_else(|| JsValue::from_str(&format!("`{}` must be a string", key)))
}

pub(crate) fn function_field(params: &JsValue, key: &str) -> Result<Option<Function>, JsValue> {
    let value = field(params, key);
    if is_absent(&value) {
        return Ok(None);
    }
    value
        .dyn_into::<Function>()
        .map(Some)
        .map_err(|_| JsValue::from_str(&format!("`{}` must be a function", key)))
}

/// The node under `key`, unwrapping an array-like wrapper (`node[0] || node`).
pub(crate) fn node_value(params: &JsValue, key: &str) -> Option<JsValue> {
    let value = field(params, key);
    if is_absent(&value) {
        return None;
    }
    let first = Reflect::get(&value, &JsValue::from_f64(0.0)).unwrap_or(JsValue::UNDEFINED);
    Some(if first.is_truthy() { first } else { value })
}

/// Like [`node_value`], checked against the expected element type.
pub(crate) fn node_field<T: JsCast>(
    params: &JsValue,
    key: &str,
    expected: &str,
) -> Result<Option<T>, JsValue> {
    match node_value(params, key) {
        Some(node) => node
            .dyn_into::<T>()
            .map(Some)
            .map_err(|_| JsValue::from_str(&format!("`{}` must be {}", key, expected))),
        None => Ok(None),
    }
}

/// The `width`/`height` a node currently reports, if both are numbers.
pub(crate) fn node_size(node: &JsValue) -> Option<Size> {
    let width = field(node, "width").as_f64()?;
    let height = field(node, "height").as_f64()?;
    Some(Size::new(width, height))
}

/// Log an exception thrown by a user callback.
///
/// Callbacks run from timers and event listeners have no caller to rethrow
/// to, so every callback result goes through here.
pub(crate) fn report(name: &str, result: Result<JsValue, JsValue>) {
    if let Err(err) = result {
        warn!("{} callback threw: {}", name, describe(&err));
    }
}
