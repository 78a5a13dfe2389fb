//! Quarter-turn rotation of a displayed element.

use crate::params::{field, function_field, node_field, report};
use js_sys::Reflect;
use nd_image_core::geometry::{Offset, Size};
use nd_image_core::transform::{
    legacy_position, plan_rotation, CssPrefix, MatrixFilter, RotateDirection, RotationStyle,
    StyleDeclaration,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// Property on the node holding the accumulated angle.
const DEGREE_PROPERTY: &str = "degree";

thread_local! {
    static CSS_PREFIX: Option<CssPrefix> = detect_prefix();
}

/// Check a scratch element's style for a supported transform spelling.
fn detect_prefix() -> Option<CssPrefix> {
    let document = web_sys::window()?.document()?;
    let scratch = document
        .create_element("div")
        .ok()?
        .dyn_into::<HtmlElement>()
        .ok()?;
    let style: JsValue = scratch.style().into();
    CssPrefix::detect(|property| !field(&style, property).is_undefined())
}

/// Rotate `params.node` by 90 degrees around its center.
///
/// Center the node (see `zoom` and `center`) before rotating so the turned
/// image stays in bounds.
///
/// # Arguments
///
/// * `params.node` - Element to rotate
/// * `params.dir` - `true` for counter-clockwise, otherwise clockwise
/// * `params.animate` - `false` disables the transition on first rotation
/// * `params.callback` - Called with `this` = the node afterwards
#[wasm_bindgen]
pub fn rotate(params: JsValue) -> Result<(), JsValue> {
    let element: HtmlElement = node_field(&params, "node", "an HTML element")?
        .ok_or_else(|| JsValue::from_str("`node` is required"))?;
    let direction =
        RotateDirection::from_counter_clockwise(field(&params, "dir").as_bool() == Some(true));
    let animate = field(&params, "animate").as_bool() != Some(false);
    let current = field(&element, DEGREE_PROPERTY).as_f64().map(|d| d as i32);

    let prefix = CSS_PREFIX.with(|prefix| *prefix);
    let step = plan_rotation(prefix, current, direction, animate);

    Reflect::set(
        &element,
        &JsValue::from_str(DEGREE_PROPERTY),
        &JsValue::from(step.degree),
    )?;
    if let Some(transition) = &step.transition {
        set_style(&element, transition)?;
    }
    match &step.style {
        RotationStyle::Transform(transform) => set_style(&element, transform)?,
        RotationStyle::Matrix(matrix) => apply_matrix(&element, matrix)?,
    }

    if let Some(callback) = function_field(&params, "callback")? {
        report("rotate", callback.call0(&element));
    }
    Ok(())
}

fn set_style(element: &HtmlElement, declaration: &StyleDeclaration) -> Result<(), JsValue> {
    Reflect::set(
        &element.style(),
        &JsValue::from_str(declaration.property),
        &JsValue::from_str(&declaration.value),
    )?;
    Ok(())
}

fn apply_matrix(element: &HtmlElement, matrix: &MatrixFilter) -> Result<(), JsValue> {
    let position = Offset::new(
        f64::from(element.offset_top()),
        f64::from(element.offset_left()),
    );
    let moved = legacy_position(position, content_size(element)?);

    let style = element.style();
    style.set_property("filter", &matrix.to_css())?;
    style.set_property("left", &px(moved.left))?;
    style.set_property("top", &px(moved.top))?;
    Ok(())
}

/// Width and height of the content box, without padding or border.
fn content_size(element: &HtmlElement) -> Result<Size, JsValue> {
    let style = web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .get_computed_style(element)?;
    let padding = |side: &str| {
        style
            .as_ref()
            .and_then(|style| style.get_property_value(&format!("padding-{}", side)).ok())
            .map_or(0.0, |value| parse_px(&value))
    };
    let width = f64::from(element.client_width()) - padding("left") - padding("right");
    let height = f64::from(element.client_height()) - padding("top") - padding("bottom");
    Ok(Size::new(width.max(0.0), height.max(0.0)))
}

fn px(value: f64) -> String {
    format!("{}px", value)
}

/// Computed pixel lengths such as `"12.5px"`; anything else reads as zero.
fn parse_px(value: &str) -> f64 {
    value
        .trim()
        .trim_end_matches("px")
        .parse()
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px() {
        assert_eq!(px(12.0), "12px");
        assert_eq!(px(-7.5), "-7.5px");
    }

    #[test]
    fn test_parse_px() {
        assert_eq!(parse_px("12.5px"), 12.5);
        assert_eq!(parse_px(" 0px "), 0.0);
        assert_eq!(parse_px(""), 0.0);
        assert_eq!(parse_px("auto"), 0.0);
    }
}
