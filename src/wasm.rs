//! WASM bindings for browser-side CSS processing.
//!
//! This module exposes the processor and class-name hash to JavaScript via wasm-bindgen.

use wasm_bindgen::prelude::*;

use crate::config::StyleConfig;
use crate::css::{ProcessOptions, process_css as process};
use crate::hash::resolve_class_name;
use crate::theme::Theme;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Process raw CSS, optionally scoped under `selector`.
///
/// `theme_json` is a serialized theme; without it spacing values pass through
/// unscaled and `@honey-media` breakpoints are unknown.
#[wasm_bindgen(js_name = processCss)]
pub fn process_css(
    raw: &str,
    selector: Option<String>,
    theme_json: Option<String>,
) -> Result<String, JsValue> {
    let theme = theme_json
        .as_deref()
        .map(Theme::from_json)
        .transpose()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let options = ProcessOptions::new(theme.as_ref()).with_config(StyleConfig::production());
    Ok(process(raw, selector.as_deref(), &options))
}

/// Class name generated for a CSS string.
#[wasm_bindgen(js_name = className)]
pub fn class_name(css: &str) -> String {
    resolve_class_name(css)
}
