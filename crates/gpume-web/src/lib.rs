use wasm_bindgen::prelude::*;

use gpume_core::estimate;
use gpume_core::Precision;

// ---------------------------------------------------------------------------
// Estimation
// ---------------------------------------------------------------------------

/// Estimate weight memory for `params_billion` parameters at `precision`.
/// Precision is matched case-insensitively. Returns an Estimate or null.
#[wasm_bindgen]
pub fn estimate_vram(params_billion: f64, precision: &str) -> JsValue {
    let p = match Precision::parse_loose(precision) {
        Ok(p) => p,
        Err(_) => return JsValue::NULL,
    };
    let est = estimate::estimate_for(params_billion, p);
    serde_wasm_bindgen::to_value(&est).unwrap_or(JsValue::NULL)
}

// ---------------------------------------------------------------------------
// Precision table
// ---------------------------------------------------------------------------

#[derive(serde::Serialize)]
struct PrecisionEntry {
    label: &'static str,
    description: &'static str,
    bytes_per_param: f64,
}

/// The supported precisions in menu order, as [{label, description, bytes_per_param}].
#[wasm_bindgen]
pub fn precisions() -> JsValue {
    let entries: Vec<PrecisionEntry> = Precision::ALL
        .iter()
        .map(|&p| PrecisionEntry {
            label: p.label(),
            description: p.description(),
            bytes_per_param: p.bytes_per_param(),
        })
        .collect();
    serde_wasm_bindgen::to_value(&entries).unwrap_or(JsValue::NULL)
}
