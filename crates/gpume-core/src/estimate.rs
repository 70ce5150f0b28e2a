use serde::Serialize;

use crate::error::Result;
use crate::precision::Precision;

/// Parameter counts are given in billions.
pub const PARAMS_PER_BILLION: f64 = 1e9;

/// VRAM is reported in binary gigabytes.
pub const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Memory needed to hold a model's weights.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    pub params_billion: f64,
    pub precision: Precision,
    pub vram_gb: f64,
}

impl Estimate {
    /// One-line human summary, e.g. for the console.
    pub fn summary(&self) -> String {
        format!(
            "The estimated VRAM requirement for an LLM with {} billion parameters at {} precision is: {} GB",
            fmt_fixed(self.params_billion, 1),
            self.precision,
            fmt_fixed(self.vram_gb, 2)
        )
    }
}

/// Fixed-point formatting; non-finite values print as `nan`, `inf`, `-inf`.
fn fmt_fixed(v: f64, decimals: usize) -> String {
    if v.is_nan() {
        "nan".to_string()
    } else if v == f64::INFINITY {
        "inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        format!("{v:.decimals$}")
    }
}

/// Weight memory in GB for `params_billion` parameters stored at `precision`.
/// Not rounded; negative or zero counts pass straight through the formula.
pub fn vram_gb(params_billion: f64, precision: Precision) -> f64 {
    let total_bytes = params_billion * PARAMS_PER_BILLION * precision.bytes_per_param();
    total_bytes / BYTES_PER_GB
}

pub fn estimate_for(params_billion: f64, precision: Precision) -> Estimate {
    let vram_gb = vram_gb(params_billion, precision);
    tracing::debug!(params_billion, %precision, vram_gb, "estimated weight memory");
    Estimate {
        params_billion,
        precision,
        vram_gb,
    }
}

/// Estimate VRAM in GB from a parameter count (billions) and a precision label.
///
/// The label must be one of `FP32`, `FP16`, `FP8`, `INT8`, `FP4`, `INT4`,
/// matched case-sensitively.
pub fn estimate(params_billion: f64, precision: &str) -> Result<f64> {
    let precision: Precision = precision.parse().inspect_err(|e| {
        tracing::debug!(error = %e, "rejected precision");
    })?;
    Ok(estimate_for(params_billion, precision).vram_gb)
}
