use gpume_core::estimate::{estimate, estimate_for, BYTES_PER_GB};
use gpume_core::{GpumeError, Precision};

const COUNTS: &[f64] = &[0.0, 0.5, 1.0, 7.0, 13.0, 70.0, 405.0, 671.0];

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}

#[test]
fn matches_formula_for_every_precision() {
    for p in Precision::ALL {
        for &n in COUNTS {
            let got = estimate(n, p.label()).unwrap();
            let want = n * 1e9 * p.bytes_per_param() / BYTES_PER_GB;
            assert!(close(got, want), "{p} at {n}B: got {got}, want {want}");
        }
    }
}

#[test]
fn same_width_formats_cost_the_same() {
    for &n in COUNTS {
        assert_eq!(estimate(n, "INT8").unwrap(), estimate(n, "FP8").unwrap());
        assert_eq!(estimate(n, "FP4").unwrap(), estimate(n, "INT4").unwrap());
    }
}

#[test]
fn widths_scale_by_powers_of_two() {
    for &n in COUNTS {
        let fp32 = estimate(n, "FP32").unwrap();
        let fp16 = estimate(n, "FP16").unwrap();
        let fp8 = estimate(n, "FP8").unwrap();
        assert!(close(fp32, 2.0 * fp16), "{n}B: FP32 {fp32} vs 2xFP16 {fp16}");
        assert!(close(fp32, 4.0 * fp8), "{n}B: FP32 {fp32} vs 4xFP8 {fp8}");
    }
}

#[test]
fn unknown_labels_fail() {
    for bad in ["bf16", "fp16", "FP64", "", "INT 8", "Q4"] {
        match estimate(7.0, bad) {
            Err(GpumeError::InvalidPrecision(got)) => assert_eq!(got, bad),
            other => panic!("{bad:?}: expected InvalidPrecision, got {other:?}"),
        }
    }
}

#[test]
fn bf16_error_lists_supported_labels() {
    let err = estimate(7.0, "bf16").unwrap_err();
    assert!(
        err.to_string().ends_with("Supported precisions are: FP32, FP16, FP8, INT8, FP4, INT4"),
        "unexpected message: {err}"
    );
}

#[test]
fn estimate_serializes_to_json() {
    let est = estimate_for(70.0, Precision::INT4);
    let json = serde_json::to_value(&est).unwrap();
    assert_eq!(json["params_billion"], 70.0);
    assert_eq!(json["precision"], "INT4");
    assert!((json["vram_gb"].as_f64().unwrap() - 32.596).abs() < 0.001);
}
