use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::GpumeError;

/// Storage format for model weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Precision {
    FP32,
    FP16,
    FP8,
    INT8,
    FP4,
    INT4,
}

impl Precision {
    /// Every supported precision, in menu order.
    pub const ALL: [Precision; 6] = [
        Precision::FP32,
        Precision::FP16,
        Precision::FP8,
        Precision::INT8,
        Precision::FP4,
        Precision::INT4,
    ];

    pub fn bytes_per_param(self) -> f64 {
        match self {
            Precision::FP32 => 4.0,
            Precision::FP16 => 2.0,
            Precision::FP8 | Precision::INT8 => 1.0,
            Precision::FP4 | Precision::INT4 => 0.5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Precision::FP32 => "FP32",
            Precision::FP16 => "FP16",
            Precision::FP8 => "FP8",
            Precision::INT8 => "INT8",
            Precision::FP4 => "FP4",
            Precision::INT4 => "INT4",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Precision::FP32 => "32-bit Floating Point",
            Precision::FP16 => "16-bit Floating Point",
            Precision::FP8 => "8-bit Floating Point",
            Precision::INT8 => "8-bit Integer",
            Precision::FP4 => "4-bit Floating Point",
            Precision::INT4 => "4-bit Integer",
        }
    }

    /// "4 bytes", "1 byte", "0.5 byte": the per-parameter cost as the menu prints it.
    pub fn cost_phrase(self) -> String {
        let b = self.bytes_per_param();
        if b > 1.0 {
            format!("{b} bytes")
        } else {
            format!("{b} byte")
        }
    }

    /// Upper-case the input before matching, the way console answers are read.
    pub fn parse_loose(s: &str) -> Result<Self, GpumeError> {
        s.to_uppercase().parse()
    }
}

impl FromStr for Precision {
    type Err = GpumeError;

    /// Exact, case-sensitive match against the table labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Precision::ALL
            .into_iter()
            .find(|p| p.label() == s)
            .ok_or_else(|| GpumeError::InvalidPrecision(s.to_string()))
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Comma-separated labels in table order, e.g. for error messages and prompts.
pub fn supported_labels() -> String {
    Precision::ALL
        .iter()
        .map(|p| p.label())
        .collect::<Vec<_>>()
        .join(", ")
}
