use crate::precision::supported_labels;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GpumeError {
    #[error("Invalid precision '{0}'. Supported precisions are: {labels}", labels = supported_labels())]
    InvalidPrecision(String),

    #[error("could not convert string to float: {}", quote_input(.0))]
    InvalidNumber(String),

    #[error("EOF when reading a line")]
    NoInput,
}

pub type Result<T> = std::result::Result<T, GpumeError>;

/// Quote user input for messages: single quotes, or double quotes when the
/// input holds a `'` but no `"`.
fn quote_input(s: &str) -> String {
    if s.contains('\'') && !s.contains('"') {
        format!("\"{s}\"")
    } else {
        format!("'{}'", s.replace('\'', "\\'"))
    }
}
