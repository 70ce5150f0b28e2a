//! One-shot console session: print the precision menu, ask for a parameter
//! count and a precision, then report the estimate or the error.

use std::io::{self, BufRead, Write};

use crate::error::{GpumeError, Result};
use crate::estimate::{estimate_for, Estimate};
use crate::precision::Precision;

pub const MENU_HEADER: &str = "Supported precisions and their memory requirements per parameter:";
pub const PARAMS_PROMPT: &str = "Enter the number of parameters in the LLM (in billions): ";
pub const PRECISION_PROMPT: &str = "Enter the precision (FP32, FP16, FP8, INT8, FP4, INT4): ";

/// Where a session is. `Done` and `Failed` are terminal.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    AwaitingInput,
    Done(Estimate),
    Failed(GpumeError),
}

/// Menu lines, header first, precisions in table order.
pub fn menu_lines() -> Vec<String> {
    let mut lines = vec![MENU_HEADER.to_string()];
    for (i, p) in Precision::ALL.iter().enumerate() {
        lines.push(format!(
            "{}. {} ({}): {} per parameter",
            i + 1,
            p.label(),
            p.description(),
            p.cost_phrase()
        ));
    }
    lines
}

/// Parse a parameter count the way a user types it: surrounding whitespace is
/// ignored and `_` may separate digits (`1_000`).
pub fn parse_param_count(raw: &str) -> Result<f64> {
    let invalid = || GpumeError::InvalidNumber(raw.to_string());
    let trimmed = raw.trim();

    let chars: Vec<char> = trimmed.chars().collect();
    let grouped_ok = chars.iter().enumerate().all(|(i, &c)| {
        c != '_'
            || (i > 0
                && chars[i - 1].is_ascii_digit()
                && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit()))
    });
    if !grouped_ok {
        return Err(invalid());
    }

    let digits: String = chars.into_iter().filter(|&c| c != '_').collect();
    digits.parse::<f64>().map_err(|_| invalid())
}

pub struct Session<R, W> {
    input: R,
    output: W,
    state: SessionState,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            state: SessionState::AwaitingInput,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn into_state(self) -> SessionState {
        self.state
    }

    /// Process exactly one request. Validation failures are written as
    /// `Error: ...` and leave the session `Failed`; only console I/O errors
    /// are returned. Calling `run` again on a finished session is a no-op.
    pub fn run(&mut self) -> io::Result<&SessionState> {
        if self.state != SessionState::AwaitingInput {
            return Ok(&self.state);
        }

        for line in menu_lines() {
            writeln!(self.output, "{line}")?;
        }

        self.state = match self.collect()? {
            Ok(est) => {
                writeln!(self.output, "\n{}", est.summary())?;
                SessionState::Done(est)
            }
            Err(e) => {
                tracing::debug!(error = %e, "session failed");
                writeln!(self.output, "Error: {e}")?;
                SessionState::Failed(e)
            }
        };
        self.output.flush()?;
        Ok(&self.state)
    }

    fn collect(&mut self) -> io::Result<Result<Estimate>> {
        let Some(raw_count) = self.ask(PARAMS_PROMPT)? else {
            return Ok(Err(GpumeError::NoInput));
        };
        let params_billion = match parse_param_count(&raw_count) {
            Ok(n) => n,
            Err(e) => return Ok(Err(e)),
        };

        let Some(raw_precision) = self.ask(PRECISION_PROMPT)? else {
            return Ok(Err(GpumeError::NoInput));
        };
        Ok(Precision::parse_loose(&raw_precision).map(|p| estimate_for(params_billion, p)))
    }

    /// Write a prompt and read one answer. `None` at end of input.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_has_seven_lines() {
        let lines = menu_lines();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[1], "1. FP32 (32-bit Floating Point): 4 bytes per parameter");
        assert_eq!(lines[4], "4. INT8 (8-bit Integer): 1 byte per parameter");
        assert_eq!(lines[6], "6. INT4 (4-bit Integer): 0.5 byte per parameter");
    }

    #[test]
    fn parse_plain_and_scientific() {
        assert_eq!(parse_param_count("7").unwrap(), 7.0);
        assert_eq!(parse_param_count(" 6.7 ").unwrap(), 6.7);
        assert_eq!(parse_param_count("1e2").unwrap(), 100.0);
        assert_eq!(parse_param_count("-3").unwrap(), -3.0);
    }

    #[test]
    fn parse_digit_groups() {
        assert_eq!(parse_param_count("1_000").unwrap(), 1000.0);
        assert!(parse_param_count("_1").is_err());
        assert!(parse_param_count("1_").is_err());
        assert!(parse_param_count("1__0").is_err());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(
            parse_param_count("abc").unwrap_err(),
            GpumeError::InvalidNumber("abc".into())
        );
        assert!(parse_param_count("").is_err());
        assert!(parse_param_count("7B").is_err());
    }
}
