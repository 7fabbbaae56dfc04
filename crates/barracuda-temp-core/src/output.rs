//! Monitoring plugin output: status text plus exit code.

use crate::aggregate::AggregateResult;
use crate::{Error, Severity};

/// Text for stdout and the matching process exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginOutput {
    pub text: String,
    pub exit_code: i32,
}

impl PluginOutput {
    /// Renders an aggregated check result.
    pub fn render(result: &AggregateResult, perfdata: bool) -> Self {
        let mut text = format!("{}{}", result.summary_line, result.extended_block);
        if perfdata && !result.perfdata_string.is_empty() {
            text.push_str(" | ");
            text.push_str(&result.perfdata_string);
        }
        Self {
            text,
            exit_code: result.severity.exit_code(),
        }
    }

    /// UNKNOWN with a free-form message.
    pub fn unknown(message: impl std::fmt::Display) -> Self {
        Self {
            text: format!("{} - {}", Severity::Unknown, message),
            exit_code: Severity::Unknown.exit_code(),
        }
    }

    /// Pre-flight failure when no hostname was given.
    pub fn missing_target(program: &str) -> Self {
        Self::unknown(format!(
            "{}\nType ./{} --help for all options.",
            Error::MissingTarget,
            program
        ))
    }

    /// Maps a failed run to UNKNOWN.
    pub fn from_error(err: &Error, program: &str) -> Self {
        match err {
            Error::MissingTarget => Self::missing_target(program),
            other => Self::unknown(other),
        }
    }
}
