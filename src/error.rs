use thiserror::Error;

/// Errors raised by the hierarchy and its trace/config front ends.
///
/// Every variant is a permanent stop condition; nothing here is retried.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid {level} configuration: {reason}")]
    Configuration { level: String, reason: String },

    #[error("malformed access at trace line {line} ({text:?}): {reason}")]
    MalformedAccess {
        line: usize,
        text: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SimError {
    pub fn config(level: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            level: level.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed(line: usize, text: &str, reason: impl Into<String>) -> Self {
        Self::MalformedAccess {
            line,
            text: text.to_string(),
            reason: reason.into(),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    pub fn is_malformed_access(&self) -> bool {
        matches!(self, Self::MalformedAccess { .. })
    }
}

pub type SimResult<T> = Result<T, SimError>;
