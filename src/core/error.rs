use thiserror::Error;

pub type TranspackResult<T> = Result<T, TranspackError>;

#[derive(Error, Debug)]
pub enum TranspackError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("WalkDir error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("'{tool}' is not available on PATH")]
    ToolUnavailable { tool: String },

    #[error("External tool error: {0}")]
    ToolFailure(String),
}

impl TranspackError {
    /// True for the one failure the pipeline recovers from by substituting
    /// the fallback tool. Every other kind aborts the run.
    pub fn is_tool_unavailable(&self) -> bool {
        matches!(self, TranspackError::ToolUnavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_unavailable_is_recoverable() {
        let err = TranspackError::ToolUnavailable {
            tool: "webpack".to_string(),
        };
        assert!(err.is_tool_unavailable());
    }

    #[test]
    fn test_other_kinds_are_not_recoverable() {
        assert!(!TranspackError::ToolFailure("exit 2".to_string()).is_tool_unavailable());
        assert!(!TranspackError::Validation("empty".to_string()).is_tool_unavailable());
        let io = TranspackError::Io(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert!(!io.is_tool_unavailable());
    }
}
