use crate::core::TranspackError;

/// Provides helpful suggestions for common errors
pub trait ErrorHelp {
    fn help(&self) -> Option<String>;
}

impl ErrorHelp for TranspackError {
    fn help(&self) -> Option<String> {
        match self {
            TranspackError::ToolUnavailable { .. } => Some(
                "💡 Suggestion: Install webpack with 'npm install --global webpack webpack-cli', or make sure 'npx' is on PATH"
                    .to_string(),
            ),
            TranspackError::ToolFailure(_) => Some(
                "💡 Suggestion: Check the webpack output above for the underlying compile error"
                    .to_string(),
            ),
            TranspackError::Validation(_) => Some(
                "💡 Suggestion: Choose an entry directory that exists and contains at least one file"
                    .to_string(),
            ),
            TranspackError::InvalidArgument(_) => Some(
                "💡 Suggestion: Run 'transpack help' to see the supported flags".to_string(),
            ),
            _ => None,
        }
    }
}

/// Format an error together with its suggestion, if one exists
pub fn format_error_with_help(error: &TranspackError) -> String {
    match error.help() {
        Some(help) => format!("Error: {}\n\n{}", error, help),
        None => format!("Error: {}", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_unavailable_has_suggestion() {
        let err = TranspackError::ToolUnavailable {
            tool: "webpack".to_string(),
        };
        let formatted = format_error_with_help(&err);
        assert!(formatted.contains("webpack"));
        assert!(formatted.contains("Suggestion"));
    }

    #[test]
    fn test_io_error_has_no_suggestion() {
        let err = TranspackError::Io(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        let formatted = format_error_with_help(&err);
        assert!(formatted.starts_with("Error: IO error"));
        assert!(!formatted.contains("Suggestion"));
    }
}
