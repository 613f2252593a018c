use crate::core::{TranspackError, TranspackResult};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::Path;
use tokio::process::Command;

/// External transform tool, invoked as `<program> [leading args] --config <path>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
    /// Program name, looked up on PATH.
    pub program: &'static str,
    /// Arguments inserted before `--config`.
    pub leading_args: &'static [&'static str],
}

impl Tool {
    pub fn display_name(&self) -> String {
        if self.leading_args.is_empty() {
            self.program.to_string()
        } else {
            format!("{} {}", self.program, self.leading_args.join(" "))
        }
    }
}

/// Primary bundler: a globally installed webpack.
pub const WEBPACK: Tool = Tool {
    program: "webpack",
    leading_args: &[],
};

/// Package-manager fallback used when webpack is not installed globally.
pub const NPX_WEBPACK: Tool = Tool {
    program: "npx",
    leading_args: &["webpack"],
};

/// Runs external transform tools. The trait seam keeps the pipeline's
/// fallback routing testable without spawning real processes.
#[async_trait]
pub trait ToolRunner {
    async fn run(&self, tool: &Tool, config_path: &Path) -> TranspackResult<()>;
}

/// Invokes the real executables, inheriting stdio so webpack's own output
/// reaches the terminal.
pub struct ProcessToolRunner;

#[async_trait]
impl ToolRunner for ProcessToolRunner {
    async fn run(&self, tool: &Tool, config_path: &Path) -> TranspackResult<()> {
        // A missing binary is the one recoverable failure: the pipeline
        // substitutes the fallback tool instead of aborting.
        if which::which(tool.program).is_err() {
            return Err(TranspackError::ToolUnavailable {
                tool: tool.program.to_string(),
            });
        }

        tracing::debug!(
            tool = %tool.display_name(),
            config = %config_path.display(),
            "invoking external tool"
        );

        let status = Command::new(tool.program)
            .args(tool.leading_args)
            .arg("--config")
            .arg(config_path)
            .status()
            .await
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    // Lookup/spawn race: the binary vanished after the
                    // which() check.
                    TranspackError::ToolUnavailable {
                        tool: tool.program.to_string(),
                    }
                } else {
                    TranspackError::Io(e)
                }
            })?;

        if !status.success() {
            return Err(TranspackError::ToolFailure(format!(
                "{} exited with {}",
                tool.display_name(),
                status
            )));
        }

        Ok(())
    }
}
