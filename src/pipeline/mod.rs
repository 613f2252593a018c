use crate::bundler::{Tool, ToolRunner, NPX_WEBPACK, WEBPACK};
use crate::config::WebpackConfig;
use crate::core::{TranspackError, TranspackResult};
use crate::options::ResolvedOptions;
use indicatif::{ProgressBar, ProgressStyle};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Scratch state shared by the steps of one pipeline run. Discarded when
/// the run finishes.
#[derive(Debug, Default)]
pub struct PipelineContext {
    /// Path of the generated webpack configuration, set by the generate step.
    pub config_path: Option<PathBuf>,
    /// Set when the primary tool was missing and the fallback step is enabled.
    pub fallback_requested: bool,
}

impl PipelineContext {
    fn require_config_path(&self) -> TranspackResult<PathBuf> {
        self.config_path
            .clone()
            .ok_or_else(|| TranspackError::Config("No configuration file was generated".to_string()))
    }
}

/// What a step does. Ordering, skipping and fallback routing belong to the
/// runner, not the steps.
#[derive(Debug)]
pub enum StepAction {
    GenerateConfig,
    RunTool(Tool),
    RemoveConfig,
}

#[derive(Debug)]
pub struct Step {
    pub title: &'static str,
    pub action: StepAction,
    /// A failing step normally aborts the run; cleanup only warns.
    pub allow_failure: bool,
}

/// The single declared fallback relation: when step `from` fails with an
/// error matching `applies`, it is marked skipped instead of failed and the
/// step at `to` (otherwise skipped) runs in its place.
pub struct FallbackRule {
    pub from: usize,
    pub to: usize,
    pub applies: fn(&TranspackError) -> bool,
}

/// Strictly sequential task pipeline. Each step completes or is explicitly
/// skipped before the next one starts; the first unrecoverable failure
/// aborts the run and surfaces as the terminal error.
pub struct Pipeline<R: ToolRunner> {
    options: ResolvedOptions,
    runner: R,
    work_dir: PathBuf,
    steps: Vec<Step>,
    fallback: Option<FallbackRule>,
}

impl<R: ToolRunner> Pipeline<R> {
    /// The standard transform pipeline: generate the configuration, run
    /// webpack with an npx fallback, remove the temporary configuration.
    pub fn transform(options: ResolvedOptions, runner: R) -> TranspackResult<Self> {
        Ok(Self::with_work_dir(options, runner, env::current_dir()?))
    }

    /// Same pipeline rooted at an explicit working directory.
    pub fn with_work_dir(options: ResolvedOptions, runner: R, work_dir: PathBuf) -> Self {
        Self {
            options,
            runner,
            work_dir,
            steps: vec![
                Step {
                    title: "Create webpack configuration",
                    action: StepAction::GenerateConfig,
                    allow_failure: false,
                },
                Step {
                    title: "Transpile and minify file(s)",
                    action: StepAction::RunTool(WEBPACK),
                    allow_failure: false,
                },
                Step {
                    title: "Transpile and minify file(s) via npx",
                    action: StepAction::RunTool(NPX_WEBPACK),
                    allow_failure: false,
                },
                Step {
                    title: "Remove temporary config file",
                    action: StepAction::RemoveConfig,
                    allow_failure: true,
                },
            ],
            fallback: Some(FallbackRule {
                from: 1,
                to: 2,
                applies: TranspackError::is_tool_unavailable,
            }),
        }
    }

    pub async fn run(self) -> TranspackResult<()> {
        let mut ctx = PipelineContext::default();

        for (index, step) in self.steps.iter().enumerate() {
            let pb = spinner(step.title);

            if let Some(rule) = &self.fallback {
                if index == rule.to && !ctx.fallback_requested {
                    pb.finish_with_message(format!("↓ {} [not needed]", step.title));
                    continue;
                }
            }

            match self.execute(&step.action, &mut ctx).await {
                Ok(()) => pb.finish_with_message(format!("✓ {}", step.title)),
                Err(e) => {
                    if let Some(rule) = &self.fallback {
                        if index == rule.from && (rule.applies)(&e) {
                            ctx.fallback_requested = true;
                            pb.finish_with_message(format!("↓ {} [{}]", step.title, e));
                            continue;
                        }
                    }
                    if step.allow_failure {
                        tracing::warn!(step = step.title, error = %e, "step failed, continuing");
                        pb.finish_with_message(format!("⚠ {} [{}]", step.title, e));
                        continue;
                    }
                    pb.finish_with_message(format!("✗ {}", step.title));
                    return Err(e);
                }
            }
        }

        Ok(())
    }

    async fn execute(&self, action: &StepAction, ctx: &mut PipelineContext) -> TranspackResult<()> {
        match action {
            StepAction::GenerateConfig => {
                let config = WebpackConfig::synthesize(&self.options, &self.work_dir)?;
                let path = config.write(&self.work_dir).await?;
                tracing::debug!(path = %path.display(), "wrote webpack configuration");
                ctx.config_path = Some(path);
                Ok(())
            }
            StepAction::RunTool(tool) => {
                let config_path = ctx.require_config_path()?;
                self.runner.run(tool, &config_path).await
            }
            StepAction::RemoveConfig => {
                let config_path = ctx.require_config_path()?;
                tokio::fs::remove_file(&config_path).await?;
                Ok(())
            }
        }
    }
}

fn spinner(title: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(title);
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
