use transpack::bundler::ProcessToolRunner;
use transpack::core::TranspackResult;
use transpack::options::{self, Options, TerminalPrompter};
use transpack::pipeline::Pipeline;

/// Run the transform command: complete the options interactively, then
/// drive the standard pipeline against the real tools.
pub async fn run(initial: Options) -> TranspackResult<()> {
    let mut prompter = TerminalPrompter;
    let resolved = options::complete(initial, &mut prompter)?;
    tracing::debug!(?resolved, "options resolved");

    println!("Initiating transpile and minify run");

    Pipeline::transform(resolved, ProcessToolRunner)?.run().await?;

    println!("\n✓ File(s) successfully transformed");
    Ok(())
}
