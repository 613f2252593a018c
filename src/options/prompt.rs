use crate::core::{TranspackError, TranspackResult};
use crate::options::{Options, ResolvedOptions};
use dialoguer::{Confirm, Input};
use std::fs;
use std::path::Path;

/// Interactive prompt surface.
///
/// The terminal implementation renders with dialoguer; tests use a scripted
/// implementation so completion logic runs without a TTY.
pub trait Prompter {
    /// Ask for the entry directory until the answer names a directory with
    /// at least one entry.
    fn entry_directory(&mut self, message: &str) -> TranspackResult<String>;

    /// Yes/no question.
    fn confirm(&mut self, message: &str, default: bool) -> TranspackResult<bool>;
}

/// Prompter backed by the real terminal.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn entry_directory(&mut self, message: &str) -> TranspackResult<String> {
        Input::new()
            .with_prompt(message)
            .validate_with(|input: &String| -> Result<(), String> {
                validate_entry_directory(input).map_err(|e| e.to_string())
            })
            .interact_text()
            .map_err(|e| TranspackError::Prompt(format!("Failed to read input: {}", e)))
    }

    fn confirm(&mut self, message: &str, default: bool) -> TranspackResult<bool> {
        Confirm::new()
            .with_prompt(message)
            .default(default)
            .interact()
            .map_err(|e| TranspackError::Prompt(format!("Failed to read input: {}", e)))
    }
}

/// Re-promptable check that `path` names a directory with at least one
/// entry. Never aborts the run; the prompt shows the message and asks again.
pub fn validate_entry_directory(path: &str) -> TranspackResult<()> {
    let dir = Path::new(path);
    if !dir.is_dir() {
        return Err(TranspackError::Validation(format!(
            "'{}' is not a directory",
            path
        )));
    }

    let mut entries = fs::read_dir(dir)
        .map_err(|e| TranspackError::Validation(format!("Cannot read '{}': {}", path, e)))?;
    if entries.next().is_none() {
        return Err(TranspackError::Validation(
            "Please select a directory with at least 1 file".to_string(),
        ));
    }

    Ok(())
}

/// Fill in whatever the command line left unset.
///
/// Side-effect-free fast path: when nothing is missing the input comes back
/// unchanged without a single prompt. A flag-supplied entry directory is
/// not validated here; a bad path fails the directory walk later.
pub fn complete<P: Prompter>(options: Options, prompter: &mut P) -> TranspackResult<ResolvedOptions> {
    if let (false, Some(individual), Some(map)) = (
        options.entry_directory.is_empty(),
        options.individual,
        options.map,
    ) {
        return Ok(ResolvedOptions {
            entry_directory: options.entry_directory,
            output_directory: options.output_directory,
            individual,
            map,
        });
    }

    println!("Collecting missing required information");

    let entry_directory = if options.entry_directory.is_empty() {
        prompter.entry_directory("Relative path to the entry point directory")?
    } else {
        options.entry_directory
    };

    let individual = match options.individual {
        Some(value) => value,
        None => prompter.confirm("Transform each file separately?", true)?,
    };

    let map = match options.map {
        Some(value) => value,
        None => prompter.confirm("Include sourcemap(s)?", true)?,
    };

    Ok(ResolvedOptions {
        entry_directory,
        output_directory: options.output_directory,
        individual,
        map,
    })
}
