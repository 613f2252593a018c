use clap::{CommandFactory, Parser};
use transpack::core::{format_error_with_help, TranspackError};
use transpack::options::{Options, DEFAULT_OUTPUT_DIRECTORY};
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "transpack")]
#[command(about = "Transpile and minify JavaScript by driving webpack")]
#[command(disable_version_flag = true)]
struct Cli {
    /// Show package version
    #[arg(short = 'v', long = "version")]
    version: bool,

    /// Include sourcemap(s) in the transformed output
    #[arg(short = 'm', long = "map")]
    map: bool,

    /// Directory the transformed files are written to
    #[arg(
        short = 'o',
        long = "outputDirectory",
        value_name = "PATH",
        default_value = DEFAULT_OUTPUT_DIRECTORY
    )]
    output_directory: String,

    /// Parent directory of the files to transform (prompted for when omitted)
    #[arg(
        short = 'e',
        long = "entryDirectory",
        value_name = "PATH",
        default_value = ""
    )]
    entry_directory: String,

    /// Transform each file into its own output artifact
    #[arg(short = 'i', long = "individual")]
    individual: bool,
}

/// Arguments actioned before any option parsing happens.
enum ImmediateAction {
    Usage,
    Version,
}

fn immediate_action(args: &[String]) -> Option<ImmediateAction> {
    match args.get(1).map(String::as_str) {
        None => Some(ImmediateAction::Usage),
        Some("help") => Some(ImmediateAction::Usage),
        Some("version") => Some(ImmediateAction::Version),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> Result<(), TranspackError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let result = run_cli(args).await;

    // Display error with helpful suggestions
    if let Err(ref e) = result {
        eprintln!("\n{}", format_error_with_help(e));
    }

    result
}

async fn run_cli(args: Vec<String>) -> Result<(), TranspackError> {
    if let Some(action) = immediate_action(&args) {
        match action {
            ImmediateAction::Usage => {
                Cli::command().print_help()?;
                println!();
            }
            ImmediateAction::Version => println!("{}", env!("CARGO_PKG_VERSION")),
        }
        return Ok(());
    }

    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(err) => {
            return match err.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    // clap already rendered the requested output
                    err.print()?;
                    Ok(())
                }
                _ => Err(TranspackError::InvalidArgument(err.to_string())),
            };
        }
    };

    if cli.version {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let options = Options {
        entry_directory: cli.entry_directory,
        output_directory: cli.output_directory,
        // Presence flags resolve to "explicitly on"; absence means the
        // interactive completion asks.
        individual: cli.individual.then_some(true),
        map: cli.map.then_some(true),
    };

    cli::run(options).await
}
