use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use camt_statement_rs::{ConverterBuilder, DescriptionPolicy, OutputFormat};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "camt-statement",
    version,
    about = "Convert camt.052 account reports (XML or zip) into one CSV or ODS table on stdout"
)]
struct Cli {
    /// camt.052 XML documents or zip archives containing them
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Which unstructured remittance lines end up in the description column
    #[arg(short, long, value_enum, default_value_t = DescriptionPolicy::Joined)]
    description: DescriptionPolicy,

    /// Raise log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();

    let mut stdout = io::stdout().lock();
    let result = ConverterBuilder::new()
        .files(&cli.files)
        .format(cli.format)
        .description(cli.description)
        .convert(&mut stdout);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
