//! honey-style - process themed CSS from the command line

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use honey_style::{ProcessOptions, StyleConfig, Theme, process_css, resolve_class_name};

#[derive(Parser)]
#[command(name = "honey-style")]
#[command(version, about = "Themable CSS processor", long_about = None)]
#[command(after_help = "EXAMPLES:
    honey-style process button.css --theme theme.json --scope
    echo 'padding: 2;' | honey-style process --selector .btn
    honey-style hash button.css")]
struct Cli {
    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Expand custom at-rules and spacing values, print the resulting CSS
    Process {
        /// CSS file (reads stdin when omitted)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Theme JSON file
        #[arg(short, long, value_name = "THEME")]
        theme: Option<PathBuf>,

        /// Wrap the input in this selector
        #[arg(short, long, conflicts_with = "scope")]
        selector: Option<String>,

        /// Wrap the input in its generated class name
        #[arg(long)]
        scope: bool,
    },
    /// Print the class name generated for the CSS text
    Hash {
        /// CSS file (reads stdin when omitted)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Process {
            input,
            theme,
            selector,
            scope,
        } => process(input.as_deref(), theme.as_deref(), selector, scope),
        Command::Hash { input } => hash(input.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(path: Option<&Path>) -> Result<String, String> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| e.to_string())?;
            Ok(buf)
        }
    }
}

fn process(
    input: Option<&Path>,
    theme: Option<&Path>,
    selector: Option<String>,
    scope: bool,
) -> Result<(), String> {
    let raw = read_input(input)?;
    let theme = theme
        .map(Theme::load)
        .transpose()
        .map_err(|e| e.to_string())?;

    let selector = if scope {
        Some(format!(".{}", resolve_class_name(&raw)))
    } else {
        selector
    };

    let options = ProcessOptions::new(theme.as_ref()).with_config(StyleConfig::from_env());
    println!("{}", process_css(&raw, selector.as_deref(), &options));
    Ok(())
}

fn hash(input: Option<&Path>) -> Result<(), String> {
    let raw = read_input(input)?;
    println!("{}", resolve_class_name(&raw));
    Ok(())
}
