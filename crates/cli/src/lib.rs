pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "freightdesk",
    about = "Freightdesk quotation CLI",
    long_about = "Build and export freight quotation PDFs from saved quotation records.",
    after_help = "Examples:\n  freightdesk export quote.json --engine vector\n  freightdesk preview quote.json --out quote.html\n  freightdesk doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Engine {
    /// Direct PDF drawing, no external tools required
    Vector,
    /// HTML template converted with wkhtmltopdf, matches the on-screen layout
    Template,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Render a saved quotation to PDF, one file per route option if requested")]
    Export {
        #[arg(help = "Saved quotation record (JSON)")]
        input: PathBuf,
        #[arg(long, value_enum, default_value = "vector", help = "Rendering engine")]
        engine: Engine,
        #[arg(long, help = "Output directory (defaults to export.output_dir from config)")]
        out: Option<PathBuf>,
        #[arg(long, help = "Export every route option as a separate -OPT<n> file")]
        all_options: bool,
    },
    #[command(about = "Emit the template engine's HTML without converting it to PDF")]
    Preview {
        #[arg(help = "Saved quotation record (JSON)")]
        input: PathBuf,
        #[arg(long, help = "Write HTML here instead of stdout")]
        out: Option<PathBuf>,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config, converter availability, and export directory readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Export { input, engine, out, all_options } => {
            commands::export::run(&input, engine, out, all_options)
        }
        Command::Preview { input, out } => commands::preview::run(&input, out),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
