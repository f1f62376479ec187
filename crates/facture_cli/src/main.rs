use std::error::Error;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use facture_fixtures::fixtures::{self, Generator};
use facture_fixtures::Variant;
use log::debug;

/// Generates French invoice PDF fixtures from the command line.
///
/// The flow layout needs a TrueType font family for its metrics; set `FACTURE_FONTS_DIR` when
/// Liberation Sans is not installed system-wide. Logging is controlled through `RUST_LOG`.
#[derive(Parser)]
#[command(author, version, about = "Invoice PDF fixture generator")]
struct Cli {
    /// Directory the PDF files are written to.
    #[arg(long, global = true, default_value = ".")]
    output_dir: PathBuf,

    /// Issue date (YYYY-MM-DD). Defaults to today; the due date follows 30 days later.
    #[arg(long, global = true, value_parser = parse_date)]
    issue_date: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the flow layout to `facture_clean_invoicecomply.pdf`.
    #[command(name = "clean", aliases = ["flow"])]
    Clean,

    /// Render the cell grid to `facture_test_invoicecomply.pdf`.
    #[command(name = "test", aliases = ["cells"])]
    Test,

    /// Render every variant into the output directory.
    #[command(name = "all", aliases = ["run-all", "run_all"])]
    All,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| format!("expected YYYY-MM-DD, got '{value}': {err}"))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let generator = Generator::new()
        .with_output_dir(cli.output_dir)
        .with_issue_date(cli.issue_date);
    debug!("Output directory: {}", generator.output_dir().display());

    let result = match cli.command {
        Commands::Clean => generator.run(Variant::Flow).map(|_| ()),
        Commands::Test => generator.run(Variant::Cells).map(|_| ()),
        Commands::All => fixtures::run_all_variants(&generator).map(|_| ()),
    };

    if let Err(err) = result {
        eprintln!("Erreur: {}", err);
        print_error_sources(&err);
        std::process::exit(1);
    }
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
