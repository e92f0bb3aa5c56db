//! Encore CLI - batch artist streaming reports

use anyhow::{Context, Result};
use clap::Parser;
use encore_report::{run, ArtistOutcome, ReportConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "encore")]
#[command(
    author,
    version,
    about = "Render per-artist streaming reports from a statistics workbook"
)]
struct Cli {
    /// Output directory for the generated PDFs
    #[arg(default_value = ReportConfig::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ReportConfig::new(ReportConfig::DEFAULT_INPUT, cli.output_dir);
    let summary = run(&config).with_context(|| {
        format!(
            "Failed to generate reports from '{}'",
            config.input.display()
        )
    })?;

    for outcome in &summary.outcomes {
        match outcome {
            ArtistOutcome::Written { path, pages, .. } => {
                println!("OK  {} ({} pages)", path.display(), pages);
            }
            ArtistOutcome::Skipped { artist, missing } => {
                let missing: Vec<&str> = missing.iter().map(|k| k.token()).collect();
                eprintln!(
                    "SKIP  {}: missing {} sheet(s)",
                    artist,
                    missing.join(", ")
                );
            }
            ArtistOutcome::Failed { artist, message } => {
                eprintln!("WARN  {}: {}", artist, message);
            }
        }
    }

    println!(
        "Done: {} written, {} skipped, {} failed.",
        summary.written(),
        summary.skipped(),
        summary.failed()
    );

    Ok(())
}
