//! Generate command - render a test report from a single invoice.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use tcert_core::CertificatePipeline;

use super::load_config;

/// Arguments for the generate command.
#[derive(Args)]
pub struct GenerateArgs {
    /// Input invoice PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Directory the report is written to (default: from config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Logo image drawn in the letterhead (default: from config)
    #[arg(short, long)]
    logo: Option<PathBuf>,

    /// Print the composed report values as JSON
    #[arg(long)]
    preview: bool,
}

pub fn run(args: GenerateArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Generating report for: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Reading invoice...");
    let data = fs::read(&args.input)?;

    let mut pipeline = CertificatePipeline::from_config(&config)?;
    if let Some(logo) = args.logo {
        pipeline = pipeline.with_logo(Some(logo));
    }

    pb.set_message("Extracting fields...");
    let record = match pipeline.extract(&data) {
        Ok(record) => record,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e.into());
        }
    };
    debug!("Extracted record: {:?}", record);

    pb.set_message("Rendering report...");
    let generated = match pipeline.generate_from_record(&record) {
        Ok(generated) => generated,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e.into());
        }
    };

    pb.finish_and_clear();

    for diagnostic in &generated.diagnostics {
        eprintln!("{} {}", style("⚠").yellow(), diagnostic);
    }

    if args.preview {
        println!("{}", serde_json::to_string_pretty(&generated.report)?);
    }

    let output_dir = args.output_dir.unwrap_or(config.report.output_dir);
    fs::create_dir_all(&output_dir)?;

    let output_path = output_dir.join(&generated.file_name);
    fs::write(&output_path, &generated.bytes)?;

    println!(
        "{} Report written to {}",
        style("✓").green(),
        output_path.display()
    );

    debug!("Total generation time: {:?}", start.elapsed());

    Ok(())
}
