//! Extract command - show the fields read from a single invoice.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use tcert_core::{CertificatePipeline, ExtractedRecord};

use super::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input invoice PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Extracting fields from: {}", args.input.display());

    let data = fs::read(&args.input)?;
    let pipeline = CertificatePipeline::from_config(&config)?;
    let record = pipeline.extract(&data)?;

    let missing = record.missing_fields();
    if !missing.is_empty() {
        eprintln!("{}", style("Missing fields:").yellow());
        for field in &missing {
            eprintln!("  - {}", field);
        }
    }

    let output = format_record(&record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total extraction time: {:?}", start.elapsed());

    Ok(())
}

fn format_record(record: &ExtractedRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_csv(record: &ExtractedRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "company_name",
        "invoice_no",
        "order_no",
        "order_date",
        "product_name",
        "quantity",
        "batch_no",
        "bag_count",
    ])?;

    let header = [
        record.company_name.clone().unwrap_or_default(),
        record.invoice_no.clone().unwrap_or_default(),
        record.order_no.clone().unwrap_or_default(),
        record.order_date.clone().unwrap_or_default(),
    ];

    if record.products.is_empty() {
        wtr.write_record(header.iter().map(String::as_str).chain(["", "", "", ""]))?;
    }

    for product in &record.products {
        wtr.write_record(header.iter().map(String::as_str).chain([
            product.product_name.as_str(),
            product.quantity.as_str(),
            product.batch_no.as_str(),
            product.bag_count.as_str(),
        ]))?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &ExtractedRecord) -> String {
    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    let mut output = String::new();

    output.push_str(&format!("Company: {}\n", field(&record.company_name)));
    output.push_str(&format!("Invoice No: {}\n", field(&record.invoice_no)));
    output.push_str(&format!("Order No: {}\n", field(&record.order_no)));
    output.push_str(&format!("Order Date: {}\n", field(&record.order_date)));

    if !record.products.is_empty() {
        output.push('\n');
        output.push_str("Products:\n");
        for (i, product) in record.products.iter().enumerate() {
            output.push_str(&format!(
                "  {}. {} | {} | {} | {} bags\n",
                i + 1,
                product.product_name,
                product.quantity,
                product.batch_no,
                product.bag_count
            ));
        }
    }

    output
}
