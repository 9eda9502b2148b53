use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use order_taxes::application::engine::TaxationEngine;
use order_taxes::domain::order::Zone;
use order_taxes::domain::rounding::RoundingPolicy;
use order_taxes::infrastructure::in_memory::InMemoryTaxRateStore;
use order_taxes::interfaces::csv::adjustment_writer::AdjustmentWriter;
use order_taxes::interfaces::csv::order_reader::OrderReader;
use order_taxes::interfaces::csv::rate_reader::TaxRateReader;
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input order lines CSV file
    orders: PathBuf,

    /// Tax rates CSV file
    #[arg(long)]
    rates: PathBuf,

    /// Zone used for orders that do not carry one
    #[arg(long)]
    default_zone: Option<String>,

    /// How calculated tax is rounded to minor currency units
    #[arg(long, default_value = "half-up")]
    rounding: RoundingPolicy,

    /// Output format for the tax adjustments
    #[arg(long, value_enum, default_value = "csv")]
    format: Format,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();

    let engine = TaxationEngine::new(Box::new(InMemoryTaxRateStore::new()))
        .with_rounding(cli.rounding)
        .with_default_zone(cli.default_zone.map(Zone::new));

    // Load rates
    let file = File::open(cli.rates).into_diagnostic()?;
    for rate_result in TaxRateReader::new(file).rates() {
        match rate_result {
            Ok(rate) => engine.register_rate(rate).await.into_diagnostic()?,
            Err(e) => warn!("Error reading tax rate: {}", e),
        }
    }

    let stdout = io::stdout();
    let mut writer = match cli.format {
        Format::Csv => AdjustmentWriter::csv(stdout.lock()),
        Format::Json => AdjustmentWriter::json_lines(stdout.lock()),
    };

    // Tax orders
    let file = File::open(cli.orders).into_diagnostic()?;
    for order_result in OrderReader::new(file).orders() {
        match order_result {
            Ok(mut order) => {
                if let Err(e) = engine.process_order(&mut order).await {
                    warn!(order = order.id, "Error processing order: {}", e);
                    continue;
                }
                writer.write_order(&order).into_diagnostic()?;
            }
            Err(e) => warn!("Error reading order line: {}", e),
        }
    }

    writer.flush().into_diagnostic()?;
    Ok(())
}
