use anyhow::Context;
use cardio_risk_api::core::batch::score_csv;
use cardio_risk_api::utils::{logger, validation};
use cardio_risk_api::{ModelLoader, PredictionService};
use clap::Parser;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "score-csv")]
#[command(about = "Score a CSV of patient records with the cardio risk model")]
struct Args {
    /// CSV file with a header naming the 12 patient columns
    #[arg(short, long)]
    input: String,

    /// Where to write the scored CSV
    #[arg(short, long, default_value = "scored.csv")]
    output: String,

    /// Path to the serialized model artifact
    #[arg(short, long, default_value = "cardio_ensemble_model.json")]
    model_path: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_logger(args.verbose, false, None);

    validation::validate_file_extensions("input", &[args.input.as_str()], &["csv"])?;
    validation::validate_path("output", &args.output)?;

    tracing::info!("🚀 Scoring {} with model {}", args.input, args.model_path);

    let pipeline = ModelLoader::load(&args.model_path)?;
    let service = PredictionService::new(Arc::new(pipeline));

    let input = File::open(&args.input)
        .with_context(|| format!("cannot open input file '{}'", args.input))?;
    let output = File::create(&args.output)
        .with_context(|| format!("cannot create output file '{}'", args.output))?;

    let summary = score_csv(&service, BufReader::new(input), BufWriter::new(output))
        .with_context(|| format!("failed to score '{}'", args.input))?;

    tracing::info!(
        "✅ Scored {} records, {} at risk",
        summary.scored,
        summary.at_risk
    );
    println!("📁 Output saved to: {}", args.output);

    Ok(())
}
