//! cardiorisk: Heart-disease risk assessment CLI.
//!
//! Thin shell around the assessment pipeline: reads one flat JSON patient
//! record, prints the structured result as JSON. The model artifact is
//! loaded once at startup; a load failure aborts the process.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cardiorisk::adapters::redact::RedactingMakeWriter;
use cardiorisk::adapters::RandomForest;
use cardiorisk::application::AssessmentService;
use cardiorisk::domain::Assessment;
use cardiorisk::PatientInput;

#[derive(Parser, Debug)]
#[command(
    name = "cardiorisk",
    about = "Estimate heart-disease risk from a clinical record",
    version
)]
struct Cli {
    /// Directory (or file) containing the exported model artifact
    #[arg(long, default_value = "models")]
    model: PathBuf,

    /// Patient record as flat JSON; reads stdin when omitted
    #[arg(long)]
    input: Option<PathBuf>,

    /// Pretty-print the result
    #[arg(long)]
    pretty: bool,
}

/// Result shape consumed by the presentation layer.
#[derive(Debug, Serialize)]
struct AssessmentView<'a> {
    id: &'a str,
    predicted_class: u8,
    probability_positive: f64,
    tier: &'static str,
    message: &'static str,
    recommendations: &'static str,
    emergency: bool,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl<'a> From<&'a Assessment> for AssessmentView<'a> {
    fn from(assessment: &'a Assessment) -> Self {
        Self {
            id: &assessment.id,
            predicted_class: assessment.prediction.predicted_class,
            probability_positive: assessment.prediction.probability_positive,
            tier: assessment.tier.label(),
            message: assessment.message(),
            recommendations: assessment.recommendations(),
            emergency: assessment.tier.is_emergency(),
            created_at: assessment.created_at,
        }
    }
}

fn read_input(cli: &Cli) -> Result<String> {
    match &cli.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(RedactingMakeWriter::new(writer)))
        .init();

    tracing::info!("Starting cardiorisk...");

    let forest = RandomForest::load(&cli.model).context("failed to load model artifact")?;
    let service = AssessmentService::new(Arc::new(forest));

    let raw = read_input(&cli)?;
    let input: PatientInput =
        serde_json::from_str(&raw).context("input is not a valid patient record")?;

    let assessment = match service.assess(&input) {
        Ok(assessment) => assessment,
        Err(e) if e.is_input_error() => {
            eprintln!("Invalid input: {e}");
            eprintln!("Fix the listed fields and try again.");
            std::process::exit(2);
        }
        Err(e) => {
            eprintln!("Internal prediction error: {e}");
            eprintln!("This is not a problem with the supplied record.");
            std::process::exit(1);
        }
    };

    let view = AssessmentView::from(&assessment);
    let json = if cli.pretty {
        serde_json::to_string_pretty(&view)?
    } else {
        serde_json::to_string(&view)?
    };
    println!("{json}");

    Ok(())
}
