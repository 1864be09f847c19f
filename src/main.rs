use clap::Parser;
use complaint_triage::utils::truncate_for_display;
use complaint_triage::{PipelineConfig, Predictor, TriageDecision, TriageThreshold};
use log::error;
use std::io::{self, BufRead};
use std::path::PathBuf;

const INPUT_COLUMN_WIDTH: usize = 60;
const MAX_DISPLAYED_INPUT_CHARS: usize = 57;

#[derive(Parser)]
#[command(name = "complaint-triage")]
#[command(about = "Classify complaints and show where each one would be routed", long_about = None)]
struct Cli {
    /// Directory holding vectorizer.bin and classifier.bin
    #[arg(short, long, env = "COMPLAINT_MODEL_DIR", default_value = "model")]
    model_dir: PathBuf,

    /// Pipeline configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides the configured triage threshold
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Complaint to classify; may be repeated. Reads one complaint per line from stdin when
    /// omitted.
    #[arg(long)]
    text: Vec<String>,
}

fn main() {
    // Initialize the logger
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PipelineConfig::from_toml_file(path),
        None => Ok(PipelineConfig::default()),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let predictor = match Predictor::load(&cli.model_dir, &config) {
        Ok(predictor) => predictor,
        Err(e) => {
            error!("Failed to load model from {:?}: {}", cli.model_dir, e);
            std::process::exit(1);
        }
    };

    let predictor = match cli.threshold.map(TriageThreshold::new).transpose() {
        Ok(Some(threshold)) => predictor.with_threshold(threshold),
        Ok(None) => predictor,
        Err(e) => {
            error!("Invalid threshold: {}", e);
            std::process::exit(1);
        }
    };

    let complaints = if cli.text.is_empty() {
        match io::stdin().lock().lines().collect::<Result<Vec<String>, _>>() {
            Ok(lines) => lines
                .into_iter()
                .filter(|line| !line.trim().is_empty())
                .collect(),
            Err(e) => {
                error!("Failed to read from stdin: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        cli.text
    };

    println!(
        "{:<width$} | {:<20} | {:<10} | ROUTING",
        "INPUT TEXT",
        "PREDICTION",
        "CONFIDENCE",
        width = INPUT_COLUMN_WIDTH
    );
    println!("{}", "-".repeat(110));

    for complaint in &complaints {
        let decision = predictor.classify(complaint);
        print_row(complaint, &decision);
    }

    println!();
    println!(
        "Triage threshold: {:.2}. Complaints below it are routed to manual triage.",
        predictor.threshold().value()
    );
}

fn print_row(complaint: &str, decision: &TriageDecision) {
    println!(
        "{:<width$} | {:<20} | {:<10} | {}",
        truncate_for_display(complaint, MAX_DISPLAYED_INPUT_CHARS),
        decision.predicted_label,
        format!("{:.2}%", decision.confidence * 100.0),
        decision.routed_to,
        width = INPUT_COLUMN_WIDTH
    );
}
