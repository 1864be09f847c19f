use clap::Parser;
use complaint_triage::{PipelineConfig, Trainer, TrainingRecord};
use log::{error, info};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Parser)]
#[command(name = "train-complaint-model")]
#[command(about = "Train the complaint classifier and write its artifacts", long_about = None)]
struct Cli {
    /// Training corpus with `complaint_text` and `category` columns
    #[arg(short, long)]
    data: PathBuf,

    /// Where vectorizer.bin and classifier.bin are written
    #[arg(short, long, env = "COMPLAINT_MODEL_DIR", default_value = "model")]
    model_dir: PathBuf,

    /// Pipeline configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Version string recorded in both artifacts; defaults to a timestamp
    #[arg(long)]
    model_version: Option<String>,
}

fn main() {
    // Initialize the logger
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("Training failed: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), complaint_triage::Error> {
    let config = match &cli.config {
        Some(path) => PipelineConfig::from_toml_file(path)?,
        None => PipelineConfig::default(),
    };

    let model_version = cli.model_version.unwrap_or_else(default_model_version);

    let records = TrainingRecord::read_from_path(&cli.data)?;
    info!("Read {} records from {:?}", records.len(), cli.data);

    let trainer = Trainer::new(config)?;
    let outcome = trainer.train_and_save(&records, &model_version, &cli.model_dir)?;

    println!(
        "Trained model {} on {} records ({} held out)",
        model_version, outcome.train_size, outcome.test_size
    );

    if let Some(report) = &outcome.report {
        println!("\n--- PERFORMANCE REPORT ---");
        println!("{}", report);
    }

    println!("\nArtifacts written to {}", cli.model_dir.display());

    Ok(())
}

fn default_model_version() -> String {
    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    format!("unix-{}", seconds)
}
