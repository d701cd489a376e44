//! Training binary for the spam classifier.
//!
//! Loads a labeled CSV, fits the vectorizer and classifier, persists both
//! artifacts under a shared run ID, prints a held-out evaluation summary,
//! and exits with code 1 on any failure.
//!
//! Usage:
//!   cargo run --bin spamsift-trainer -- --data data/messages.csv
//!   cargo run --bin spamsift-trainer -- --data data/messages.csv --seed 7 --test-ratio 0.3

use clap::Parser;
use spamsift_core::TrainConfig;
use spamsift_model::{train_and_persist, TrainingReport};
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "spamsift-trainer", about = "Spam classifier training runner")]
struct Cli {
    /// Input CSV with Message/Category columns.
    #[arg(long)]
    data: PathBuf,

    /// Directory the two artifact files are written into.
    #[arg(long, default_value = "models")]
    output_dir: PathBuf,

    /// Fraction of rows held out for evaluation.
    #[arg(long, default_value_t = 0.2)]
    test_ratio: f64,

    /// Seed for the train/test split shuffle.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Laplace smoothing strength for the classifier.
    #[arg(long, default_value_t = 1.0)]
    alpha: f64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = TrainConfig::new(cli.data)
        .with_output_dir(cli.output_dir)
        .with_test_ratio(cli.test_ratio)
        .with_seed(cli.seed)
        .with_alpha(cli.alpha);

    match train_and_persist(&config) {
        Ok(report) => print_report(&report),
        Err(e) => {
            error!("training failed: {e}");
            std::process::exit(1);
        }
    }
}

fn print_report(report: &TrainingReport) {
    println!("\n{}", "=".repeat(60));
    println!("  Training Summary");
    println!("{}", "=".repeat(60));
    println!("  Run ID:      {}", report.run_id);
    println!(
        "  Rows:        {} ({} train / {} held out)",
        report.n_rows, report.n_train, report.n_test
    );
    println!("  Vocabulary:  {} tokens", report.vocabulary_size);
    println!("  Vectorizer:  {}", report.vectorizer_path.display());
    println!("  Classifier:  {}", report.classifier_path.display());
    match &report.metrics {
        Some(m) => {
            println!("  Accuracy:    {:.2}", m.accuracy);
            println!("  Metrics:     {m}");
        }
        None => println!("  Evaluation:  skipped (empty test split)"),
    }
    println!("{}", "=".repeat(60));
}
