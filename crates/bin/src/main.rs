//! Tenure CLI binary.
//!
//! Drives the full attrition pipeline: fetch the spreadsheets, train
//! the warm-start forest across all cutoff months and write the
//! prediction file.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::process;
use tenure::{PipelineConfig, config};
use tenure_data::{SheetClient, normalize_dates};
use tenure_features::{FeatureMatrix, aggregate_employees, global_max_month, split_by_ids};
use tenure_model::WarmStartTrainer;
use tenure_output::{ExportFormat, PredictionExport};

#[derive(Parser)]
#[command(name = "tenure")]
#[command(about = "Tenure: employee attrition prediction", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the data, train across all cutoff months and write predictions
    Run {
        /// Path of the prediction output file
        #[arg(long, default_value = config::OUTPUT_PATH)]
        output: PathBuf,

        /// Seed for the stratified holdout split
        #[arg(long, default_value_t = config::SPLIT_SEED)]
        seed: u64,

        /// Cutoff months skipped before training starts
        #[arg(long, default_value_t = config::WARMUP_MONTHS)]
        warmup: usize,

        /// Print the holdout evaluation of every cutoff, not just the last
        #[arg(long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            output,
            seed,
            warmup,
            verbose,
        } => {
            let config = PipelineConfig {
                split_seed: seed,
                warmup_months: warmup,
                ..PipelineConfig::default()
            };
            run_pipeline(&output, config, verbose).await
        }
    }
}

async fn run_pipeline(
    output: &Path,
    config: PipelineConfig,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = SheetClient::new();

    print!("Fetching training records...");
    std::io::Write::flush(&mut std::io::stdout())?;
    let mut raw = client.fetch_records(config::TRAIN_SHEET_ID).await?;
    println!(" ✓ ({} rows)", raw.height());

    print!("Fetching test employee IDs...");
    std::io::Write::flush(&mut std::io::stdout())?;
    let test_ids = client.fetch_test_ids(config::TEST_SHEET_ID).await?;
    println!(" ✓ ({} employees)", test_ids.len());

    normalize_dates(&mut raw)?;
    let reference = global_max_month(&raw)?;
    let (train, test) = split_by_ids(&raw, &test_ids)?;
    println!(
        "Training rows: {}, test rows: {}, latest month: {}\n",
        train.height(),
        test.height(),
        reference
    );

    let cutoffs = WarmStartTrainer::training_cutoffs(&train, config.warmup_months)?;
    let mut trainer = WarmStartTrainer::new(config, reference);

    let pb = ProgressBar::new(cutoffs.len() as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
        .progress_chars("█▓░");
    pb.set_style(style);

    let mut last_report = None;
    for &cutoff in &cutoffs {
        pb.set_message(format!("Training through {}", cutoff));
        let report = trainer.step(&train, cutoff)?;
        if verbose {
            pb.suspend(|| println!("{}\n", report));
        }
        last_report = Some(report);
        pb.inc(1);
    }
    pb.finish_with_message(format!(
        "Trained {} trees over {} cutoffs",
        trainer.forest().n_trees(),
        cutoffs.len()
    ));

    if !verbose && let Some(report) = last_report {
        println!("\nFinal holdout evaluation:\n{}", report);
    }

    print!("\nScoring test employees...");
    std::io::Write::flush(&mut std::io::stdout())?;
    let features = aggregate_employees(&test, reference)?;
    let matrix = FeatureMatrix::from_frame(&features)?;
    let forest = trainer.into_forest();
    let predictions = forest.predict(&matrix.x)?;
    println!(" ✓ ({} employees)", matrix.len());

    let export = PredictionExport::from_labels(&matrix.ids, &predictions.to_vec())?;
    export.export_to_file(output, ExportFormat::Csv)?;

    println!("Wrote {} predictions to {}", export.len(), output.display());
    println!("{}", export.distribution());

    Ok(())
}
