use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use resyze::{BatchProcessor, Cli, FileOutcome, ProcessingStats};
use std::path::Path;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .parse_default_env()
        .init();

    let config = cli.into_config();
    let input = config.input_root.clone();
    let is_directory = input.is_dir();

    let progress = if is_directory {
        Some(create_spinner())
    } else {
        None
    };

    let reporter_progress = progress.clone();
    let processor = BatchProcessor::new(config)
        .context("Invalid configuration")?
        .with_reporter(move |outcome| report(reporter_progress.as_ref(), outcome));

    let stats = processor
        .run()
        .with_context(|| format!("Failed to resize {}", input.display()))?;

    if let Some(progress) = progress {
        progress.finish_and_clear();
        print_summary(&input, &stats);
    }

    Ok(())
}

fn create_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} images {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

fn report(progress: Option<&ProgressBar>, outcome: &FileOutcome) {
    match progress {
        Some(pb) => {
            pb.suspend(|| println!("{}", outcome));
            pb.inc(1);
        }
        None => println!("{}", outcome),
    }
}

fn print_summary(input: &Path, stats: &ProcessingStats) {
    println!(
        "Batch processing complete. Resized {} of {} images from {} ({} failed)",
        stats.processed_count(),
        stats.attempted_count(),
        input.display(),
        stats.failed_count()
    );
}
