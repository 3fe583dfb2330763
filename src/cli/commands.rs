//! Command implementations for the itinerary processor CLI
//!
//! This module contains the command execution logic, progress reporting,
//! and error handling for the CLI interface.

use crate::app::services::document_processor::DocumentProcessor;
use crate::cli::args::{Args, BatchArgs, Commands, ParseArgs};
use crate::{Error, Result};
use colored::Colorize;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

/// Batch processing statistics for reporting
#[derive(Debug, Clone, Default)]
pub struct BatchStats {
    /// Number of documents processed successfully
    pub documents_processed: usize,
    /// Number of documents that produced a failure response
    pub documents_failed: usize,
    /// Total flight records extracted across all documents
    pub flights_extracted: usize,
    /// Total processing time
    pub processing_time: std::time::Duration,
}

/// Main command dispatcher for the itinerary processor
pub fn run(args: Args) -> Result<()> {
    match args.command {
        Commands::Parse(parse_args) => run_parse(parse_args),
        Commands::Batch(batch_args) => run_batch(batch_args).map(|_| ()),
    }
}

/// Parse command runner: one document in, one JSON response out
pub fn run_parse(args: ParseArgs) -> Result<()> {
    setup_logging(args.get_log_level(), args.quiet);

    info!("Starting itinerary processor");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let policy = args.policy.to_policy()?;

    let body = std::fs::read(&args.input).map_err(|e| {
        Error::io(
            format!("Failed to read input file '{}'", args.input.display()),
            e,
        )
    })?;

    let processor = DocumentProcessor::new(policy);
    let response = processor.process_document(&body, &args.content_type);

    if !response.success {
        warn!(
            "Document produced a failure response: {}",
            response.error.as_deref().unwrap_or("unknown error")
        );
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &json).map_err(|e| {
                Error::io(
                    format!("Failed to write response to '{}'", path.display()),
                    e,
                )
            })?;
            info!("Response written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// Batch command runner: walk a directory, one JSON response per document
pub fn run_batch(args: BatchArgs) -> Result<BatchStats> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level(), args.quiet);

    info!("Starting itinerary processor batch run");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let policy = args.policy.to_policy()?;

    std::fs::create_dir_all(&args.output_dir).map_err(|e| {
        Error::io(
            format!(
                "Failed to create output directory '{}'",
                args.output_dir.display()
            ),
            e,
        )
    })?;

    let inputs = discover_documents(&args.input_dir);
    info!(
        "Found {} documents in {}",
        inputs.len(),
        args.input_dir.display()
    );

    let progress_bar = if args.show_progress() {
        let pb = ProgressBar::new(inputs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message("Processing documents...");
        Some(pb)
    } else {
        None
    };

    let processor = DocumentProcessor::new(policy);
    let mut stats = BatchStats::default();

    for (i, input) in inputs.iter().enumerate() {
        if let Some(pb) = &progress_bar {
            pb.set_position(i as u64);
            pb.set_message(format!("{}", input.display()));
        }

        match process_one(&processor, input, &args.output_dir) {
            Ok(outcome) => {
                if outcome.success {
                    stats.documents_processed += 1;
                    stats.flights_extracted += outcome.flights;
                } else {
                    stats.documents_failed += 1;
                }
            }
            Err(e) => {
                error!("Failed to process {}: {}", input.display(), e);
                stats.documents_failed += 1;
            }
        }
    }

    if let Some(pb) = &progress_bar {
        pb.finish_with_message("Batch complete");
    }

    stats.processing_time = start_time.elapsed();

    if !args.quiet {
        print_summary(&stats, &args);
    }

    Ok(stats)
}

/// Outcome of a single batch document, for summary bookkeeping
struct DocumentOutcome {
    success: bool,
    flights: usize,
}

/// Process a single document and write its JSON response next to the others
fn process_one(
    processor: &DocumentProcessor,
    input: &Path,
    output_dir: &Path,
) -> Result<DocumentOutcome> {
    let body = std::fs::read(input)
        .map_err(|e| Error::io(format!("Failed to read '{}'", input.display()), e))?;

    // Batch inputs carry no declared content type; rely on byte sniffing.
    let response = processor.process_document(&body, "");

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    let output_path = output_dir.join(format!("{}.json", stem));

    let json = serde_json::to_string(&response)?;
    std::fs::write(&output_path, &json)
        .map_err(|e| Error::io(format!("Failed to write '{}'", output_path.display()), e))?;

    debug!(
        "Wrote {} ({} flights, success={})",
        output_path.display(),
        response.total,
        response.success
    );

    Ok(DocumentOutcome {
        success: response.success,
        flights: response.total,
    })
}

/// Recursively discover document files under a directory
fn discover_documents(input_dir: &Path) -> Vec<std::path::PathBuf> {
    let mut inputs: Vec<_> = WalkDir::new(input_dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect();
    inputs.sort();
    inputs
}

/// Set up structured logging based on CLI arguments
fn setup_logging(log_level: &str, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("itinerary_processor={}", log_level)));

    // try_init: tests may install a subscriber more than once
    if quiet {
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init();
    } else {
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init();
    }

    debug!("Logging initialized at level: {}", log_level);
}

/// Print the colored batch summary
fn print_summary(stats: &BatchStats, args: &BatchArgs) {
    let duration = HumanDuration(stats.processing_time);

    println!();
    println!("{}", "Batch processing complete".bold());
    println!(
        "   {} {}",
        "Documents processed:".green(),
        stats.documents_processed
    );
    if stats.documents_failed > 0 {
        println!(
            "   {} {}",
            "Documents failed:".red(),
            stats.documents_failed
        );
    }
    println!(
        "   {} {}",
        "Flights extracted:".cyan(),
        stats.flights_extracted
    );
    println!("   Processing time: {}", duration);
    println!("   Output directory: {}", args.output_dir.display());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::{AlignmentArg, PolicyArgs};
    use tempfile::TempDir;

    fn policy_args() -> PolicyArgs {
        PolicyArgs {
            alignment: AlignmentArg::Right,
            lookahead: 2,
            widened_codes: false,
            min_time_digits: 1,
        }
    }

    #[test]
    fn test_run_parse_writes_output_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("doc.txt");
        std::fs::write(
            &input,
            "A 12 MEX 1030 JFK 1530 1 2 3 4 5 6 7 010126 150226\n",
        )
        .unwrap();
        let output = temp_dir.path().join("doc.json");

        let args = ParseArgs {
            input,
            content_type: String::new(),
            output: Some(output.clone()),
            pretty: false,
            policy: policy_args(),
            verbose: 0,
            quiet: true,
        };

        run_parse(args).unwrap();

        let json = std::fs::read_to_string(&output).unwrap();
        let response: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(response["success"], true);
        assert_eq!(response["total"], 1);
        assert_eq!(response["flights"][0]["vuelo"], "12");
    }

    #[test]
    fn test_run_parse_missing_input_is_an_error() {
        let temp_dir = TempDir::new().unwrap();

        let args = ParseArgs {
            input: temp_dir.path().join("missing.txt"),
            content_type: String::new(),
            output: None,
            pretty: false,
            policy: policy_args(),
            verbose: 0,
            quiet: true,
        };

        assert!(run_parse(args).is_err());
    }

    #[test]
    fn test_run_batch_processes_directory() {
        let temp_dir = TempDir::new().unwrap();
        let input_dir = temp_dir.path().join("input");
        std::fs::create_dir_all(&input_dir).unwrap();
        std::fs::write(
            input_dir.join("one.txt"),
            "A 12 MEX 1030 JFK 1530 1 2 3 4 5 6 7 010126 150226\n",
        )
        .unwrap();
        std::fs::write(
            input_dir.join("two.txt"),
            "C 407 GDL 615 TIJ 745 3 3 3 120126 280226\n",
        )
        .unwrap();

        let args = BatchArgs {
            input_dir,
            output_dir: temp_dir.path().join("output"),
            policy: policy_args(),
            verbose: 0,
            quiet: true,
        };

        let stats = run_batch(args).unwrap();
        assert_eq!(stats.documents_processed, 2);
        assert_eq!(stats.documents_failed, 0);
        assert_eq!(stats.flights_extracted, 2);
        assert!(temp_dir.path().join("output").join("one.json").exists());
        assert!(temp_dir.path().join("output").join("two.json").exists());
    }

    #[test]
    fn test_run_batch_counts_failures() {
        let temp_dir = TempDir::new().unwrap();
        let input_dir = temp_dir.path().join("input");
        std::fs::create_dir_all(&input_dir).unwrap();
        // Truncated gzip stream fails at the dispatch boundary
        std::fs::write(input_dir.join("broken.bin"), [0x1f, 0x8b, 0xff, 0xff]).unwrap();

        let args = BatchArgs {
            input_dir,
            output_dir: temp_dir.path().join("output"),
            policy: policy_args(),
            verbose: 0,
            quiet: true,
        };

        let stats = run_batch(args).unwrap();
        assert_eq!(stats.documents_processed, 0);
        assert_eq!(stats.documents_failed, 1);
        // Failure responses still get written out
        assert!(temp_dir.path().join("output").join("broken.json").exists());
    }

    #[test]
    fn test_discover_documents_sorted_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp_dir.path().join("b.txt"), "b").unwrap();
        std::fs::write(temp_dir.path().join("a.txt"), "a").unwrap();
        std::fs::write(nested.join("c.txt"), "c").unwrap();

        let inputs = discover_documents(temp_dir.path());
        assert_eq!(inputs.len(), 3);
        assert!(inputs[0].ends_with("a.txt"));
        assert!(inputs[1].ends_with("b.txt"));
        assert!(inputs[2].ends_with("nested/c.txt"));
    }
}
