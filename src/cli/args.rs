//! Command-line argument definitions for the itinerary processor
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::config::{DayAlignment, ParserPolicy};
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the itinerary processor
///
/// Converts semi-structured airline itinerary documents (zipped plaintext,
/// compressed payloads or raw text) into normalized flight-record JSON.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "itinerary-processor",
    version,
    about = "Convert airline itinerary documents into normalized flight-record JSON",
    long_about = "Parses semi-structured airline itinerary documents into a normalized list of \
                  flight records. Accepts plain text, gzip/zlib/deflate compressed payloads and \
                  ZIP archives of page text, extracts document metadata (issue code and validity \
                  window) and emits one JSON response per document."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for the itinerary processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse a single itinerary document and emit its JSON response
    Parse(ParseArgs),
    /// Parse every document in a directory tree
    Batch(BatchArgs),
}

/// Arguments for the parse command (single document)
#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    /// Input document (plain text, gzip, zlib, deflate or ZIP)
    #[arg(value_name = "FILE", help = "Input itinerary document")]
    pub input: PathBuf,

    /// Declared content type of the payload
    ///
    /// Only needed for formats without magic bytes: `application/json` for
    /// `{"text": ...}` payloads and `application/zlib`/`application/deflate`
    /// for headerless raw deflate. Everything else is sniffed from the bytes.
    #[arg(
        long = "content-type",
        value_name = "TYPE",
        default_value = "",
        help = "Declared content type of the payload"
    )]
    pub content_type: String,

    /// Output file for the JSON response
    ///
    /// If not specified, the response is written to stdout.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Output file for the JSON response"
    )]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON response
    #[arg(long = "pretty", help = "Pretty-print the JSON response")]
    pub pretty: bool,

    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors and critical messages. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the batch command (directory of documents)
#[derive(Debug, Clone, Parser)]
pub struct BatchArgs {
    /// Input directory to walk for itinerary documents
    #[arg(value_name = "DIR", help = "Input directory of itinerary documents")]
    pub input_dir: PathBuf,

    /// Output directory for the JSON responses
    ///
    /// Will be created if it doesn't exist. One `<name>.json` response is
    /// written per input document.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        default_value = "./output",
        help = "Output directory for JSON responses"
    )]
    pub output_dir: PathBuf,

    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress progress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Parser policy knobs shared by both subcommands
#[derive(Debug, Clone, Parser)]
pub struct PolicyArgs {
    /// Alignment for partial day-code lists
    #[arg(
        long = "alignment",
        value_enum,
        default_value = "right",
        help = "Alignment for partial day-code lists"
    )]
    pub alignment: AlignmentArg,

    /// Boundary lookahead threshold
    ///
    /// Contiguous frequency tokens required after a candidate code before
    /// committing to a section boundary. 2 is conservative, 1 is loose.
    #[arg(
        long = "lookahead",
        value_name = "N",
        default_value_t = 2,
        help = "Frequency tokens required to commit a section boundary"
    )]
    pub lookahead: usize,

    /// Accept the widened equipment-code range (any 0-9 and values up to 14)
    #[arg(long = "widened-codes", help = "Accept the widened equipment-code range")]
    pub widened_codes: bool,

    /// Minimum digits for a token to classify as a clock time
    #[arg(
        long = "min-time-digits",
        value_name = "N",
        default_value_t = 1,
        help = "Minimum digits for a clock-time token (1-4)"
    )]
    pub min_time_digits: usize,
}

/// Day-code alignment options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AlignmentArg {
    /// Right-align partial lists (last code lands on Sunday)
    Right,
    /// Assign codes in encounter order starting at Monday
    Left,
}

impl PolicyArgs {
    /// Build and validate the parser policy from the CLI knobs
    pub fn to_policy(&self) -> Result<ParserPolicy> {
        let alignment = match self.alignment {
            AlignmentArg::Right => DayAlignment::RightAlign,
            AlignmentArg::Left => DayAlignment::LeftAlign,
        };

        let mut policy = ParserPolicy::new()
            .with_day_alignment(alignment)
            .with_freq_lookahead(self.lookahead)
            .with_min_time_digits(self.min_time_digits);
        if self.widened_codes {
            policy = policy.with_widened_codes();
        }

        policy.validate()?;
        Ok(policy)
    }
}

impl ParseArgs {
    /// Validate the parse command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input.exists() {
            return Err(Error::configuration(format!(
                "Input file does not exist: {}",
                self.input.display()
            )));
        }

        if !self.input.is_file() {
            return Err(Error::configuration(format!(
                "Input path is not a file: {}",
                self.input.display()
            )));
        }

        if let Some(output) = &self.output {
            if let Some(parent) = output.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(Error::configuration(format!(
                        "Output directory does not exist: {}",
                        parent.display()
                    )));
                }
            }
        }

        self.policy.to_policy().map(|_| ())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.quiet, self.verbose)
    }
}

impl BatchArgs {
    /// Validate the batch command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input_dir.exists() {
            return Err(Error::configuration(format!(
                "Input directory does not exist: {}",
                self.input_dir.display()
            )));
        }

        if !self.input_dir.is_dir() {
            return Err(Error::configuration(format!(
                "Input path is not a directory: {}",
                self.input_dir.display()
            )));
        }

        self.policy.to_policy().map(|_| ())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.quiet, self.verbose)
    }

    /// Check if we should show the progress bar (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

fn log_level(quiet: bool, verbose: u8) -> &'static str {
    if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn default_policy_args() -> PolicyArgs {
        PolicyArgs {
            alignment: AlignmentArg::Right,
            lookahead: 2,
            widened_codes: false,
            min_time_digits: 1,
        }
    }

    #[test]
    fn test_policy_from_defaults() {
        let policy = default_policy_args().to_policy().unwrap();
        assert_eq!(policy, ParserPolicy::default());
    }

    #[test]
    fn test_policy_variants() {
        let mut args = default_policy_args();
        args.alignment = AlignmentArg::Left;
        args.lookahead = 1;
        args.widened_codes = true;
        args.min_time_digits = 2;

        let policy = args.to_policy().unwrap();
        assert_eq!(policy.day_alignment, DayAlignment::LeftAlign);
        assert_eq!(policy.freq_lookahead, 1);
        assert!(policy.widened_codes);
        assert_eq!(policy.min_time_digits, 2);
    }

    #[test]
    fn test_invalid_policy_rejected() {
        let mut args = default_policy_args();
        args.lookahead = 0;
        assert!(args.to_policy().is_err());

        let mut args = default_policy_args();
        args.min_time_digits = 5;
        assert!(args.to_policy().is_err());
    }

    #[test]
    fn test_parse_args_validation() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("doc.txt");
        std::fs::write(&input, "A 12 MEX 1030 JFK 1530 1 2 3 010126\n").unwrap();

        let args = ParseArgs {
            input: input.clone(),
            content_type: String::new(),
            output: None,
            pretty: false,
            policy: default_policy_args(),
            verbose: 0,
            quiet: false,
        };
        assert!(args.validate().is_ok());

        // Nonexistent input
        let mut invalid = args.clone();
        invalid.input = temp_dir.path().join("missing.txt");
        assert!(invalid.validate().is_err());

        // Input is a directory
        let mut invalid = args.clone();
        invalid.input = temp_dir.path().to_path_buf();
        assert!(invalid.validate().is_err());

        // Output directory must exist
        let mut invalid = args.clone();
        invalid.output = Some(temp_dir.path().join("missing").join("out.json"));
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_batch_args_validation() {
        let temp_dir = TempDir::new().unwrap();

        let args = BatchArgs {
            input_dir: temp_dir.path().to_path_buf(),
            output_dir: temp_dir.path().join("output"),
            policy: default_policy_args(),
            verbose: 0,
            quiet: false,
        };
        assert!(args.validate().is_ok());

        let mut invalid = args.clone();
        invalid.input_dir = temp_dir.path().join("missing");
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("doc.txt");
        std::fs::write(&input, "").unwrap();

        let mut args = ParseArgs {
            input,
            content_type: String::new(),
            output: None,
            pretty: false,
            policy: default_policy_args(),
            verbose: 0,
            quiet: false,
        };

        assert_eq!(args.get_log_level(), "warn");
        args.verbose = 1;
        assert_eq!(args.get_log_level(), "info");
        args.verbose = 2;
        assert_eq!(args.get_log_level(), "debug");
        args.verbose = 3;
        assert_eq!(args.get_log_level(), "trace");
        args.quiet = true;
        args.verbose = 0;
        assert_eq!(args.get_log_level(), "error");
    }
}
