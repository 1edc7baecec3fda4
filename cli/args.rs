use std::path::PathBuf;

use clap::Parser;

use crate::render::{parse_image_target, ImageTarget};

/// Train a one-hidden-layer network on a CSV digit dataset, then score a
/// second dataset with it.
///
/// Each line is `label,p1,...,pN` with pixel intensities in [0, 255].
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Dataset used for training
    #[arg(long, value_name = "PATH")]
    pub train: PathBuf,
    /// Dataset used for scoring
    #[arg(long, value_name = "PATH")]
    pub test: PathBuf,
    /// JSON config file; command-line values take precedence
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    #[arg(short, long, value_name = "INT")]
    pub epochs: Option<usize>,
    /// Maximum training records to read (0 = all)
    #[arg(long, value_name = "INT")]
    pub train_records: Option<usize>,
    /// Maximum test records to read (0 = all)
    #[arg(long, value_name = "INT")]
    pub test_records: Option<usize>,
    /// Lines to skip at the top of each file (1 skips a CSV header)
    #[arg(long, value_name = "INT")]
    pub start_offset: Option<usize>,
    #[arg(long, value_name = "INT")]
    pub hidden_size: Option<usize>,
    #[arg(long, value_name = "FLOAT")]
    pub learning_rate: Option<f64>,
    /// Minimum milliseconds between progress updates
    #[arg(long, value_name = "MS")]
    pub progress_interval_ms: Option<u64>,
    /// Print the prediction for a test record (0-based, repeatable)
    #[arg(long = "show", value_name = "INDEX")]
    pub show: Vec<usize>,
    /// Write a test record as a PNG, e.g. `--image 3:digit.png` (repeatable)
    #[arg(long = "image", value_name = "INDEX:PATH", value_parser = parse_image_target)]
    pub images: Vec<ImageTarget>,
    /// Print pass summaries and running totals as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_a_flat_invocation() {
        let cli = Cli::try_parse_from([
            "digit-net",
            "--train",
            "train.csv",
            "--test",
            "test.csv",
            "-e",
            "3",
            "--show",
            "0",
            "--show",
            "4",
            "--image",
            "2:digit.png",
        ])
        .unwrap();

        assert_eq!(cli.train, PathBuf::from("train.csv"));
        assert_eq!(cli.test, PathBuf::from("test.csv"));
        assert_eq!(cli.epochs, Some(3));
        assert_eq!(cli.show, vec![0, 4]);
        assert_eq!(cli.images.len(), 1);
        assert!(!cli.json);
    }

    #[test]
    fn rejects_a_run_subcommand() {
        assert!(Cli::try_parse_from(["digit-net", "run", "--train", "a.csv", "--test", "b.csv"]).is_err());
    }
}
