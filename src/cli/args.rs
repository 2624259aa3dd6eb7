//! Command line argument parsing for the tagbayes CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;

use crate::bayes::CombinerKind;

/// Tagbayes - a naive-Bayes text classifier
#[derive(Parser, Debug, Clone)]
#[command(name = "tagbayes")]
#[command(about = "Train tags on text and classify new text against them")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TagbayesArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Classifier configuration file (JSON)
    #[arg(long, value_name = "CONFIG_FILE", env = "TAGBAYES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Score combination method (overrides the configuration file)
    #[arg(long)]
    pub combiner: Option<CombinerArg>,

    /// Words left out of training and classification
    #[arg(long = "ignore", value_name = "WORD")]
    pub ignore: Vec<String>,

    /// Keep the case of words instead of lower-casing them
    #[arg(long)]
    pub no_lowercase: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TagbayesArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Log level for the effective verbosity.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity() {
            0 => LevelFilter::Error, // Quiet mode
            1 => LevelFilter::Warn,  // Default
            2 => LevelFilter::Info,  // Verbose
            _ => LevelFilter::Debug, // Very verbose (3+)
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train a tag with text
    Train(TrainArgs),

    /// Remove previously trained text from a tag
    Untrain(TrainArgs),

    /// Classify text against all tags
    Classify(ClassifyArgs),

    /// List tag identifiers
    Tags(ModelArgs),

    /// Create an empty tag
    #[command(name = "add-tag")]
    AddTag(TagArgs),

    /// Remove a tag
    #[command(name = "remove-tag")]
    RemoveTag(TagArgs),

    /// Rename a tag
    #[command(name = "rename-tag")]
    RenameTag(RenameTagArgs),

    /// Merge one tag into another
    #[command(name = "merge-tags")]
    MergeTags(MergeTagsArgs),

    /// Show the statistics of one tag
    #[command(name = "show-tag")]
    ShowTag(TagArgs),
}

/// The model file a command works on.
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Path to the model file (JSON)
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,
}

/// Text given inline or read from a file.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct TextSource {
    /// Text to process
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Read the text from a file instead
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,
}

/// Arguments for training and untraining
#[derive(Args, Debug, Clone)]
pub struct TrainArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Tag to train
    #[arg(value_name = "TAG")]
    pub tag: String,

    #[command(flatten)]
    pub source: TextSource,
}

/// Arguments for classification
#[derive(Args, Debug, Clone)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    #[command(flatten)]
    pub source: TextSource,

    /// Only show the best N tags
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for commands on a single tag
#[derive(Args, Debug, Clone)]
pub struct TagArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Tag identifier
    #[arg(value_name = "TAG")]
    pub tag: String,
}

/// Arguments for renaming a tag
#[derive(Args, Debug, Clone)]
pub struct RenameTagArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Current tag identifier
    #[arg(value_name = "OLD")]
    pub old: String,

    /// New tag identifier
    #[arg(value_name = "NEW")]
    pub new: String,
}

/// Arguments for merging tags
#[derive(Args, Debug, Clone)]
pub struct MergeTagsArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Tag merged away
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Tag receiving the counts
    #[arg(value_name = "DEST")]
    pub dest: String,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

/// Score combination methods selectable on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombinerArg {
    /// Robinson's method
    Robinson,
    /// Robinson-Fisher's method
    RobinsonFisher,
}

impl From<CombinerArg> for CombinerKind {
    fn from(arg: CombinerArg) -> Self {
        match arg {
            CombinerArg::Robinson => CombinerKind::Robinson,
            CombinerArg::RobinsonFisher => CombinerKind::RobinsonFisher,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_train() {
        let args = TagbayesArgs::try_parse_from([
            "tagbayes", "train", "model.json", "spam", "buy cheap pills",
        ])
        .unwrap();

        match args.command {
            Command::Train(train) => {
                assert_eq!(train.model.model, PathBuf::from("model.json"));
                assert_eq!(train.tag, "spam");
                assert_eq!(train.source.text.as_deref(), Some("buy cheap pills"));
                assert!(train.source.file.is_none());
            }
            _ => panic!("Expected train command"),
        }
    }

    #[test]
    fn test_parse_global_options() {
        let args = TagbayesArgs::try_parse_from([
            "tagbayes",
            "-vv",
            "--format",
            "json",
            "--combiner",
            "robinson-fisher",
            "--ignore",
            "the",
            "--ignore",
            "my",
            "classify",
            "model.json",
            "--file",
            "input.txt",
        ])
        .unwrap();

        assert_eq!(args.verbosity(), 2);
        assert_eq!(args.log_level(), LevelFilter::Info);
        assert_eq!(args.output_format, OutputFormat::Json);
        assert_eq!(args.combiner, Some(CombinerArg::RobinsonFisher));
        assert_eq!(args.ignore, vec!["the", "my"]);
        assert!(matches!(args.command, Command::Classify(_)));
    }

    #[test]
    fn test_text_source_is_exclusive() {
        let result = TagbayesArgs::try_parse_from([
            "tagbayes", "classify", "model.json", "text", "--file", "input.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_quiet_overrides_verbose() {
        let args =
            TagbayesArgs::try_parse_from(["tagbayes", "-q", "-vvv", "tags", "model.json"]).unwrap();
        assert_eq!(args.verbosity(), 0);
        assert_eq!(args.log_level(), LevelFilter::Error);
    }
}
