//! CLI interface for the news classifier

use crate::error::Result;
use crate::processing::batch::TextBatch;
use crate::processing::text_processor::PreprocessorConfig;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "news-classifier")]
#[command(about = "Classify news text into Business, Entertainment, Politics, Sport or Tech")]
#[command(long_about = "Clean free text with a configurable normalization pipeline and estimate its news category with a pre-trained classifier, from the command line or a small web front-end")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web front-end
    Serve {
        /// Host to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Pipeline artifact to load (overrides config)
        #[arg(short, long)]
        model: Option<PathBuf>,
    },

    /// Estimate the category of one or more texts
    Classify {
        /// Texts to classify
        #[arg(required = true)]
        text: Vec<String>,

        /// Pipeline artifact to load (overrides config)
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Run only the text-cleaning step
    Clean {
        /// Texts to clean; read from stdin (one per line) when omitted
        text: Vec<String>,

        /// Skip NFKD normalization
        #[arg(long)]
        no_normalize: bool,

        /// Keep punctuation
        #[arg(long)]
        keep_punctuation: bool,

        /// Keep stopwords (and original casing)
        #[arg(long)]
        keep_stopwords: bool,

        /// Stopword language
        #[arg(short, long, default_value = "english")]
        language: String,

        /// Read a JSON list of strings from stdin and print a JSON list
        #[arg(long)]
        json: bool,
    },

    /// Language resource management
    Resources {
        #[command(subcommand)]
        action: ResourceAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ResourceAction {
    /// Store a language's stopword list in the resource cache
    Download {
        /// Language name, e.g. "english"
        language: String,

        /// Overwrite an existing list
        #[arg(short, long)]
        force: bool,
    },

    /// Print the stopwords known for a language
    Show {
        /// Language name
        language: String,
    },

    /// List languages and whether they are cached on disk
    List,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Preprocessor settings from `clean` flags
pub fn preprocessor_config(
    no_normalize: bool,
    keep_punctuation: bool,
    keep_stopwords: bool,
    language: &str,
) -> PreprocessorConfig {
    PreprocessorConfig {
        normalize: !no_normalize,
        remove_punctuation: !keep_punctuation,
        remove_stopwords: !keep_stopwords,
        language: language.to_lowercase(),
    }
}

/// Texts from arguments, or from stdin when there are none
pub fn collect_texts(args: Vec<String>, json: bool) -> Result<TextBatch> {
    if !args.is_empty() && !json {
        return Ok(TextBatch::new(args));
    }

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    parse_stdin(&input, json)
}

/// Stdin is either a JSON list of strings or one text per non-empty line
pub fn parse_stdin(input: &str, json: bool) -> Result<TextBatch> {
    if json {
        TextBatch::from_json_str(input)
    } else {
        Ok(TextBatch::new(
            input
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string)
                .collect(),
        ))
    }
}
