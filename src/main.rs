//! News classifier: text cleaning and topic estimation from the CLI or the web

use clap::Parser;
use log::{error, info};
use news_classifier::cli::{self, Cli, Commands, ConfigAction, ResourceAction};
use news_classifier::model::pipeline::Pipeline;
use news_classifier::output::formatter::{
    ConsoleFormatter, EstimateRecord, JsonFormatter, OutputFormatter,
};
use news_classifier::processing::stopwords::{CorpusDirectory, StopwordProvider, BUNDLED_LANGUAGES};
use news_classifier::processing::text_processor::{TextPreprocessor, TextTransformer};
use news_classifier::server::{self, AppState};
use news_classifier::{Config, Result};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config) -> Result<()> {
    match command {
        Commands::Serve { host, port, model } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let pipeline = load_pipeline(&config, model)?;
            server::serve(&config.listen_addr(), AppState::new(pipeline)).await
        }

        Commands::Classify {
            text,
            model,
            json,
            no_color,
        } => {
            let pipeline = load_pipeline(&config, model)?;
            let estimates = pipeline.estimate(&text)?;

            let records: Vec<EstimateRecord> = text
                .iter()
                .zip(estimates.iter())
                .map(|(t, e)| EstimateRecord::new(t, e))
                .collect();

            let formatter: Box<dyn OutputFormatter> = if json {
                Box::new(JsonFormatter::new(true))
            } else {
                Box::new(ConsoleFormatter::new(!no_color))
            };
            print!("{}", formatter.format_estimates(&records)?);
            if json {
                println!();
            }
            Ok(())
        }

        Commands::Clean {
            text,
            no_normalize,
            keep_punctuation,
            keep_stopwords,
            language,
            json,
        } => {
            let batch = cli::collect_texts(text, json)?;
            let preprocessor = TextPreprocessor::new(
                cli::preprocessor_config(no_normalize, keep_punctuation, keep_stopwords, &language),
                stopword_provider(&config),
            );

            let cleaned = preprocessor.transform(batch.texts())?;
            if json {
                println!("{}", serde_json::to_string(&cleaned)?);
            } else {
                for line in cleaned {
                    println!("{}", line);
                }
            }
            Ok(())
        }

        Commands::Resources { action } => {
            let corpus = CorpusDirectory::new(config.stopwords_dir());
            match action {
                ResourceAction::Download { language, force } => {
                    let path = corpus.download(&language.to_lowercase(), force)?;
                    println!("Stopwords for {} stored at {}", language, path.display());
                }
                ResourceAction::Show { language } => {
                    let words = stopword_provider(&config).get(&language.to_lowercase())?;
                    let mut words: Vec<&String> = words.iter().collect();
                    words.sort();
                    println!("{} stopwords for {}:", words.len(), language);
                    for word in words {
                        println!("  {}", word);
                    }
                }
                ResourceAction::List => {
                    println!("Resource cache: {}", corpus.root().display());
                    for language in BUNDLED_LANGUAGES {
                        let status = if corpus.is_cached(language) { "cached" } else { "not downloaded" };
                        println!("  {:<10} {}", language, status);
                    }
                }
            }
            Ok(())
        }

        Commands::Config { action } => {
            match action.unwrap_or(ConfigAction::Show) {
                ConfigAction::Show => print!("{}", config.to_toml()?),
                ConfigAction::Reset => {
                    Config::default().save()?;
                    println!("Configuration reset at {}", Config::config_path().display());
                }
                ConfigAction::Path => println!("{}", Config::config_path().display()),
            }
            Ok(())
        }
    }
}

/// Stopwords served from the on-disk cache, populated on first use
fn stopword_provider(config: &Config) -> Arc<StopwordProvider> {
    Arc::new(StopwordProvider::from_directory(config.stopwords_dir()))
}

fn load_pipeline(config: &Config, model: Option<PathBuf>) -> Result<Pipeline> {
    let path = model.unwrap_or_else(|| config.model.path.clone());
    info!("Loading classifier from {}", path.display());
    Pipeline::load(&path, stopword_provider(config))
}
