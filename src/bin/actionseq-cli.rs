//! actionseq CLI - inspect and run action-backed filter descriptors
//!
//! Runs descriptors against the in-memory engine, fed from a JSON catalog.

use actionseq::config::{self, ExtractorConfig};
use actionseq::engine::memory::{MEMORY_ENGINE, MemoryCatalog, MemoryEngine};
use actionseq::engine::{EngineRegistry, LogLevel, ParameterProviders, SimpleParameterProvider};
use actionseq::filter::{ActionFilterSource, FilterDefinition, Selection};
use actionseq::session::Session;
use actionseq::util::xml::XmlNode;
use actionseq::ActionDescriptor;
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "actionseq")]
#[command(about = "Run action-sequence backed filter descriptors", long_about = None)]
struct Cli {
    /// Extractor configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the descriptor and resolved action path of a filter file
    Describe {
        /// Filter XML file
        file: PathBuf,
    },

    /// Execute a filter's action against a JSON catalog
    Run {
        /// Filter XML file
        file: PathBuf,

        /// Memory engine catalog (JSON)
        #[arg(long)]
        catalog: PathBuf,

        /// Request parameter, as name=value (repeatable)
        #[arg(long = "param")]
        params: Vec<String>,

        /// Session user name
        #[arg(long, default_value = "cli")]
        user: String,

        /// Engine logging level override
        #[arg(long)]
        logging_level: Option<String>,
    },

    /// Write a default configuration file
    InitConfig {
        /// Destination path
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Describe { file } => {
            let node = read_node(&file)?;
            let descriptor = ActionDescriptor::from_node(&node);

            println!("{}", serde_json::to_string_pretty(&descriptor)?);
            println!("Action path: {}", descriptor.action_path());
            match &descriptor.output {
                Some(output) => println!("Output: {}", output),
                None => println!("Output: first result-set"),
            }
        }

        Commands::Run {
            file,
            catalog,
            params,
            user,
            logging_level,
        } => {
            let mut extractor_config = match &cli.config {
                Some(path) => config::load_config(path)?,
                None => ExtractorConfig::default(),
            };
            if let Some(level) = logging_level {
                extractor_config.logging_level = parse_level(&level)?;
            }

            let catalog = Arc::new(MemoryCatalog::load(&catalog)?);
            let registry = EngineRegistry::new();
            registry.register(MEMORY_ENGINE, move |_session| {
                Ok(Box::new(MemoryEngine::new(catalog.clone())))
            });

            let mut request = SimpleParameterProvider::new();
            for param in &params {
                let (name, value) = param
                    .split_once('=')
                    .with_context(|| format!("Parameter '{}' is not name=value", param))?;
                request.set(name, value);
            }
            let mut providers = ParameterProviders::new();
            providers.insert("request", Box::new(request));

            let node = read_node(&file)?;
            let source = ActionFilterSource::new(
                &node,
                Session::new(user),
                Arc::new(registry),
                extractor_config,
            );

            match source.extract_detailed(&providers)? {
                Selection::Found { output, results } => {
                    println!("Result set from output '{}':", output);
                    println!("{}", serde_json::to_string_pretty(&results)?);

                    let mut filter = FilterDefinition::from_node(&node, Box::new(results));
                    filter.populate(&providers)?;
                    if let Ok(choices) = filter.choices() {
                        println!("Choices for '{}':", filter.name());
                        for choice in choices {
                            println!("  {} => {}", choice.value, choice.display);
                        }
                    }
                }
                Selection::EmptyValue(output) => {
                    println!("Output '{}' holds no result set", output);
                }
                Selection::MissingOutput(output) => {
                    println!("Output '{}' was not produced", output);
                }
                Selection::NoResultSet => println!("No result set"),
            }
        }

        Commands::InitConfig { path } => {
            config::write_config(&path, &ExtractorConfig::default())?;
            println!("Wrote default configuration to {:?}", path);
        }
    }

    Ok(())
}

fn read_node(path: &Path) -> Result<XmlNode> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {:?}", path))?;
    XmlNode::parse(&source).with_context(|| format!("Failed to parse {:?}", path))
}

fn parse_level(level: &str) -> Result<LogLevel> {
    Ok(match level.to_ascii_lowercase().as_str() {
        "trace" => LogLevel::Trace,
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        "warn" => LogLevel::Warn,
        "error" => LogLevel::Error,
        other => bail!("Unknown logging level '{}'", other),
    })
}
