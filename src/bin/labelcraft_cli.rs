//! LabelCraft CLI - Bridge interface for the web app
//!
//! Commands: aggregate, render, compose, search, resolve
//! Outputs JSON to stdout, logs to stderr
//! Returns non-zero on failure, 2 on validation failure

use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use labelcraft_core::{
    resolve_lookup, BusinessInfo, EngineConfig, EngineError, IngredientPreset, Label,
    LabelEngine, LabelRequest,
};

#[derive(Parser)]
#[command(name = "labelcraft-cli")]
#[command(about = "LabelCraft CLI - Label Content Formatting Engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to engine config JSON
    #[arg(short, long, env = "LABELCRAFT_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate selected presets and free-text ingredients
    Aggregate {
        /// JSON array of presets (the library)
        #[arg(short, long)]
        presets: String,

        /// JSON array of selected preset ids, in selection order
        #[arg(short, long, default_value = "[]")]
        selected: String,

        /// Comma-separated additional ingredients
        #[arg(short, long, default_value = "")]
        additional: String,
    },

    /// Render a label into storage, rich and plain text
    Render {
        /// JSON payload (Label)
        #[arg(short, long)]
        payload: String,
    },

    /// Build, validate and render a label from user input
    Compose {
        /// JSON payload (LabelRequest)
        #[arg(short, long)]
        payload: String,

        /// JSON array of presets (the library)
        #[arg(long, default_value = "[]")]
        presets: String,

        /// JSON business info
        #[arg(short, long, default_value = "{}")]
        business: String,
    },

    /// Filter presets by name, brand or ingredient
    Search {
        /// JSON array of presets
        #[arg(short, long)]
        presets: String,

        /// Search query, blank matches all
        #[arg(short, long, default_value = "")]
        query: String,
    },

    /// Classify an id as a store key or a legacy id
    Resolve {
        #[arg(short, long)]
        id: String,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse<T: DeserializeOwned>(what: &str, raw: &str) -> Result<T, ExitCode> {
    serde_json::from_str(raw).map_err(|e| {
        tracing::warn!(input = what, error = %e, "invalid payload");
        fail(format!("Invalid {}: {}", what, e), ExitCode::FAILURE)
    })
}

fn emit<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => fail(e.to_string(), ExitCode::FAILURE),
    }
}

fn fail(message: String, code: ExitCode) -> ExitCode {
    println!("{}", serde_json::json!({ "success": false, "error": message }));
    code
}

fn run(cli: Cli) -> Result<ExitCode, ExitCode> {
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .map_err(|e| fail(format!("Failed to load config: {}", e), ExitCode::FAILURE))?,
        None => EngineConfig::default(),
    };
    let engine = LabelEngine::new(config);

    let code = match cli.command {
        Commands::Aggregate { presets, selected, additional } => {
            let library: Vec<IngredientPreset> = parse("presets", &presets)?;
            let selected: Vec<String> = parse("selected", &selected)?;
            match engine.aggregate_selection(&library, &selected, &additional) {
                Ok(agg) => emit(&agg),
                Err(e) => fail(e.to_string(), ExitCode::FAILURE),
            }
        }

        Commands::Render { payload } => {
            let label: Label = parse("payload", &payload)?;
            match engine.render(&label) {
                Ok((rendered, fingerprint)) => emit(&serde_json::json!({
                    "storageText": rendered.storage_text,
                    "richMarkup": rendered.rich_markup,
                    "plainText": rendered.plain_text,
                    "fingerprint": fingerprint,
                })),
                Err(e) => fail(e.to_string(), ExitCode::FAILURE),
            }
        }

        Commands::Compose { payload, presets, business } => {
            let request: LabelRequest = parse("payload", &payload)?;
            let library: Vec<IngredientPreset> = parse("presets", &presets)?;
            let business: BusinessInfo = parse("business", &business)?;
            match engine.compose(&request, &library, &business) {
                Ok(composed) => emit(&serde_json::json!({ "success": true, "label": composed })),
                Err(e @ EngineError::ValidationFailed(_)) => fail(e.to_string(), ExitCode::from(2)),
                Err(e) => fail(e.to_string(), ExitCode::FAILURE),
            }
        }

        Commands::Search { presets, query } => {
            let library: Vec<IngredientPreset> = parse("presets", &presets)?;
            emit(&engine.search(&library, &query))
        }

        Commands::Resolve { id } => emit(&resolve_lookup(&id)),
    };

    Ok(code)
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    run(cli).unwrap_or_else(|code| code)
}
