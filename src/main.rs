//! stage-chain CLI.
//!
//! Loads a chain configuration, assembles the chain and runs a single
//! request through it.
//!
//! ```text
//! --config chain.toml ─▶ loader ─▶ validation ─▶ assembly ─▶ HandlerChain
//! --prepend <kind>    ─────────────────────────────────────▶ new entry stage
//! --credential <str>  ─▶ RequestContext ─▶ process ─▶ journal / JSON
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use stage_chain::chain::RequestContext;
use stage_chain::config::{self, ChainConfig, StageKind};
use stage_chain::observability::logging;

#[derive(Parser)]
#[command(name = "stage-chain")]
#[command(about = "Run a request through a configured handler chain", long_about = None)]
struct Cli {
    /// Credential presented by the request.
    #[arg(short = 'u', long)]
    credential: String,

    /// TOML configuration file. Built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Splice an extra stage in front of the configured entry stage.
    #[arg(short, long)]
    prepend: Option<StageKind>,

    /// Print the final request context as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => {
            let config = ChainConfig::default();
            config::validate_config(&config).map_err(config::ConfigError::Validation)?;
            config
        }
    };

    logging::init_logging(&config.observability)?;

    tracing::info!(
        config = ?cli.config,
        stages = ?config.pipeline.stages,
        "Configuration loaded"
    );

    let mut assembled = config::assemble(&config);
    if let Some(kind) = cli.prepend {
        let stage = config::build_stage(kind, &config, &assembled.cancel);
        assembled.chain.prepend_shared(stage);
        tracing::info!(stage = %kind, "Spliced new entry stage");
    }

    let mut ctx = RequestContext::new(cli.credential);
    let result = assembled.chain.process(&mut ctx);

    if cli.json {
        let report = serde_json::json!({
            "ok": result.is_ok(),
            "error": result.as_ref().err().map(ToString::to_string),
            "context": &ctx,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for entry in ctx.journal() {
            println!("[{}] {}", entry.stage, entry.message);
        }
        if let Err(err) = &result {
            eprintln!("Error: {}", err);
        }
    }

    Ok(if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
