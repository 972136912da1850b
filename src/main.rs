use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::net::SocketAddr;
use tracing::{error, info};

use snooker_odds::config::{Command, Config};
use snooker_odds::dashboard::{self, AppState};
use snooker_odds::evaluation;
use snooker_odds::input::EvaluationRequest;
use snooker_odds::model::ModelParams;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    config.validate()?;

    let params = config.model_params()?;
    match &config.model_config {
        Some(path) => info!("Model parameters loaded from {}", path.display()),
        None => info!("Using built-in model parameters"),
    }

    match config.command {
        Command::Evaluate { input, json } => run_evaluate(&input, json, &params),
        Command::Serve { addr } => serve(&addr, params).await,
    }
}

fn run_evaluate(input: &str, json: bool, params: &ModelParams) -> Result<()> {
    let raw = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read request from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))?
    };
    let request: EvaluationRequest =
        serde_json::from_str(&raw).context("Failed to parse evaluation request")?;

    let eval = match evaluation::evaluate(&request, params) {
        Ok(eval) => eval,
        Err(e) => {
            error!("{}", e);
            anyhow::bail!("{}", e.hint());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&eval)?);
    } else {
        println!("{}", eval);
    }
    Ok(())
}

async fn serve(addr: &str, params: ModelParams) -> Result<()> {
    let app = dashboard::router(AppState { params });
    let addr: SocketAddr = addr.parse()?;
    info!("Dashboard listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
