use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::{load_settings, load_settings_from_path, Settings},
    DetectApi, DetectController, HistoryOutcome, HttpDetectApi, ImageUpload, InferOutcome,
};
use shared::domain::ModelOption;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod console;

use console::ConsoleSurface;

#[derive(Parser, Debug)]
#[command(about = "Object-detection demo client")]
struct Args {
    /// Backend base URL; overrides detect.toml and the environment.
    #[arg(long, global = true)]
    server_url: Option<String>,
    /// Settings file to use instead of ./detect.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the backend answers /health.
    Health,
    /// List the models offered by the backend.
    Models,
    /// Upload an image and print the rendered result panel.
    Infer {
        #[arg(long)]
        image: Option<PathBuf>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Reveal the history panel and print it.
    History {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

type Controller = DetectController<Arc<HttpDetectApi>, ConsoleSurface>;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let settings = resolve_settings(&args)?;
    let base_url = settings.base_url()?;
    info!(server_url = %base_url, "detect_cli: starting session");

    let api = Arc::new(HttpDetectApi::new(base_url));
    let controller = DetectController::new(api.clone(), ConsoleSurface, settings.view_settings()?);

    match args.command {
        Command::Health => {
            let health = api.health().await.context("health check failed")?;
            if !health.is_ok() {
                bail!("backend reported status '{}'", health.status);
            }
            println!("{}", health.status);
            Ok(())
        }
        Command::Models => {
            controller
                .load_models()
                .await
                .context("failed to load model list")?;
            let state = controller.snapshot().await;
            print_options(&state.model_options, state.selected_model.as_deref());
            Ok(())
        }
        Command::Infer { image, model, out } => run_infer(&controller, image, model, out).await,
        Command::History { out } => run_history(&controller, out).await,
    }
}

fn resolve_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => load_settings_from_path(path)?,
        None => load_settings(),
    };
    if let Some(server_url) = &args.server_url {
        settings.server_url = server_url.clone();
    }
    Ok(settings)
}

fn print_options(options: &[ModelOption], selected: Option<&str>) {
    for option in options {
        let marker = if Some(option.value.as_str()) == selected {
            "*"
        } else {
            " "
        };
        println!("{marker} {}", option.label);
    }
}

async fn run_infer(
    controller: &Controller,
    image: Option<PathBuf>,
    model: Option<String>,
    out: Option<PathBuf>,
) -> Result<()> {
    if let Err(err) = controller.load_models().await {
        warn!("detect_cli: continuing without model list: {err}");
    }
    if let Some(model) = model {
        controller.select_model(&model).await?;
    }

    let upload = match image {
        Some(path) => Some(ImageUpload::from_path(&path).await?),
        None => None,
    };

    match controller.submit(upload).await {
        InferOutcome::Rendered(_) => {
            let markup = controller
                .snapshot()
                .await
                .result
                .map(|panel| panel.markup)
                .unwrap_or_default();
            emit(&markup, out).await
        }
        InferOutcome::MissingFile => bail!("no image given (use --image)"),
        InferOutcome::Rejected(err) => Err(anyhow!("inference rejected: {err}")),
        InferOutcome::Failed(reason) => Err(anyhow!("inference failed: {reason}")),
        InferOutcome::Superseded => Ok(()),
    }
}

async fn run_history(controller: &Controller, out: Option<PathBuf>) -> Result<()> {
    match controller.toggle_history().await {
        HistoryOutcome::Revealed { rows } => {
            info!(rows, "detect_cli: history loaded");
            let markup = controller
                .snapshot()
                .await
                .history
                .markup
                .unwrap_or_default();
            emit(&markup, out).await
        }
        HistoryOutcome::Failed => bail!("failed to load history"),
        HistoryOutcome::Hidden | HistoryOutcome::Superseded => Ok(()),
    }
}

async fn emit(markup: &str, out: Option<PathBuf>) -> Result<()> {
    match out {
        Some(path) => tokio::fs::write(&path, markup)
            .await
            .with_context(|| format!("failed to write '{}'", path.display())),
        None => {
            println!("{markup}");
            Ok(())
        }
    }
}
