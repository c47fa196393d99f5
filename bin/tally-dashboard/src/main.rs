// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.


use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tally::{ReactiveController, SourcesConfig, UiEvent, ViewId};
use tally_dashboard::{build_router, load_settings, AppState, Settings};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(name = "tally-dashboard", about = "Starbucks analytics dashboard backend")]
struct Cli {
    /// Path to a TOML settings file; `dashboard.toml` is used when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    port: Option<u16>,
    #[arg(long, global = true)]
    debug: bool,
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    Serve,
    /// Print chart specs as JSON and exit.
    Render {
        /// View id, e.g. `calorie-distribution`. All views when omitted.
        #[arg(long)]
        view: Option<ViewId>,
        /// A UI event as JSON, applied before printing.
        #[arg(long)]
        event: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let mut settings = load_settings(cli.config.as_deref()).context("loading settings")?;
    settings.apply_overrides(cli.port, cli.debug, cli.data_dir);
    init_tracing(&settings);

    match cli.cmd.unwrap_or(Command::Serve) {
        Command::Serve => serve(settings).await,
        Command::Render { view, event } => render(&settings, view, event.as_deref()),
    }
}

fn init_tracing(settings: &Settings) {
    let default_level = if settings.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn serve(settings: Settings) -> Result<()> {
    info!(data_dir = %settings.sources.data_dir.display(), "tally-dashboard starting");
    let sources = settings.sources.clone();
    let controller = tokio::task::spawn_blocking(move || start_controller(&sources)).await??;
    let app = build_router(AppState::new(controller));

    let addr = settings.bind_addr().context("invalid listen address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    let local = listener.local_addr()?;
    info!(%local, debug = settings.debug, "dashboard listening");

    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(e) = result {
                warn!(error = %e, "server stopped");
            }
        }
        _ = tokio::signal::ctrl_c() => {}
    }
    info!("tally-dashboard shutting down");
    Ok(())
}

fn start_controller(sources: &SourcesConfig) -> Result<Arc<ReactiveController>> {
    tally::start(sources).map_err(|e| {
        error!(dataset = e.dataset().unwrap_or("-"), error = %e, "Startup failed");
        anyhow::Error::new(e).context("building data context")
    })
}

fn render(settings: &Settings, view: Option<ViewId>, event: Option<&str>) -> Result<()> {
    let controller = start_controller(&settings.sources)?;
    if let Some(raw) = event {
        let event: UiEvent = serde_json::from_str(raw).context("parsing --event")?;
        controller.handle(event);
    }
    let views: Vec<ViewId> = view.map_or_else(|| ViewId::ALL.to_vec(), |v| vec![v]);
    let specs: BTreeMap<ViewId, _> = views
        .into_iter()
        .filter_map(|v| controller.current(v).map(|spec| (v, spec)))
        .collect();
    println!("{}", serde_json::to_string_pretty(&specs)?);
    Ok(())
}
