mod backend_bridge;
mod controller;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use client_core::config::load_settings;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{CatalogAdminApp, WINDOW_TITLE};

#[derive(Parser, Debug)]
#[command(about = "Desktop admin panel for a remote product catalog")]
struct Args {
    /// Overrides the configured catalog base URL.
    #[arg(long)]
    api_url: Option<String>,
    /// Settings file; defaults to ./catalog_admin.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings =
        load_settings(args.config.as_deref()).context("failed to load admin panel settings")?;
    if let Some(api_url) = args.api_url {
        settings.api_base_url = api_url;
    }
    tracing::info!(api = %settings.api_base_url, page_size = settings.page_size, "starting admin panel");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(settings.clone(), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(CatalogAdminApp::new(cmd_tx, ui_rx, &settings)))),
    )
    .map_err(|err| anyhow::anyhow!("admin panel exited with error: {err}"))
}
