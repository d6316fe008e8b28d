//! GitHub Commit Comparison
//!
//! A GUI application comparing weekly commit activity across GitHub repositories.

use anyhow::{anyhow, Context};
use eframe::egui;
use tokio::runtime::Runtime;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gitcompare::app::AppWrapper;
use gitcompare::{AppState, CollectionStore, Config, GitHubClient};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gitcompare=info")),
        )
        .init();

    let config = Config::from_env();

    let rt = Runtime::new().context("failed to start tokio runtime")?;
    let _guard = rt.enter();

    let client = GitHubClient::new(&config).context("failed to build GitHub client")?;
    if !client.has_token() {
        warn!("GITHUB_TOKEN is not set; fetches will fail until it is provided");
    }
    let collections = CollectionStore::load_all(config.data_file.clone());
    info!(
        "loaded {} collections from {}",
        collections.records().len(),
        collections.path().display()
    );
    let state = AppState::new(collections);
    let app = AppWrapper::new(state, client, rt.handle().clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("GitHub Commit Comparison"),
        ..Default::default()
    };

    eframe::run_native(
        "GitHub Commit Comparison",
        options,
        Box::new(|cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(app) as Box<dyn eframe::App>)
        }),
    )
    .map_err(|e| anyhow!("error running application: {e}"))
}
