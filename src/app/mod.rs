pub mod effects;
pub mod state;
mod ui;

use std::time::{Duration, Instant};

use eframe::App as EApp;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::warn;

use crate::github::GitHubClient;

pub use state::{Action, AppState, BatchOutcome, FetchBatch, Notification, NotificationKind};
use ui::ChartTexture;

/// eframe adapter around [`AppState`].
///
/// Fetch batches run on the tokio runtime; their results come back through a
/// channel and are applied on the UI thread at the start of the next frame.
pub struct AppWrapper {
    state: AppState,
    client: GitHubClient,
    runtime: Handle,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Action>,
    chart: ChartTexture,
}

impl AppWrapper {
    pub fn new(state: AppState, client: GitHubClient, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state,
            client,
            runtime,
            tx,
            rx,
            chart: ChartTexture::default(),
        }
    }

    fn dispatch(&mut self, action: Action, ctx: &egui::Context) {
        if let Some(batch) = self.state.apply(action) {
            self.spawn_batch(batch, ctx);
        }
    }

    fn spawn_batch(&self, batch: FetchBatch, ctx: &egui::Context) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let action = effects::execute(&client, batch).await;
            if tx.send(action).is_err() {
                warn!("window closed before fetch batch finished");
            }
            ctx.request_repaint();
        });
    }
}

impl EApp for AppWrapper {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Ok(action) = self.rx.try_recv() {
            self.dispatch(action, ctx);
        }
        self.state.expire_notification(Instant::now());

        let actions = ui::draw_ui(&mut self.state, ctx, &mut self.chart);
        for action in actions {
            self.dispatch(action, ctx);
        }

        if self.state.notification.is_some() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}
