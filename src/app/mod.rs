//! App Orchestration
//!
//! `App` wires the pure Model to the outside world: the request worker, the
//! download directory and the image preview loader. Methods are grouped by
//! domain in submodules:
//!
//! - actions: user-triggered requests (generate, download, pick file)
//! - downloads: writing payloads to disk
//! - preview: fetching and decoding the selected QR image

pub mod actions;
pub mod downloads;
pub mod preview;

use anyhow::Result;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use tokio::sync::mpsc;

use crate::api::QrClient;
use crate::handlers;
use crate::messages::Msg;
use crate::model::Model;
use crate::services::api::{self, ApiRequest, ApiResponse};

pub use preview::{ImageMetadata, ImagePreviewState};

/// Resolved runtime settings (config file merged with CLI and environment)
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Absolute API base, e.g. `http://localhost:8000/api`
    pub api_base_url: String,

    /// Origin relative image URLs are resolved against
    pub server_url: String,

    pub download_dir: PathBuf,
}

pub struct App {
    pub model: Model,

    pub settings: AppSettings,

    client: QrClient,
    api_tx: mpsc::UnboundedSender<ApiRequest>,
    api_rx: mpsc::UnboundedReceiver<ApiResponse>,

    image_picker: Option<ratatui_image::picker::Picker>,
    image_update_tx: mpsc::UnboundedSender<(String, ImagePreviewState)>,
    image_update_rx: mpsc::UnboundedReceiver<(String, ImagePreviewState)>,

    /// Preview images by item id (not Clone, so kept outside the Model)
    pub image_state_map: HashMap<String, ImagePreviewState>,
}

impl App {
    /// Build the app and start the request worker. Must run inside a tokio
    /// runtime.
    pub fn new(
        settings: AppSettings,
        image_picker: Option<ratatui_image::picker::Picker>,
    ) -> Result<Self> {
        let client = QrClient::new(settings.api_base_url.clone())?;
        let (api_tx, api_rx) = api::spawn_api_service(client.clone());
        let (image_update_tx, image_update_rx) = mpsc::unbounded_channel();

        tracing::info!(
            api = %settings.api_base_url,
            downloads = %settings.download_dir.display(),
            image_preview = image_picker.is_some(),
            "app started"
        );

        Ok(Self {
            model: Model::new(),
            settings,
            client,
            api_tx,
            api_rx,
            image_picker,
            image_update_tx,
            image_update_rx,
            image_state_map: HashMap::new(),
        })
    }

    /// Hand a workflow message to the root model and start loading the
    /// preview image when the selection moved to another item
    pub fn dispatch(&mut self, msg: Msg) {
        let previous = self.model.selected.as_ref().map(|item| item.id.clone());
        let replaces_results = matches!(msg, Msg::Generated(_));
        self.model.update(msg);

        if replaces_results {
            self.prune_preview_cache();
        }

        if let Some(item) = self.model.selected.clone() {
            if previous.as_deref() != Some(item.id.as_str()) {
                tracing::debug!(id = %item.id, "selection changed");
                self.load_preview(&item);
            }
        }
    }

    /// Process every response the worker has finished (non-blocking)
    pub fn drain_api_responses(&mut self) {
        while let Ok(response) = self.api_rx.try_recv() {
            handlers::handle_api_response(self, response);
        }
    }

    /// Wait for the next worker response without handling it
    pub async fn next_api_response(&mut self) -> Option<ApiResponse> {
        self.api_rx.recv().await
    }

    /// Clear the batch tab and forget preview images nothing shows anymore
    pub fn reset_batch(&mut self) {
        self.model.batch.reset();
        self.prune_preview_cache();
    }

    /// Keep preview images only for items still reachable from the model
    pub(crate) fn prune_preview_cache(&mut self) {
        let model = &self.model;
        let live: HashSet<&str> = model
            .single
            .generated
            .iter()
            .chain(model.batch.items.iter())
            .chain(model.selected.iter())
            .map(|item| item.id.as_str())
            .collect();

        let before = self.image_state_map.len();
        self.image_state_map.retain(|id, _| live.contains(id.as_str()));
        let dropped = before - self.image_state_map.len();
        if dropped > 0 {
            tracing::debug!(dropped, kept = self.image_state_map.len(), "pruned preview images");
        }
    }

    /// Store preview images finished by background tasks (non-blocking).
    /// Images for items pruned while loading are dropped.
    pub fn drain_image_updates(&mut self) {
        while let Ok((id, state)) = self.image_update_rx.try_recv() {
            if let Some(slot) = self.image_state_map.get_mut(&id) {
                *slot = state;
            }
        }
    }

    pub fn image_preview_enabled(&self) -> bool {
        self.image_picker.is_some()
    }

    pub(crate) fn send_request(&self, request: ApiRequest) -> Result<()> {
        self.api_tx
            .send(request)
            .map_err(|_| anyhow::anyhow!("Request worker has stopped"))
    }
}
