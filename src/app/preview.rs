//! QR image preview loading
//!
//! The selected item's `qr_image_url` is fetched and decoded off the UI loop;
//! the finished terminal image comes back through `image_update_tx`.

use ratatui_image::picker::{Picker, ProtocolType};
use ratatui_image::protocol::StatefulProtocol;

use crate::api::QrClient;
use crate::app::App;
use crate::logic::urls;
use crate::model::QrItem;

/// Images above this size are not decoded
const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct ImageMetadata {
    pub dimensions: Option<(u32, u32)>,
    pub file_size: u64,
    /// Why the preview is unavailable, when it is
    pub note: Option<String>,
}

impl ImageMetadata {
    fn failed(note: impl Into<String>, file_size: u64) -> Self {
        Self {
            dimensions: None,
            file_size,
            note: Some(note.into()),
        }
    }
}

pub enum ImagePreviewState {
    Loading,
    Ready {
        protocol: StatefulProtocol,
        metadata: ImageMetadata,
    },
    Failed {
        metadata: ImageMetadata,
    },
}

impl std::fmt::Debug for ImagePreviewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImagePreviewState::Loading => write!(f, "ImagePreviewState::Loading"),
            ImagePreviewState::Ready { metadata, .. } => f
                .debug_struct("ImagePreviewState::Ready")
                .field("metadata", metadata)
                .field("protocol", &"<StatefulProtocol>")
                .finish(),
            ImagePreviewState::Failed { metadata } => f
                .debug_struct("ImagePreviewState::Failed")
                .field("metadata", metadata)
                .finish(),
        }
    }
}

/// Detect the terminal graphics protocol, then apply the configured override.
/// Call before raw mode is enabled.
pub fn create_picker(image_protocol: &str) -> Picker {
    let mut picker = match Picker::from_query_stdio() {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(error = %e, "image preview: failed to query terminal");
            Picker::from_fontsize((8, 16))
        }
    };

    match protocol_override(image_protocol) {
        Ok(Some(protocol)) => {
            tracing::debug!(?protocol, "image preview: protocol from config");
            picker.set_protocol_type(protocol);
        }
        Ok(None) => tracing::debug!("image preview: auto-detected protocol"),
        Err(unknown) => {
            tracing::warn!(%unknown, "image preview: unknown protocol, using auto-detect")
        }
    }

    picker
}

/// Map the `image_protocol` setting; `Ok(None)` keeps auto-detection
fn protocol_override(name: &str) -> Result<Option<ProtocolType>, String> {
    match name.to_lowercase().as_str() {
        "auto" | "" => Ok(None),
        "kitty" => Ok(Some(ProtocolType::Kitty)),
        "sixel" => Ok(Some(ProtocolType::Sixel)),
        "iterm2" => Ok(Some(ProtocolType::Iterm2)),
        "halfblocks" => Ok(Some(ProtocolType::Halfblocks)),
        unknown => Err(unknown.to_string()),
    }
}

impl App {
    /// Start loading the preview image for `item` unless it is cached
    pub(crate) fn load_preview(&mut self, item: &QrItem) {
        let Some(picker) = self.image_picker.clone() else {
            return;
        };
        if matches!(
            self.image_state_map.get(&item.id),
            Some(ImagePreviewState::Ready { .. }) | Some(ImagePreviewState::Loading)
        ) {
            return;
        }

        let Some(image_url) = item.qr_image_url.as_deref() else {
            self.image_state_map.insert(
                item.id.clone(),
                ImagePreviewState::Failed {
                    metadata: ImageMetadata::failed("No image URL", 0),
                },
            );
            return;
        };

        let image_url = urls::resolve_against(&self.settings.server_url, image_url);
        let client = self.client.clone();
        let image_tx = self.image_update_tx.clone();
        let id = item.id.clone();

        self.image_state_map
            .insert(id.clone(), ImagePreviewState::Loading);

        tokio::spawn(async move {
            let state = match load_image_preview(&client, &image_url, picker).await {
                Ok((protocol, metadata)) => {
                    tracing::debug!(%id, "preview image ready");
                    ImagePreviewState::Ready { protocol, metadata }
                }
                Err(metadata) => {
                    tracing::debug!(%id, note = ?metadata.note, "preview image failed");
                    ImagePreviewState::Failed { metadata }
                }
            };
            let _ = image_tx.send((id, state));
        });
    }
}

async fn load_image_preview(
    client: &QrClient,
    image_url: &str,
    picker: Picker,
) -> Result<(StatefulProtocol, ImageMetadata), ImageMetadata> {
    let bytes = client
        .fetch_image(image_url)
        .await
        .map_err(|e| ImageMetadata::failed(crate::logic::errors::format_error_message(&e), 0))?;

    let file_size = bytes.len() as u64;
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(ImageMetadata::failed("Too large", file_size));
    }

    let img = match tokio::task::spawn_blocking(move || image::load_from_memory(&bytes)).await {
        Ok(Ok(img)) => img,
        Ok(Err(e)) => return Err(ImageMetadata::failed(format!("Load error: {}", e), file_size)),
        Err(e) => return Err(ImageMetadata::failed(format!("Task error: {}", e), file_size)),
    };

    let dimensions = (img.width(), img.height());
    let protocol = picker.new_resize_protocol(img);

    Ok((
        protocol,
        ImageMetadata {
            dimensions: Some(dimensions),
            file_size,
            note: None,
        },
    ))
}
