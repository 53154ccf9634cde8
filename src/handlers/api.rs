//! API Response Handler
//!
//! Handles responses from the request worker: completes or fails the action
//! that issued the request, feeds results to the root model and writes
//! downloads to disk.

use crate::app::{downloads, App};
use crate::logic::errors::format_error_message;
use crate::logic::filenames;
use crate::services::api::ApiResponse;
use crate::utils;

/// Handle API response from background service
///
/// Response types:
/// - SingleGenerated: result of `POST /qrcode`
/// - BatchGenerated: result of `POST /qrcode/batch`, tagged with the upload
///   generation it was sent for
/// - Downloaded: payload for one download control
pub fn handle_api_response(app: &mut App, response: ApiResponse) {
    match response {
        ApiResponse::SingleGenerated { result } => match result {
            Ok(code) => {
                let msg = app
                    .model
                    .single
                    .complete_generate(code, filenames::now_millis());
                app.dispatch(msg);
            }
            Err(e) => {
                tracing::error!(error = %format!("{:#}", e), "error generating QR code");
                app.model.single.fail_generate(format_error_message(&e));
            }
        },

        ApiResponse::BatchGenerated { generation, result } => {
            // The file was reset or replaced while the upload was in flight
            if !app.model.batch.is_current(generation) {
                tracing::debug!(generation, "discarding stale batch response");
                return;
            }

            match result {
                Ok(batch) => {
                    let msg = app.model.batch.complete_generate(batch);
                    app.dispatch(msg);
                }
                Err(e) => {
                    tracing::error!(error = %format!("{:#}", e), "error generating batch QR codes");
                    app.model.batch.fail_generate(format_error_message(&e));
                }
            }
        }

        ApiResponse::Downloaded {
            control,
            ticket,
            filename,
            result,
        } => {
            let saved = result.and_then(|bytes| {
                downloads::save_download(&app.settings.download_dir, &filename, &bytes)
            });

            let (outcome, toast) = match saved {
                Ok(path) => (Ok(()), format!("Saved {}", utils::display_path(&path))),
                Err(e) => {
                    tracing::error!(%filename, error = %format!("{:#}", e), "error downloading");
                    let message = format_error_message(&e);
                    let toast = format!("Error: {}", message);
                    (Err(message), toast)
                }
            };

            // A reset, a new selection or a newer request may have taken the
            // control over; the file is saved either way
            if !app.model.finish_download(&control, ticket, outcome) {
                tracing::debug!(?control, ticket, "download settled after control moved on");
            }
            app.model.show_toast(toast);
        }
    }
}
