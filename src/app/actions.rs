//! User-triggered actions
//!
//! Each action flips its ActionState to pending before the request is queued;
//! a trigger on a pending control does nothing.

use std::path::{Path, PathBuf};

use crate::app::App;
use crate::logic::filenames;
use crate::logic::validation::{self, ValidationError};
use crate::model::{DownloadControl, FileCandidate};
use crate::services::api::ApiRequest;

impl App {
    /// Generate a QR code for the URL field
    pub fn request_generate_single(&mut self) {
        let url = match self.model.single.begin_generate() {
            Ok(Some(url)) => url,
            Ok(None) => return,
            Err(err) => {
                self.model.single.fail_generate(err.to_string());
                return;
            }
        };

        if let Err(e) = self.send_request(ApiRequest::GenerateSingle { url }) {
            self.model.single.fail_generate(e.to_string());
        }
    }

    /// Upload the picked spreadsheet
    pub fn request_generate_batch(&mut self) {
        let Some((file, generation)) = self.model.batch.begin_generate() else {
            return;
        };

        let request = ApiRequest::GenerateBatch {
            path: file.path,
            file_name: file.name,
            kind: file.kind,
            generation,
        };
        if let Err(e) = self.send_request(request) {
            self.model.batch.fail_generate(e.to_string());
        }
    }

    /// Download through one of the item download controls
    pub fn request_download(&mut self, control: DownloadControl) {
        if control == DownloadControl::BatchArchive {
            self.request_download_archive();
            return;
        }

        let Some(item) = self.model.download_target(&control) else {
            return;
        };
        let Some(ticket) = self.model.begin_download(&control) else {
            return;
        };

        let request = ApiRequest::DownloadImage {
            control: control.clone(),
            ticket,
            id: item.id.clone(),
            filename: item.filename.clone(),
        };
        if let Err(e) = self.send_request(request) {
            self.model.finish_download(&control, ticket, Err(e.to_string()));
        }
    }

    /// Download the zip of the current batch
    pub fn request_download_archive(&mut self) {
        let Some(batch_id) = self.model.batch.batch_id.clone() else {
            return;
        };
        let control = DownloadControl::BatchArchive;
        let Some(ticket) = self.model.begin_download(&control) else {
            return;
        };

        let request = ApiRequest::DownloadBatch {
            ticket,
            batch_id,
            filename: filenames::BATCH_ARCHIVE_FILENAME.to_string(),
        };
        if let Err(e) = self.send_request(request) {
            self.model.finish_download(&control, ticket, Err(e.to_string()));
        }
    }

    /// Use the path typed into the batch prompt as the picked file
    pub fn pick_batch_file(&mut self) {
        let input = self.model.batch.path_input.trim().to_string();
        if input.is_empty() {
            return;
        }

        match file_candidate(&expand_home(&input)) {
            Ok(candidate) => {
                let name = candidate.name.clone();
                match self.model.batch.select_file(candidate) {
                    Ok(()) => {
                        tracing::info!(%name, "spreadsheet selected");
                        // Previous results are gone with the old file
                        self.prune_preview_cache();
                    }
                    Err(err) => tracing::debug!(%name, error = %err, "file rejected"),
                }
            }
            Err(err) => self.model.batch.reject_unreadable(err),
        }
    }
}

/// Describe a file the way a browser picker would: name, size, MIME type
pub fn file_candidate(path: &Path) -> Result<FileCandidate, ValidationError> {
    let unreadable = |reason: String| ValidationError::UnreadableFile {
        path: path.display().to_string(),
        reason,
    };

    let metadata = std::fs::metadata(path).map_err(|e| unreadable(e.to_string()))?;
    if !metadata.is_file() {
        return Err(unreadable("not a file".to_string()));
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(FileCandidate {
        path: path.to_path_buf(),
        name,
        size: metadata.len(),
        mime_type: validation::mime_type_for_path(path).to_string(),
    })
}

fn expand_home(input: &str) -> PathBuf {
    if let Some(rest) = input.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(input)
}
