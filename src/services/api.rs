use anyhow::Context;
use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};

use crate::api::{Batch, QrClient, QrCode, SpreadsheetUpload};
use crate::logic::validation::SpreadsheetKind;
use crate::model::DownloadControl;

/// Identifies a request for concurrency tracking; unique per request in flight
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum RequestKey {
    GenerateSingle,
    GenerateBatch { generation: u64 },
    Download { ticket: u64 },
}

/// API request types
#[derive(Debug, Clone)]
pub enum ApiRequest {
    /// `POST /qrcode`
    GenerateSingle { url: String },

    /// Read the spreadsheet from disk and `POST /qrcode/batch`
    GenerateBatch {
        path: PathBuf,
        file_name: String,
        kind: SpreadsheetKind,
        generation: u64,
    },

    /// `GET /qrcode/{id}/download` on behalf of one download control
    DownloadImage {
        control: DownloadControl,
        ticket: u64,
        id: String,
        filename: String,
    },

    /// `GET /qrcode/batch/{id}/download`
    DownloadBatch {
        ticket: u64,
        batch_id: String,
        filename: String,
    },
}

impl ApiRequest {
    fn key(&self) -> RequestKey {
        match self {
            ApiRequest::GenerateSingle { .. } => RequestKey::GenerateSingle,
            ApiRequest::GenerateBatch { generation, .. } => RequestKey::GenerateBatch {
                generation: *generation,
            },
            ApiRequest::DownloadImage { ticket, .. } | ApiRequest::DownloadBatch { ticket, .. } => {
                RequestKey::Download { ticket: *ticket }
            }
        }
    }
}

/// API response types
#[derive(Debug)]
pub enum ApiResponse {
    SingleGenerated {
        result: Result<QrCode, anyhow::Error>,
    },

    BatchGenerated {
        generation: u64,
        result: Result<Batch, anyhow::Error>,
    },

    /// Payload for any download control, still to be written to disk
    Downloaded {
        control: DownloadControl,
        ticket: u64,
        filename: String,
        result: Result<Vec<u8>, anyhow::Error>,
    },
}

/// Internal message for tracking completed requests
pub(crate) enum InternalMessage {
    Completed(RequestKey),
}

/// API service worker that processes requests in the background
pub struct ApiService {
    client: QrClient,
    request_queue: VecDeque<ApiRequest>,
    in_flight: HashSet<RequestKey>,
    response_tx: mpsc::UnboundedSender<ApiResponse>,
    completion_tx: mpsc::UnboundedSender<InternalMessage>,
    max_concurrent: usize,
}

impl ApiService {
    pub(crate) fn new(
        client: QrClient,
        response_tx: mpsc::UnboundedSender<ApiResponse>,
        completion_tx: mpsc::UnboundedSender<InternalMessage>,
    ) -> Self {
        Self {
            client,
            request_queue: VecDeque::new(),
            in_flight: HashSet::new(),
            response_tx,
            completion_tx,
            max_concurrent: 4,
        }
    }

    fn enqueue(&mut self, request: ApiRequest) {
        tracing::debug!(key = ?request.key(), queued = self.request_queue.len(), "enqueue request");
        self.request_queue.push_back(request);
    }

    /// Process the next request from the queue
    fn process_next(&mut self) {
        if self.in_flight.len() >= self.max_concurrent {
            return; // At capacity, wait for some to complete
        }

        let Some(request) = self.request_queue.pop_front() else {
            return;
        };

        let key = request.key();
        self.in_flight.insert(key.clone());

        let client = self.client.clone();
        let response_tx = self.response_tx.clone();
        let completion_tx = self.completion_tx.clone();

        // No retries: a failure is reported once and the user decides
        tokio::spawn(async move {
            let response = Self::execute_request(&client, request).await;
            let _ = response_tx.send(response);
            let _ = completion_tx.send(InternalMessage::Completed(key));
        });
    }

    /// Execute an API request and return the response
    async fn execute_request(client: &QrClient, request: ApiRequest) -> ApiResponse {
        match request {
            ApiRequest::GenerateSingle { url } => {
                tracing::info!(%url, "generating QR code");
                let result = client.generate_single(&url).await;
                if let Err(e) = &result {
                    tracing::error!(error = %format!("{:#}", e), "error generating QR code");
                }
                ApiResponse::SingleGenerated { result }
            }

            ApiRequest::GenerateBatch {
                path,
                file_name,
                kind,
                generation,
            } => {
                tracing::info!(path = %path.display(), "uploading spreadsheet");
                let result = async {
                    let bytes = tokio::fs::read(&path)
                        .await
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    client
                        .generate_batch(SpreadsheetUpload {
                            file_name,
                            mime_type: kind.mime_type(),
                            bytes,
                        })
                        .await
                }
                .await;

                match &result {
                    Ok(batch) => tracing::info!(batch_id = %batch.id, items = batch.items.len(), "batch generated"),
                    Err(e) => tracing::error!(error = %format!("{:#}", e), "error generating batch QR codes"),
                }
                ApiResponse::BatchGenerated { generation, result }
            }

            ApiRequest::DownloadImage {
                control,
                ticket,
                id,
                filename,
            } => {
                tracing::debug!(%id, ?control, "downloading QR code");
                let result = client.download_single(&id).await;
                if let Err(e) = &result {
                    tracing::error!(%id, error = %format!("{:#}", e), "error downloading QR code");
                }
                ApiResponse::Downloaded {
                    control,
                    ticket,
                    filename,
                    result,
                }
            }

            ApiRequest::DownloadBatch {
                ticket,
                batch_id,
                filename,
            } => {
                tracing::debug!(%batch_id, "downloading batch archive");
                let result = client.download_batch(&batch_id).await;
                if let Err(e) = &result {
                    tracing::error!(%batch_id, error = %format!("{:#}", e), "error downloading batch archive");
                }
                ApiResponse::Downloaded {
                    control: DownloadControl::BatchArchive,
                    ticket,
                    filename,
                    result,
                }
            }
        }
    }
}

/// Spawn the API service worker
pub fn spawn_api_service(
    client: QrClient,
) -> (
    mpsc::UnboundedSender<ApiRequest>,
    mpsc::UnboundedReceiver<ApiResponse>,
) {
    let (request_tx, mut request_rx) = mpsc::unbounded_channel::<ApiRequest>();
    let (response_tx, response_rx) = mpsc::unbounded_channel::<ApiResponse>();
    let (completion_tx, mut completion_rx) = mpsc::unbounded_channel::<InternalMessage>();

    tokio::spawn(async move {
        let mut service = ApiService::new(client, response_tx, completion_tx);

        // Ticker for draining the queue
        let mut tick = interval(Duration::from_millis(10));

        loop {
            tokio::select! {
                request = request_rx.recv() => {
                    match request {
                        Some(request) => service.enqueue(request),
                        // App dropped its sender: shut the worker down
                        None => break,
                    }
                }

                Some(InternalMessage::Completed(key)) = completion_rx.recv() => {
                    service.in_flight.remove(&key);
                }

                _ = tick.tick() => {
                    while !service.request_queue.is_empty()
                        && service.in_flight.len() < service.max_concurrent
                    {
                        service.process_next();
                    }
                }
            }
        }
    });

    (request_tx, response_rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn download(control: DownloadControl, ticket: u64) -> ApiRequest {
        ApiRequest::DownloadImage {
            control,
            ticket,
            id: "qrcode_1".to_string(),
            filename: "qr-code-1.png".to_string(),
        }
    }

    #[test]
    fn test_reused_control_gets_distinct_keys() {
        let first = download(DownloadControl::Preview, 1);
        let second = download(DownloadControl::Preview, 2);
        assert_ne!(first.key(), second.key());
    }

    #[test]
    fn test_archive_keyed_by_ticket() {
        let archive = ApiRequest::DownloadBatch {
            ticket: 7,
            batch_id: "batch_1".to_string(),
            filename: "batch-qr-codes.zip".to_string(),
        };
        assert_eq!(archive.key(), RequestKey::Download { ticket: 7 });
    }
}
