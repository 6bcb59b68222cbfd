// src/wizard/batch.rs
//
// Concurrent upload of a file batch with per-file outcomes.

use futures::future::join_all;
use serde::Serialize;

use super::gateway::HospitalGateway;
use crate::client::ClientError;
use crate::services::upload::UploadFile;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Uploaded {
    pub index: usize,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedUpload {
    pub index: usize,
    pub file_name: String,
    pub error: String,
    #[serde(skip)]
    pub session_expired: bool,
}

/// Result of one batch. Both lists are in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    pub succeeded: Vec<Uploaded>,
    pub failed: Vec<FailedUpload>,
}

impl BatchOutcome {
    pub fn urls(&self) -> impl Iterator<Item = String> + '_ {
        self.succeeded.iter().map(|u| u.url.clone())
    }

    /// True when at least one failure was a session teardown.
    pub(crate) fn session_expired(&self) -> bool {
        self.failed.iter().any(|f| f.session_expired)
    }
}

/// Uploads every file at once. A failing file never aborts the others.
pub async fn upload_batch(gateway: &dyn HospitalGateway, files: Vec<UploadFile>) -> BatchOutcome {
    let names: Vec<String> = files.iter().map(|f| f.file_name.clone()).collect();
    let results = join_all(files.into_iter().map(|file| gateway.upload_image(file))).await;

    let mut outcome = BatchOutcome::default();
    for (index, (result, file_name)) in results.into_iter().zip(names).enumerate() {
        match result {
            Ok(url) => outcome.succeeded.push(Uploaded { index, url }),
            Err(e) => {
                tracing::warn!(index, file = %file_name, error = %e, "image upload failed");
                outcome.failed.push(FailedUpload {
                    index,
                    file_name,
                    error: e.to_string(),
                    session_expired: matches!(e, ClientError::SessionExpired),
                });
            }
        }
    }
    outcome
}
