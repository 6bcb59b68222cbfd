// src/wizard/shared.rs
//
// A wizard shared by one dashboard session. The lock guards state only; it is
// never held while an upstream call is outstanding, so field edits, timing
// changes and Next stay responsive during uploads, lookups and submission.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{Mutex, MutexGuard};

use super::batch::{BatchOutcome, upload_batch};
use super::gateway::HospitalGateway;
use super::{Notice, SubmitOutcome, Wizard, WizardAction, WizardError, WizardStep};
use crate::services::upload::UploadFile;

#[derive(Debug, Default)]
pub struct SharedWizard {
    state: Mutex<Wizard>,
    submitting: AtomicBool,
}

/// Clears the submit flag when the submit finishes or its request is dropped.
struct SubmitClaim<'a>(&'a AtomicBool);

impl Drop for SubmitClaim<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl From<Wizard> for SharedWizard {
    fn from(wizard: Wizard) -> Self {
        Self {
            state: Mutex::new(wizard),
            submitting: AtomicBool::new(false),
        }
    }
}

impl SharedWizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// For synchronous edits and snapshots.
    pub async fn lock(&self) -> MutexGuard<'_, Wizard> {
        self.state.lock().await
    }

    pub async fn upload_icon(
        &self,
        gateway: &dyn HospitalGateway,
        file: UploadFile,
    ) -> Result<(), WizardError> {
        self.lock().await.expect(WizardStep::BasicDetails)?;

        let file_name = file.file_name.clone();
        let result = gateway.upload_image(file).await;
        self.lock().await.icon_settled(&file_name, result)
    }

    /// Step-1 gallery.
    pub async fn upload_gallery_batch(
        &self,
        gateway: &dyn HospitalGateway,
        files: Vec<UploadFile>,
    ) -> Result<BatchOutcome, WizardError> {
        self.lock().await.expect(WizardStep::BasicDetails)?;

        let outcome = upload_batch(gateway, files).await;
        self.lock()
            .await
            .batch_settled(outcome, WizardAction::GalleryUploaded)
    }

    /// Step-2 images, same policy as the gallery.
    pub async fn upload_images(
        &self,
        gateway: &dyn HospitalGateway,
        files: Vec<UploadFile>,
    ) -> Result<BatchOutcome, WizardError> {
        self.lock().await.expect(WizardStep::Lookups)?;

        let outcome = upload_batch(gateway, files).await;
        self.lock()
            .await
            .batch_settled(outcome, WizardAction::ImagesUploaded)
    }

    /// Fetches all dropdown lists at once.
    pub async fn load_lookups(&self, gateway: &dyn HospitalGateway) -> Result<(), WizardError> {
        let results = tokio::join!(
            gateway.hospital_categories(),
            gateway.insurance_companies(),
            gateway.cashless_companies(),
            gateway.government_panels(),
        );
        self.lock().await.lookups_settled(results)
    }

    /// Sends the draft as it stood when the submit began. A second submit while
    /// one is outstanding returns `InProgress` without calling upstream.
    pub async fn submit(&self, gateway: &dyn HospitalGateway) -> Result<SubmitOutcome, WizardError> {
        let Some(_claim) = self.claim_submit() else {
            self.lock()
                .await
                .apply(WizardAction::Notify(Notice::info("Submission already in progress")))?;
            return Ok(SubmitOutcome::InProgress);
        };

        let prepared = self.lock().await.prepare_submit()?;
        let Some(draft) = prepared else {
            return Ok(SubmitOutcome::Invalid);
        };

        let result = gateway.create_hospital(&draft).await;
        self.lock().await.submit_settled(&draft, result)
    }

    fn claim_submit(&self) -> Option<SubmitClaim<'_>> {
        self.submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
            .then(|| SubmitClaim(&self.submitting))
    }
}
