// src/wizard/mod.rs
//
// Two-step hospital onboarding wizard.
//
// BasicDetails --next (validate_step1)--> Lookups --submit (validate_step2)--> BasicDetails (reset)
//            <-------------- back ---------------

use serde::Serialize;

use crate::client::ClientError;

pub mod batch;
pub mod draft;
pub mod gateway;
pub mod shared;
pub mod validation;

use batch::BatchOutcome;
use draft::{AssociationKind, DraftField, HospitalDraft, TimingField};
use gateway::{Created, LookupItem};
use validation::{FieldErrors, FieldKey, validate_step1, validate_step2};

pub use shared::SharedWizard;

/// Categories, insurance companies, cashless companies, panels.
type LookupResults = (
    Result<Vec<LookupItem>, ClientError>,
    Result<Vec<LookupItem>, ClientError>,
    Result<Vec<LookupItem>, ClientError>,
    Result<Vec<LookupItem>, ClientError>,
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WizardStep {
    #[default]
    BasicDetails,
    Lookups,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

/// Transient toast shown once by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }
}

/// Dropdown contents for both steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lookups {
    pub categories: Vec<LookupItem>,
    pub insurance_companies: Vec<LookupItem>,
    pub cashless_companies: Vec<LookupItem>,
    pub panels: Vec<LookupItem>,
}

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("only allowed in step {expected:?}, wizard is in {actual:?}")]
    WrongStep {
        expected: WizardStep,
        actual: WizardStep,
    },
    #[error("{0}")]
    InvalidValue(String),
    #[error("session expired")]
    SessionExpired,
}

#[derive(Debug, Clone)]
pub enum WizardAction {
    UpdateField(DraftField, String),
    AddTimingRow,
    RemoveTimingRow(usize),
    UpdateTiming {
        index: usize,
        field: TimingField,
        value: String,
    },
    IconUploaded(String),
    GalleryUploaded(Vec<String>),
    ImagesUploaded(Vec<String>),
    AddAssociation(AssociationKind, String),
    RemoveAssociation(AssociationKind, usize),
    LookupsLoaded(Lookups),
    Next,
    Back,
    Reset,
    Notify(Notice),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// validate_step2 failed; see the wizard's errors.
    Invalid,
    Created { id: Option<String> },
    Failed { message: String },
    /// Another submit on this session has not answered yet.
    InProgress,
}

/// Snapshot handed to the UI. Notices are drained when it is taken.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardView {
    pub step: WizardStep,
    pub draft: HospitalDraft,
    pub errors: FieldErrors,
    pub lookups: Lookups,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Clone, Default)]
pub struct Wizard {
    step: WizardStep,
    draft: HospitalDraft,
    errors: FieldErrors,
    lookups: Lookups,
    notices: Vec<Notice>,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &HospitalDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn lookups(&self) -> &Lookups {
        &self.lookups
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn view(&mut self) -> WizardView {
        WizardView {
            step: self.step,
            draft: self.draft.clone(),
            errors: self.errors.clone(),
            lookups: self.lookups.clone(),
            notices: std::mem::take(&mut self.notices),
        }
    }

    fn expect(&self, expected: WizardStep) -> Result<(), WizardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }

    /// Single entry point for every synchronous change. Leaves state untouched on error.
    pub fn apply(&mut self, action: WizardAction) -> Result<(), WizardError> {
        use WizardAction::*;

        match action {
            UpdateField(field, value) => {
                self.draft.set_field(field, value);
                self.errors.remove(&FieldKey::from(field));
            }
            AddTimingRow => {
                self.expect(WizardStep::BasicDetails)?;
                self.draft.add_timing_row();
            }
            RemoveTimingRow(index) => {
                self.expect(WizardStep::BasicDetails)?;
                self.draft.remove_timing_row(index);
            }
            UpdateTiming { index, field, value } => {
                self.expect(WizardStep::BasicDetails)?;
                self.draft
                    .update_timing(index, field, &value)
                    .map_err(WizardError::InvalidValue)?;
            }
            IconUploaded(url) => {
                self.expect(WizardStep::BasicDetails)?;
                self.draft.icon_url = url;
                self.errors.remove(&FieldKey::IconUrl);
            }
            GalleryUploaded(urls) => {
                self.expect(WizardStep::BasicDetails)?;
                self.draft.append_gallery(urls);
            }
            ImagesUploaded(urls) => {
                self.expect(WizardStep::Lookups)?;
                if !urls.is_empty() {
                    self.draft.append_images(urls);
                    self.errors.remove(&FieldKey::ImageUrls);
                }
            }
            AddAssociation(kind, id) => {
                self.expect(WizardStep::Lookups)?;
                if self.draft.add_association(kind, &id) {
                    self.errors.remove(&FieldKey::from(kind));
                }
            }
            RemoveAssociation(kind, index) => {
                self.expect(WizardStep::Lookups)?;
                self.draft.remove_association(kind, index);
            }
            LookupsLoaded(lookups) => self.lookups = lookups,
            Next => {
                self.expect(WizardStep::BasicDetails)?;
                let errors = validate_step1(&self.draft);
                if errors.is_empty() {
                    self.errors.clear();
                    self.step = WizardStep::Lookups;
                } else {
                    self.errors = errors;
                }
            }
            Back => {
                self.expect(WizardStep::Lookups)?;
                self.errors.clear();
                self.step = WizardStep::BasicDetails;
            }
            Reset => {
                // reference data survives; only the draft is discarded
                self.step = WizardStep::BasicDetails;
                self.draft = HospitalDraft::default();
                self.errors.clear();
            }
            Notify(notice) => self.notices.push(notice),
        }
        Ok(())
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub fn update_field(&mut self, field: DraftField, value: impl Into<String>) {
        // UpdateField is accepted in every step
        let _ = self.apply(WizardAction::UpdateField(field, value.into()));
    }

    pub fn add_timing_row(&mut self) -> Result<(), WizardError> {
        self.apply(WizardAction::AddTimingRow)
    }

    pub fn remove_timing_row(&mut self, index: usize) -> Result<(), WizardError> {
        self.apply(WizardAction::RemoveTimingRow(index))
    }

    pub fn update_timing(
        &mut self,
        index: usize,
        field: TimingField,
        value: impl Into<String>,
    ) -> Result<(), WizardError> {
        self.apply(WizardAction::UpdateTiming {
            index,
            field,
            value: value.into(),
        })
    }

    pub fn add_association(
        &mut self,
        kind: AssociationKind,
        id: impl Into<String>,
    ) -> Result<(), WizardError> {
        self.apply(WizardAction::AddAssociation(kind, id.into()))
    }

    pub fn remove_association(
        &mut self,
        kind: AssociationKind,
        index: usize,
    ) -> Result<(), WizardError> {
        self.apply(WizardAction::RemoveAssociation(kind, index))
    }

    pub fn validate_step1(&self) -> FieldErrors {
        validate_step1(&self.draft)
    }

    pub fn validate_step2(&self) -> FieldErrors {
        validate_step2(&self.draft)
    }

    /// Returns whether the wizard advanced to `Lookups`.
    pub fn next(&mut self) -> Result<bool, WizardError> {
        self.apply(WizardAction::Next)?;
        Ok(self.step == WizardStep::Lookups)
    }

    pub fn back(&mut self) -> Result<(), WizardError> {
        self.apply(WizardAction::Back)
    }

    pub fn reset(&mut self) {
        let _ = self.apply(WizardAction::Reset);
    }

    fn icon_settled(
        &mut self,
        file_name: &str,
        result: Result<String, ClientError>,
    ) -> Result<(), WizardError> {
        match result {
            Ok(url) => {
                self.apply(WizardAction::IconUploaded(url))?;
                self.notify(Notice::success("Icon uploaded"));
            }
            Err(ClientError::SessionExpired) => return Err(WizardError::SessionExpired),
            Err(e) => {
                tracing::warn!(file = %file_name, error = %e, "icon upload failed");
                self.notify(Notice::error("Failed to upload icon"));
            }
        }
        Ok(())
    }

    /// Failed files are dropped; successes are appended in input order.
    fn batch_settled(
        &mut self,
        outcome: BatchOutcome,
        into: fn(Vec<String>) -> WizardAction,
    ) -> Result<BatchOutcome, WizardError> {
        if outcome.session_expired() {
            return Err(WizardError::SessionExpired);
        }
        self.apply(into(outcome.urls().collect()))?;
        Ok(outcome)
    }

    /// A failed list comes back empty with an error notice. An expired session
    /// on any list fails the whole load before anything is queued.
    fn lookups_settled(&mut self, results: LookupResults) -> Result<(), WizardError> {
        let (categories, insurance, cashless, panels) = results;
        let expired = [&categories, &insurance, &cashless, &panels]
            .into_iter()
            .any(|r| matches!(r, Err(ClientError::SessionExpired)));
        if expired {
            return Err(WizardError::SessionExpired);
        }

        let lookups = Lookups {
            categories: self.settle("hospital categories", categories),
            insurance_companies: self.settle("insurance companies", insurance),
            cashless_companies: self.settle("cashless insurance companies", cashless),
            panels: self.settle("government panels", panels),
        };
        self.apply(WizardAction::LookupsLoaded(lookups))
    }

    fn settle(&mut self, label: &str, result: Result<Vec<LookupItem>, ClientError>) -> Vec<LookupItem> {
        result.unwrap_or_else(|e| {
            tracing::warn!(list = label, error = %e, "lookup fetch failed");
            self.notify(Notice::error(format!("Failed to load {label}")));
            Vec::new()
        })
    }

    /// The payload to send, or `None` when step 2 is incomplete.
    fn prepare_submit(&mut self) -> Result<Option<HospitalDraft>, WizardError> {
        self.expect(WizardStep::Lookups)?;

        let errors = validate_step2(&self.draft);
        if !errors.is_empty() {
            self.errors = errors;
            return Ok(None);
        }
        Ok(Some(self.draft.clone()))
    }

    /// Resets on success; keeps the draft on failure.
    fn submit_settled(
        &mut self,
        sent: &HospitalDraft,
        result: Result<Created, ClientError>,
    ) -> Result<SubmitOutcome, WizardError> {
        match result {
            Ok(created) => {
                tracing::info!(id = ?created.id, name = %sent.name, "hospital created");
                self.apply(WizardAction::Reset)?;
                self.notify(Notice::success(
                    created
                        .message
                        .filter(|m| !m.trim().is_empty())
                        .unwrap_or_else(|| "Hospital created successfully".to_string()),
                ));
                Ok(SubmitOutcome::Created { id: created.id })
            }
            Err(ClientError::SessionExpired) => Err(WizardError::SessionExpired),
            Err(e) => {
                tracing::error!(error = %e, "hospital create failed");
                let message = e
                    .user_message()
                    .unwrap_or("Failed to create hospital")
                    .to_string();
                self.notify(Notice::error(message.clone()));
                Ok(SubmitOutcome::Failed { message })
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Semaphore;

    use super::draft::HospitalDraft;
    use super::gateway::{Created, HospitalGateway, LookupItem};
    use crate::client::ClientError;
    use crate::services::upload::UploadFile;

    #[derive(Default)]
    pub(crate) struct FakeGateway {
        failing_uploads: HashSet<String>,
        reverse_delays: bool,
        expired: bool,
        failing_lookup: Option<&'static str>,
        expired_lookup: Option<&'static str>,
        reject_create: Option<String>,
        gate: Option<Arc<Semaphore>>,
        uploads: AtomicUsize,
        created: Mutex<Vec<HospitalDraft>>,
    }

    impl FakeGateway {
        pub(crate) fn failing_uploads<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
            self.failing_uploads = names.into_iter().map(str::to_string).collect();
            self
        }

        pub(crate) fn with_reverse_delays(mut self) -> Self {
            self.reverse_delays = true;
            self
        }

        pub(crate) fn expired(mut self) -> Self {
            self.expired = true;
            self
        }

        pub(crate) fn failing_lookup(mut self, which: &'static str) -> Self {
            self.failing_lookup = Some(which);
            self
        }

        pub(crate) fn expired_lookup(mut self, which: &'static str) -> Self {
            self.expired_lookup = Some(which);
            self
        }

        /// Uploads and creates wait until the test adds a permit.
        pub(crate) fn gated(mut self, gate: Arc<Semaphore>) -> Self {
            self.gate = Some(gate);
            self
        }

        pub(crate) fn rejecting_create(mut self, message: &str) -> Self {
            self.reject_create = Some(message.to_string());
            self
        }

        pub(crate) fn upload_calls(&self) -> usize {
            self.uploads.load(Ordering::SeqCst)
        }

        pub(crate) fn created(&self) -> Vec<HospitalDraft> {
            self.created.lock().unwrap().clone()
        }

        async fn wait(&self) {
            if let Some(gate) = &self.gate {
                let _permit = gate.acquire().await.unwrap();
            }
        }

        fn lookup(&self, which: &'static str) -> Result<Vec<LookupItem>, ClientError> {
            if self.expired || self.expired_lookup == Some(which) {
                return Err(ClientError::SessionExpired);
            }
            if self.failing_lookup == Some(which) {
                return Err(ClientError::Status {
                    status: 503,
                    message: format!("{which} unavailable"),
                });
            }
            Ok(vec![LookupItem {
                id: format!("{which}-1"),
                name: format!("First {which}"),
            }])
        }
    }

    #[async_trait]
    impl HospitalGateway for FakeGateway {
        async fn upload_image(&self, file: UploadFile) -> Result<String, ClientError> {
            self.uploads.fetch_add(1, Ordering::SeqCst);
            self.wait().await;
            if self.reverse_delays {
                let rank = file.bytes.first().copied().unwrap_or(0) as u64;
                tokio::time::sleep(Duration::from_millis(40u64.saturating_sub(rank * 10))).await;
            }
            if self.expired {
                return Err(ClientError::SessionExpired);
            }
            if self.failing_uploads.contains(&file.file_name) {
                return Err(ClientError::Status {
                    status: 500,
                    message: "storage error".into(),
                });
            }
            Ok(format!("http://cdn/{}", file.file_name))
        }

        async fn hospital_categories(&self) -> Result<Vec<LookupItem>, ClientError> {
            self.lookup("category")
        }

        async fn insurance_companies(&self) -> Result<Vec<LookupItem>, ClientError> {
            self.lookup("insurance")
        }

        async fn cashless_companies(&self) -> Result<Vec<LookupItem>, ClientError> {
            self.lookup("cashless")
        }

        async fn government_panels(&self) -> Result<Vec<LookupItem>, ClientError> {
            self.lookup("panel")
        }

        async fn create_hospital(&self, draft: &HospitalDraft) -> Result<Created, ClientError> {
            self.wait().await;
            if self.expired {
                return Err(ClientError::SessionExpired);
            }
            self.created.lock().unwrap().push(draft.clone());
            match &self.reject_create {
                Some(message) => Err(ClientError::Rejected(message.clone())),
                None => Ok(Created {
                    id: Some("h-1".into()),
                    message: None,
                }),
            }
        }
    }
}
