// src/routes/wizard_routes.rs
//
// Hospital onboarding wizard. Every handler answers with the wizard snapshot.
// Upstream calls run without the wizard lock; the snapshot is taken afterwards.

use std::collections::BTreeMap;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path},
    routing::{delete, get, patch, post},
};
use serde::{Deserialize, Serialize};

use crate::{
    error::ApiError,
    middleware::auth_context::AuthContext,
    models::{AppState, DataResponse},
    services::upload::UploadFile,
    wizard::{
        SubmitOutcome, Wizard, WizardView,
        batch::BatchOutcome,
        draft::{AssociationKind, DraftField, TimingField},
    },
};

/// Ten gallery images of a few MB each.
const UPLOAD_BODY_LIMIT: usize = 50 * 1024 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(show))
        .route("/reset", post(reset))
        .route("/fields", patch(update_fields))
        .route("/timing", post(add_timing_row))
        .route(
            "/timing/{index}",
            patch(update_timing).delete(remove_timing_row),
        )
        .route("/icon", post(upload_icon))
        .route("/gallery", post(upload_gallery))
        .route("/next", post(next))
        .route("/back", post(back))
        .route("/lookups", post(load_lookups))
        .route("/associations/{kind}", post(add_association))
        .route("/associations/{kind}/{index}", delete(remove_association))
        .route("/images", post(upload_images))
        .route("/submit", post(submit))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardData {
    #[serde(flatten)]
    pub view: WizardView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload: Option<BatchOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<&'static str>,
}

type WizardResponse = Result<Json<DataResponse<WizardData>>, ApiError>;

fn respond(wizard: &mut Wizard) -> WizardResponse {
    respond_with(wizard, None, None)
}

fn respond_with(
    wizard: &mut Wizard,
    upload: Option<BatchOutcome>,
    outcome: Option<&'static str>,
) -> WizardResponse {
    Ok(Json(DataResponse::new(WizardData {
        view: wizard.view(),
        upload,
        outcome,
    })))
}

async fn read_files(mut multipart: Multipart) -> Result<Vec<UploadFile>, ApiError> {
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest("INVALID_UPLOAD", e.body_text()))?
    {
        // skip plain form fields
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest("INVALID_UPLOAD", e.body_text()))?;

        files.push(UploadFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    if files.is_empty() {
        return Err(ApiError::BadRequest(
            "INVALID_UPLOAD",
            "no file was attached".into(),
        ));
    }
    Ok(files)
}

async fn show(auth: AuthContext) -> WizardResponse {
    let mut wizard = auth.session.wizard.lock().await;
    respond(&mut wizard)
}

async fn reset(auth: AuthContext) -> WizardResponse {
    let mut wizard = auth.session.wizard.lock().await;
    wizard.reset();
    respond(&mut wizard)
}

async fn update_fields(
    auth: AuthContext,
    Json(fields): Json<BTreeMap<DraftField, String>>,
) -> WizardResponse {
    let mut wizard = auth.session.wizard.lock().await;
    for (field, value) in fields {
        wizard.update_field(field, value);
    }
    respond(&mut wizard)
}

async fn add_timing_row(auth: AuthContext) -> WizardResponse {
    let mut wizard = auth.session.wizard.lock().await;
    wizard.add_timing_row()?;
    respond(&mut wizard)
}

#[derive(Debug, Deserialize)]
pub struct TimingUpdate {
    pub field: TimingField,
    pub value: String,
}

async fn update_timing(
    auth: AuthContext,
    Path(index): Path<usize>,
    Json(req): Json<TimingUpdate>,
) -> WizardResponse {
    let mut wizard = auth.session.wizard.lock().await;
    wizard.update_timing(index, req.field, req.value)?;
    respond(&mut wizard)
}

async fn remove_timing_row(auth: AuthContext, Path(index): Path<usize>) -> WizardResponse {
    let mut wizard = auth.session.wizard.lock().await;
    wizard.remove_timing_row(index)?;
    respond(&mut wizard)
}

async fn upload_icon(auth: AuthContext, multipart: Multipart) -> WizardResponse {
    let file = read_files(multipart).await?.swap_remove(0);
    auth.session.wizard.upload_icon(auth.client(), file).await?;
    respond(&mut *auth.session.wizard.lock().await)
}

async fn upload_gallery(auth: AuthContext, multipart: Multipart) -> WizardResponse {
    let files = read_files(multipart).await?;
    let outcome = auth
        .session
        .wizard
        .upload_gallery_batch(auth.client(), files)
        .await?;
    respond_with(&mut *auth.session.wizard.lock().await, Some(outcome), None)
}

async fn next(auth: AuthContext) -> WizardResponse {
    let mut wizard = auth.session.wizard.lock().await;
    let advanced = wizard.next()?;
    respond_with(
        &mut wizard,
        None,
        Some(if advanced { "advanced" } else { "invalid" }),
    )
}

async fn back(auth: AuthContext) -> WizardResponse {
    let mut wizard = auth.session.wizard.lock().await;
    wizard.back()?;
    respond(&mut wizard)
}

async fn load_lookups(auth: AuthContext) -> WizardResponse {
    auth.session.wizard.load_lookups(auth.client()).await?;
    respond(&mut *auth.session.wizard.lock().await)
}

#[derive(Debug, Deserialize)]
pub struct AssociationRequest {
    pub id: String,
}

async fn add_association(
    auth: AuthContext,
    Path(kind): Path<AssociationKind>,
    Json(req): Json<AssociationRequest>,
) -> WizardResponse {
    let mut wizard = auth.session.wizard.lock().await;
    wizard.add_association(kind, req.id)?;
    respond(&mut wizard)
}

async fn remove_association(
    auth: AuthContext,
    Path((kind, index)): Path<(AssociationKind, usize)>,
) -> WizardResponse {
    let mut wizard = auth.session.wizard.lock().await;
    wizard.remove_association(kind, index)?;
    respond(&mut wizard)
}

async fn upload_images(auth: AuthContext, multipart: Multipart) -> WizardResponse {
    let files = read_files(multipart).await?;
    let outcome = auth
        .session
        .wizard
        .upload_images(auth.client(), files)
        .await?;
    respond_with(&mut *auth.session.wizard.lock().await, Some(outcome), None)
}

async fn submit(auth: AuthContext) -> WizardResponse {
    let outcome = match auth.session.wizard.submit(auth.client()).await? {
        SubmitOutcome::Invalid => "invalid",
        SubmitOutcome::Created { .. } => "created",
        SubmitOutcome::Failed { .. } => "failed",
        SubmitOutcome::InProgress => "inProgress",
    };
    respond_with(&mut *auth.session.wizard.lock().await, None, Some(outcome))
}
