// src/routes/resource_routes.rs
//
// List/detail pages and add/edit forms, one generic set of handlers per resource.

use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::get,
};
use serde::Serialize;

use crate::{
    error::ApiError,
    listing::{ListQuery, Page, paginate},
    middleware::auth_context::AuthContext,
    models::{AppState, DataResponse, OkData},
    services::{self, Editable, Listed},
};

#[derive(Debug, Serialize)]
pub struct Saved<T> {
    pub record: Option<T>,
    pub message: String,
}

/// GET `/`, GET `/{id}`, DELETE `/{id}`.
pub fn listed_router<R: Listed>() -> Router<AppState> {
    Router::new()
        .route("/", get(list_records::<R>))
        .route("/{id}", get(get_record::<R>).delete(delete_record::<R>))
}

/// `listed_router` plus POST `/` and PUT `/{id}`.
pub fn editable_router<R: Editable>() -> Router<AppState> {
    Router::new()
        .route("/", get(list_records::<R>).post(create_record::<R>))
        .route(
            "/{id}",
            get(get_record::<R>)
                .put(update_record::<R>)
                .delete(delete_record::<R>),
        )
}

async fn list_records<R: Listed>(
    auth: AuthContext,
    Query(query): Query<ListQuery>,
) -> Result<Json<DataResponse<Page<R::Record>>>, ApiError> {
    let rows = services::list::<R>(auth.client()).await?;
    Ok(Json(DataResponse::new(paginate(rows, &query))))
}

async fn get_record<R: Listed>(
    auth: AuthContext,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<R::Record>>, ApiError> {
    let record = services::get::<R>(auth.client(), &id).await?;
    Ok(Json(DataResponse::new(record)))
}

async fn delete_record<R: Listed>(
    auth: AuthContext,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<OkData>>, ApiError> {
    let env = services::remove::<R>(auth.client(), &id).await?;
    tracing::info!(resource = R::LABEL, %id, "record deleted");

    Ok(Json(DataResponse::new(OkData {
        ok: true,
        message: Some(env.message.unwrap_or_else(|| format!("{} deleted", R::LABEL))),
    })))
}

fn check_form<R: Editable>(form: &R::Form) -> Result<(), ApiError> {
    let errors = R::validate(form);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation(errors))
    }
}

async fn create_record<R: Editable>(
    auth: AuthContext,
    Json(form): Json<R::Form>,
) -> Result<(StatusCode, Json<DataResponse<Saved<R::Record>>>), ApiError> {
    check_form::<R>(&form)?;
    let env = services::create::<R>(auth.client(), &form).await?;
    tracing::info!(resource = R::LABEL, "record created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(Saved {
            record: env.data,
            message: env
                .message
                .unwrap_or_else(|| format!("{} created", R::LABEL)),
        })),
    ))
}

async fn update_record<R: Editable>(
    auth: AuthContext,
    Path(id): Path<String>,
    Json(form): Json<R::Form>,
) -> Result<Json<DataResponse<Saved<R::Record>>>, ApiError> {
    check_form::<R>(&form)?;
    let env = services::update::<R>(auth.client(), &id, &form).await?;
    tracing::info!(resource = R::LABEL, %id, "record updated");

    Ok(Json(DataResponse::new(Saved {
        record: env.data,
        message: env
            .message
            .unwrap_or_else(|| format!("{} updated", R::LABEL)),
    })))
}
