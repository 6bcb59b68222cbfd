// src/services/mod.rs
//
// One module per upstream resource. Functions here only shape requests.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    client::{ApiClient, ClientError, Envelope},
    forms::FormErrors,
    listing::Searchable,
};

pub mod appointment;
pub mod auth;
pub mod category;
pub mod contact;
pub mod doctor;
pub mod hospital;
pub mod insurance;
pub mod panel;
pub mod surgery;
pub mod upload;

/// A resource the dashboard can list, open and delete.
pub trait Listed: Send + Sync + 'static {
    /// Upstream path prefix, e.g. `/doctor`.
    const PATH: &'static str;
    /// Human-readable singular, used in notices.
    const LABEL: &'static str;

    type Record: DeserializeOwned + Serialize + Searchable + Send + Sync + 'static;
}

/// A resource with an add/edit form.
pub trait Editable: Listed {
    type Form: DeserializeOwned + Serialize + Send + Sync + 'static;

    fn validate(form: &Self::Form) -> FormErrors;
}

static RECORD_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").unwrap());

/// `PATH/id`, refusing ids that would leave the resource's own path.
fn record_path<R: Listed>(id: &str) -> Result<String, ClientError> {
    if !RECORD_ID.is_match(id) {
        return Err(ClientError::InvalidId(id.to_string()));
    }
    Ok(format!("{}/{}", R::PATH, id))
}

pub async fn list<R: Listed>(client: &ApiClient) -> Result<Vec<R::Record>, ClientError> {
    client.get(&format!("{}/list", R::PATH)).await
}

pub async fn get<R: Listed>(client: &ApiClient, id: &str) -> Result<R::Record, ClientError> {
    client.get(&record_path::<R>(id)?).await
}

pub async fn remove<R: Listed>(
    client: &ApiClient,
    id: &str,
) -> Result<Envelope<serde_json::Value>, ClientError> {
    client.delete(&record_path::<R>(id)?).await
}

pub async fn create<R: Editable>(
    client: &ApiClient,
    form: &R::Form,
) -> Result<Envelope<R::Record>, ClientError> {
    client.post(R::PATH, form).await
}

pub async fn update<R: Editable>(
    client: &ApiClient,
    id: &str,
    form: &R::Form,
) -> Result<Envelope<R::Record>, ClientError> {
    client.put(&record_path::<R>(id)?, form).await
}

/// Joins the non-empty parts with a space, for `Searchable` impls.
pub(crate) fn search_text<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> String {
    parts
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
