// src/services/upload.rs

use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::client::{ApiClient, ClientError};

pub const UPLOAD_PATH: &str = "/upload-images/image";

/// One file picked in the browser, held only until its upload finishes.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }
}

/// Uploads one image and returns its stable URL (`{ success, file: { url } }`).
pub async fn upload_image(client: &ApiClient, file: UploadFile) -> Result<String, ClientError> {
    let mut part = Part::bytes(file.bytes).file_name(file.file_name);
    if let Some(ct) = file.content_type.as_deref() {
        part = part.mime_str(ct)?;
    }
    let form = Form::new().part("image", part);

    let body = client.post_multipart(UPLOAD_PATH, form).await?;
    body.pointer("/file/url")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ClientError::Decode("upload response carried no file url".into()))
}
