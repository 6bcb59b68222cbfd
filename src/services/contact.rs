// src/services/contact.rs
//
// Contact-form submissions. Read-only apart from delete.

use serde::{Deserialize, Serialize};

use super::{Listed, search_text};
use crate::listing::Searchable;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Searchable for Contact {
    fn search_text(&self) -> String {
        search_text([
            Some(self.name.as_str()),
            self.email.as_deref(),
            self.phone.as_deref(),
            self.message.as_deref(),
        ])
    }
}

pub struct Contacts;

impl Listed for Contacts {
    const PATH: &'static str = "/contact";
    const LABEL: &'static str = "Contact";
    type Record = Contact;
}
