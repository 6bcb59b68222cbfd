// src/services/appointment.rs

use serde::{Deserialize, Serialize};

use super::{Listed, search_text};
use crate::listing::Searchable;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hospital: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Searchable for Appointment {
    fn search_text(&self) -> String {
        search_text([
            Some(self.name.as_str()),
            self.phone.as_deref(),
            self.email.as_deref(),
            self.status.as_deref(),
        ])
    }
}

pub struct Appointments;

impl Listed for Appointments {
    const PATH: &'static str = "/appointment";
    const LABEL: &'static str = "Appointment";
    type Record = Appointment;
}
