// src/services/doctor.rs

use serde::{Deserialize, Serialize};

use super::{Editable, Listed, search_text};
use crate::forms::{FormErrors, is_blank, is_valid_phone, require};
use crate::listing::Searchable;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hospital: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorForm {
    pub name: String,
    /// Hospital id.
    pub hospital: String,
    #[serde(default)]
    pub specialization: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Searchable for Doctor {
    fn search_text(&self) -> String {
        // hospital is either an id or a populated object
        let hospital = self.hospital.as_ref().and_then(|h| match h {
            serde_json::Value::String(s) => Some(s.as_str()),
            other => other.get("name").and_then(serde_json::Value::as_str),
        });
        search_text([
            Some(self.name.as_str()),
            self.specialization.as_deref(),
            hospital,
        ])
    }
}

pub struct Doctors;

impl Listed for Doctors {
    const PATH: &'static str = "/doctor";
    const LABEL: &'static str = "Doctor";
    type Record = Doctor;
}

impl Editable for Doctors {
    type Form = DoctorForm;

    fn validate(form: &DoctorForm) -> FormErrors {
        let mut errors = FormErrors::new();
        require(&mut errors, "name", &form.name, "Doctor name is required");
        require(&mut errors, "hospital", &form.hospital, "Hospital is required");
        if !is_blank(&form.phone) && !is_valid_phone(&form.phone) {
            errors.insert("phone", "Phone number must be 10 digits".into());
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> DoctorForm {
        DoctorForm {
            name: "Dr. Mehta".into(),
            hospital: "h1".into(),
            specialization: "Cardiology".into(),
            phone: String::new(),
            experience: None,
            image: None,
        }
    }

    #[test]
    fn phone_is_optional_but_checked() {
        assert!(Doctors::validate(&form()).is_empty());

        let mut bad = form();
        bad.phone = "12345".into();
        let errors = Doctors::validate(&bad);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("phone"));
    }

    #[test]
    fn hospital_reference_required() {
        let mut f = form();
        f.hospital = " ".into();
        assert!(Doctors::validate(&f).contains_key("hospital"));
    }

    #[test]
    fn search_text_uses_populated_hospital_name() {
        let doc: Doctor = serde_json::from_value(serde_json::json!({
            "_id": "d1",
            "name": "Dr. Rao",
            "hospital": { "_id": "h1", "name": "Apollo" }
        }))
        .unwrap();
        assert_eq!(doc.id, "d1");
        assert_eq!(doc.search_text(), "Dr. Rao Apollo");
    }
}
