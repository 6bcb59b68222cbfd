// src/services/surgery.rs

use serde::{Deserialize, Serialize};

use super::{Editable, Listed, search_text};
use crate::forms::{FormErrors, require};
use crate::listing::Searchable;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Surgery {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurgeryForm {
    pub name: String,
    /// Category id.
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl Searchable for Surgery {
    fn search_text(&self) -> String {
        search_text([Some(self.name.as_str()), self.description.as_deref()])
    }
}

pub struct Surgeries;

impl Listed for Surgeries {
    const PATH: &'static str = "/surgery";
    const LABEL: &'static str = "Surgery";
    type Record = Surgery;
}

impl Editable for Surgeries {
    type Form = SurgeryForm;

    fn validate(form: &SurgeryForm) -> FormErrors {
        let mut errors = FormErrors::new();
        require(&mut errors, "name", &form.name, "Surgery name is required");
        require(&mut errors, "category", &form.category, "Category is required");
        if form.price.is_some_and(|p| p < 0.0) {
            errors.insert("price", "Price cannot be negative".into());
        }
        errors
    }
}
