// src/services/category.rs

use serde::{Deserialize, Serialize};

use super::{Editable, Listed, search_text};
use crate::forms::{FormErrors, require};
use crate::listing::Searchable;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Searchable for Category {
    fn search_text(&self) -> String {
        search_text([Some(self.name.as_str()), self.description.as_deref()])
    }
}

pub struct HospitalCategories;

impl Listed for HospitalCategories {
    const PATH: &'static str = "/hospital-category";
    const LABEL: &'static str = "Category";
    type Record = Category;
}

impl Editable for HospitalCategories {
    type Form = CategoryForm;

    fn validate(form: &CategoryForm) -> FormErrors {
        let mut errors = FormErrors::new();
        require(&mut errors, "name", &form.name, "Category name is required");
        errors
    }
}
