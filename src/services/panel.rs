// src/services/panel.rs

use serde::{Deserialize, Serialize};

use super::{Editable, Listed, search_text};
use crate::forms::{FormErrors, require};
use crate::listing::Searchable;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernmentPanel {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernmentPanelForm {
    pub name: String,
}

impl Searchable for GovernmentPanel {
    fn search_text(&self) -> String {
        search_text([Some(self.name.as_str())])
    }
}

pub struct GovernmentPanels;

impl Listed for GovernmentPanels {
    // upstream spelling
    const PATH: &'static str = "/goverment-panel";
    const LABEL: &'static str = "Government panel";
    type Record = GovernmentPanel;
}

impl Editable for GovernmentPanels {
    type Form = GovernmentPanelForm;

    fn validate(form: &GovernmentPanelForm) -> FormErrors {
        let mut errors = FormErrors::new();
        require(&mut errors, "name", &form.name, "Panel name is required");
        errors
    }
}
