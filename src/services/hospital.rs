// src/services/hospital.rs

use serde::{Deserialize, Serialize};

use super::{Editable, Listed, search_text};
use crate::client::{ApiClient, ClientError, Envelope};
use crate::forms::FormErrors;
use crate::listing::Searchable;
use crate::wizard::draft::HospitalDraft;
use crate::wizard::validation::{validate_step1, validate_step2};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Searchable for Hospital {
    fn search_text(&self) -> String {
        search_text([
            Some(self.name.as_str()),
            self.city.as_deref(),
            self.location.as_deref(),
            self.email.as_deref(),
            self.phone.as_deref(),
        ])
    }
}

pub struct Hospitals;

impl Listed for Hospitals {
    const PATH: &'static str = "/hospital";
    const LABEL: &'static str = "Hospital";
    type Record = Hospital;
}

/// Editing a listed hospital re-checks everything the wizard checks.
impl Editable for Hospitals {
    type Form = HospitalDraft;

    fn validate(form: &HospitalDraft) -> FormErrors {
        validate_step1(form)
            .into_iter()
            .chain(validate_step2(form))
            .map(|(key, message)| (key.as_str(), message))
            .collect()
    }
}

/// POST /hospital with the whole wizard draft flattened into one payload.
pub async fn create(
    client: &ApiClient,
    draft: &HospitalDraft,
) -> Result<Envelope<serde_json::Value>, ClientError> {
    client.post(Hospitals::PATH, draft).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::validation::tests::filled_step2;

    #[test]
    fn test_edit_form_checks_both_steps() {
        let errors = Hospitals::validate(&HospitalDraft::default());
        assert!(errors.contains_key("name"));
        assert!(errors.contains_key("iconUrl"));
        assert!(errors.contains_key("panelList"));
        assert!(errors.contains_key("imageUrls"));

        assert!(Hospitals::validate(&filled_step2()).is_empty());
    }
}
