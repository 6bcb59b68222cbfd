// src/services/insurance.rs
//
// Insurance companies and cashless-insurance companies share one record shape.

use serde::{Deserialize, Serialize};

use super::{Editable, Listed, search_text};
use crate::forms::{FormErrors, require};
use crate::listing::Searchable;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsuranceCompany {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsuranceCompanyForm {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl Searchable for InsuranceCompany {
    fn search_text(&self) -> String {
        search_text([Some(self.name.as_str())])
    }
}

fn validate_company(form: &InsuranceCompanyForm) -> FormErrors {
    let mut errors = FormErrors::new();
    require(&mut errors, "name", &form.name, "Company name is required");
    errors
}

pub struct InsuranceCompanies;

impl Listed for InsuranceCompanies {
    const PATH: &'static str = "/insurance-company";
    const LABEL: &'static str = "Insurance company";
    type Record = InsuranceCompany;
}

impl Editable for InsuranceCompanies {
    type Form = InsuranceCompanyForm;

    fn validate(form: &InsuranceCompanyForm) -> FormErrors {
        validate_company(form)
    }
}

pub struct CashlessInsuranceCompanies;

impl Listed for CashlessInsuranceCompanies {
    const PATH: &'static str = "/cashless-insurance-company";
    const LABEL: &'static str = "Cashless insurance company";
    type Record = InsuranceCompany;
}

impl Editable for CashlessInsuranceCompanies {
    type Form = InsuranceCompanyForm;

    fn validate(form: &InsuranceCompanyForm) -> FormErrors {
        validate_company(form)
    }
}
