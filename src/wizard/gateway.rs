// src/wizard/gateway.rs
//
// Everything the wizard needs from the outside world.

use async_trait::async_trait;
use serde::Serialize;

use super::draft::HospitalDraft;
use crate::client::{ApiClient, ClientError};
use crate::services::{
    self, category::HospitalCategories, hospital, insurance::CashlessInsuranceCompanies,
    insurance::InsuranceCompanies, panel::GovernmentPanels, upload::UploadFile,
};

/// One selectable entry in a dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupItem {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Created {
    pub id: Option<String>,
    pub message: Option<String>,
}

#[async_trait]
pub trait HospitalGateway: Send + Sync {
    async fn upload_image(&self, file: UploadFile) -> Result<String, ClientError>;
    async fn hospital_categories(&self) -> Result<Vec<LookupItem>, ClientError>;
    async fn insurance_companies(&self) -> Result<Vec<LookupItem>, ClientError>;
    async fn cashless_companies(&self) -> Result<Vec<LookupItem>, ClientError>;
    async fn government_panels(&self) -> Result<Vec<LookupItem>, ClientError>;
    async fn create_hospital(&self, draft: &HospitalDraft) -> Result<Created, ClientError>;
}

#[async_trait]
impl HospitalGateway for ApiClient {
    async fn upload_image(&self, file: UploadFile) -> Result<String, ClientError> {
        services::upload::upload_image(self, file).await
    }

    async fn hospital_categories(&self) -> Result<Vec<LookupItem>, ClientError> {
        let rows = services::list::<HospitalCategories>(self).await?;
        Ok(rows
            .into_iter()
            .map(|c| LookupItem { id: c.id, name: c.name })
            .collect())
    }

    async fn insurance_companies(&self) -> Result<Vec<LookupItem>, ClientError> {
        let rows = services::list::<InsuranceCompanies>(self).await?;
        Ok(rows
            .into_iter()
            .map(|c| LookupItem { id: c.id, name: c.name })
            .collect())
    }

    async fn cashless_companies(&self) -> Result<Vec<LookupItem>, ClientError> {
        let rows = services::list::<CashlessInsuranceCompanies>(self).await?;
        Ok(rows
            .into_iter()
            .map(|c| LookupItem { id: c.id, name: c.name })
            .collect())
    }

    async fn government_panels(&self) -> Result<Vec<LookupItem>, ClientError> {
        let rows = services::list::<GovernmentPanels>(self).await?;
        Ok(rows
            .into_iter()
            .map(|p| LookupItem { id: p.id, name: p.name })
            .collect())
    }

    async fn create_hospital(&self, draft: &HospitalDraft) -> Result<Created, ClientError> {
        let env = hospital::create(self, draft).await?;
        let id = env.data.as_ref().and_then(|d| {
            d.get("_id")
                .or_else(|| d.get("id"))
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        });
        Ok(Created {
            id,
            message: env.message,
        })
    }
}
