// src/wizard/validation.rs
//
// Transition guards. Pure functions over the draft.

use std::collections::BTreeMap;

use serde::Serialize;

use super::draft::{AssociationKind, DraftField, HospitalDraft};
use crate::forms::{is_blank, is_valid_email, is_valid_phone};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    Name,
    Category,
    Phone,
    Whatsapp,
    Email,
    City,
    Location,
    MapLink,
    Details,
    IconUrl,
    TreatmentList,
    CashlessList,
    PanelList,
    ImageUrls,
}

impl FieldKey {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKey::Name => "name",
            FieldKey::Category => "category",
            FieldKey::Phone => "phone",
            FieldKey::Whatsapp => "whatsapp",
            FieldKey::Email => "email",
            FieldKey::City => "city",
            FieldKey::Location => "location",
            FieldKey::MapLink => "mapLink",
            FieldKey::Details => "details",
            FieldKey::IconUrl => "iconUrl",
            FieldKey::TreatmentList => "treatmentList",
            FieldKey::CashlessList => "cashlessList",
            FieldKey::PanelList => "panelList",
            FieldKey::ImageUrls => "imageUrls",
        }
    }
}

impl From<DraftField> for FieldKey {
    fn from(field: DraftField) -> Self {
        match field {
            DraftField::Name => FieldKey::Name,
            DraftField::Category => FieldKey::Category,
            DraftField::Phone => FieldKey::Phone,
            DraftField::Whatsapp => FieldKey::Whatsapp,
            DraftField::Email => FieldKey::Email,
            DraftField::City => FieldKey::City,
            DraftField::Location => FieldKey::Location,
            DraftField::MapLink => FieldKey::MapLink,
            DraftField::Details => FieldKey::Details,
        }
    }
}

impl From<AssociationKind> for FieldKey {
    fn from(kind: AssociationKind) -> Self {
        match kind {
            AssociationKind::Treatment => FieldKey::TreatmentList,
            AssociationKind::Cashless => FieldKey::CashlessList,
            AssociationKind::Panel => FieldKey::PanelList,
        }
    }
}

pub type FieldErrors = BTreeMap<FieldKey, String>;

fn check_phone(errors: &mut FieldErrors, key: FieldKey, value: &str, label: &str) {
    if is_blank(value) {
        errors.insert(key, format!("{label} is required"));
    } else if !is_valid_phone(value) {
        errors.insert(key, format!("{label} must be 10 digits"));
    }
}

fn require(errors: &mut FieldErrors, key: FieldKey, value: &str, message: &str) {
    if is_blank(value) {
        errors.insert(key, message.to_string());
    }
}

pub fn validate_step1(draft: &HospitalDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    require(&mut errors, FieldKey::Name, &draft.name, "Hospital name is required");
    require(&mut errors, FieldKey::Category, &draft.category, "Category is required");
    check_phone(&mut errors, FieldKey::Phone, &draft.phone, "Phone number");
    check_phone(&mut errors, FieldKey::Whatsapp, &draft.whatsapp, "WhatsApp number");

    if is_blank(&draft.email) {
        errors.insert(FieldKey::Email, "Email is required".into());
    } else if !is_valid_email(&draft.email) {
        errors.insert(FieldKey::Email, "Enter a valid email address".into());
    }

    require(&mut errors, FieldKey::IconUrl, &draft.icon_url, "Hospital icon is required");
    require(&mut errors, FieldKey::City, &draft.city, "City is required");
    require(&mut errors, FieldKey::Location, &draft.location, "Location is required");

    errors
}

pub fn validate_step2(draft: &HospitalDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    for kind in [
        AssociationKind::Treatment,
        AssociationKind::Cashless,
        AssociationKind::Panel,
    ] {
        if draft.associations(kind).is_empty() {
            errors.insert(kind.into(), format!("Select at least one {}", kind.label()));
        }
    }
    if draft.image_urls.is_empty() {
        errors.insert(FieldKey::ImageUrls, "Upload at least one image".into());
    }

    errors
}
