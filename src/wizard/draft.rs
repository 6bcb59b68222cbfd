// src/wizard/draft.rs
//
// The unsaved hospital record. Serializes directly to the POST /hospital payload.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Cap shared by the step-1 gallery and the step-2 image list.
pub const MAX_IMAGES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Weekday {
    #[default]
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Weekday::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown weekday: {s}"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingEntry {
    pub day: Weekday,
    /// Free-form range, e.g. "09:00 AM - 05:00 PM".
    pub time: String,
}

/// Editable text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DraftField {
    Name,
    Category,
    Phone,
    Whatsapp,
    Email,
    City,
    Location,
    MapLink,
    Details,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimingField {
    Day,
    Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssociationKind {
    /// Treatment / insurance providers.
    Treatment,
    Cashless,
    Panel,
}

impl AssociationKind {
    pub fn label(self) -> &'static str {
        match self {
            AssociationKind::Treatment => "insurance company",
            AssociationKind::Cashless => "cashless insurance company",
            AssociationKind::Panel => "government panel",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HospitalDraft {
    pub name: String,
    /// Category id.
    pub category: String,
    pub phone: String,
    pub whatsapp: String,
    pub email: String,
    pub city: String,
    pub location: String,
    pub map_link: String,
    pub icon_url: String,
    pub gallery_images: Vec<String>,
    pub timing: Vec<TimingEntry>,
    pub treatment_list: Vec<String>,
    pub cashless_list: Vec<String>,
    pub panel_list: Vec<String>,
    pub image_urls: Vec<String>,
    pub details: String,
}

impl Default for HospitalDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: String::new(),
            phone: String::new(),
            whatsapp: String::new(),
            email: String::new(),
            city: String::new(),
            location: String::new(),
            map_link: String::new(),
            icon_url: String::new(),
            gallery_images: Vec::new(),
            // one editable row from the start
            timing: vec![TimingEntry::default()],
            treatment_list: Vec::new(),
            cashless_list: Vec::new(),
            panel_list: Vec::new(),
            image_urls: Vec::new(),
            details: String::new(),
        }
    }
}

impl HospitalDraft {
    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Category => &self.category,
            DraftField::Phone => &self.phone,
            DraftField::Whatsapp => &self.whatsapp,
            DraftField::Email => &self.email,
            DraftField::City => &self.city,
            DraftField::Location => &self.location,
            DraftField::MapLink => &self.map_link,
            DraftField::Details => &self.details,
        }
    }

    pub fn set_field(&mut self, field: DraftField, value: String) {
        let slot = match field {
            DraftField::Name => &mut self.name,
            DraftField::Category => &mut self.category,
            DraftField::Phone => &mut self.phone,
            DraftField::Whatsapp => &mut self.whatsapp,
            DraftField::Email => &mut self.email,
            DraftField::City => &mut self.city,
            DraftField::Location => &mut self.location,
            DraftField::MapLink => &mut self.map_link,
            DraftField::Details => &mut self.details,
        };
        *slot = value;
    }

    pub fn append_gallery(&mut self, urls: impl IntoIterator<Item = String>) {
        append_capped(&mut self.gallery_images, urls);
    }

    pub fn append_images(&mut self, urls: impl IntoIterator<Item = String>) {
        append_capped(&mut self.image_urls, urls);
    }

    pub fn add_timing_row(&mut self) {
        self.timing.push(TimingEntry::default());
    }

    /// Returns false when the row is the last one or out of range.
    pub fn remove_timing_row(&mut self, index: usize) -> bool {
        if self.timing.len() <= 1 || index >= self.timing.len() {
            return false;
        }
        self.timing.remove(index);
        true
    }

    pub fn update_timing(
        &mut self,
        index: usize,
        field: TimingField,
        value: &str,
    ) -> Result<(), String> {
        let row = self
            .timing
            .get_mut(index)
            .ok_or_else(|| format!("no timing row at index {index}"))?;
        match field {
            TimingField::Day => row.day = value.parse()?,
            TimingField::Time => row.time = value.to_string(),
        }
        Ok(())
    }

    pub fn associations(&self, kind: AssociationKind) -> &[String] {
        match kind {
            AssociationKind::Treatment => &self.treatment_list,
            AssociationKind::Cashless => &self.cashless_list,
            AssociationKind::Panel => &self.panel_list,
        }
    }

    fn associations_mut(&mut self, kind: AssociationKind) -> &mut Vec<String> {
        match kind {
            AssociationKind::Treatment => &mut self.treatment_list,
            AssociationKind::Cashless => &mut self.cashless_list,
            AssociationKind::Panel => &mut self.panel_list,
        }
    }

    /// No-op (returns false) when the id is blank or already present.
    pub fn add_association(&mut self, kind: AssociationKind, id: &str) -> bool {
        let id = id.trim();
        let list = self.associations_mut(kind);
        if id.is_empty() || list.iter().any(|existing| existing == id) {
            return false;
        }
        list.push(id.to_string());
        true
    }

    pub fn remove_association(&mut self, kind: AssociationKind, index: usize) -> Option<String> {
        let list = self.associations_mut(kind);
        (index < list.len()).then(|| list.remove(index))
    }
}

fn append_capped(list: &mut Vec<String>, urls: impl IntoIterator<Item = String>) {
    list.extend(urls);
    list.truncate(MAX_IMAGES);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_one_timing_row() {
        let draft = HospitalDraft::default();
        assert_eq!(draft.timing.len(), 1);
        assert!(draft.gallery_images.is_empty());
    }

    #[test]
    fn last_timing_row_is_never_removed() {
        let mut draft = HospitalDraft::default();
        assert!(!draft.remove_timing_row(0));
        assert_eq!(draft.timing.len(), 1);

        draft.add_timing_row();
        draft.add_timing_row();
        assert!(draft.remove_timing_row(1));
        assert!(draft.remove_timing_row(0));
        assert!(!draft.remove_timing_row(0));
        assert_eq!(draft.timing.len(), 1);
    }

    #[test]
    fn remove_timing_out_of_range_is_noop() {
        let mut draft = HospitalDraft::default();
        draft.add_timing_row();
        assert!(!draft.remove_timing_row(5));
        assert_eq!(draft.timing.len(), 2);
    }

    #[test]
    fn update_timing_parses_day() {
        let mut draft = HospitalDraft::default();
        draft.update_timing(0, TimingField::Day, "saturday").unwrap();
        draft
            .update_timing(0, TimingField::Time, "10:00 AM - 2:00 PM")
            .unwrap();
        assert_eq!(draft.timing[0].day, Weekday::Saturday);
        assert_eq!(draft.timing[0].time, "10:00 AM - 2:00 PM");

        assert!(draft.update_timing(0, TimingField::Day, "Funday").is_err());
        assert!(draft.update_timing(3, TimingField::Time, "x").is_err());
        assert_eq!(draft.timing[0].day, Weekday::Saturday);
    }

    #[test]
    fn association_add_is_idempotent() {
        let mut draft = HospitalDraft::default();
        for kind in [
            AssociationKind::Treatment,
            AssociationKind::Cashless,
            AssociationKind::Panel,
        ] {
            assert!(draft.add_association(kind, "a1"));
            assert!(draft.add_association(kind, "a2"));
            assert!(!draft.add_association(kind, "a1"));
            assert!(!draft.add_association(kind, " "));
            assert_eq!(draft.associations(kind), ["a1", "a2"]);
        }
    }

    #[test]
    fn remove_association_by_index() {
        let mut draft = HospitalDraft::default();
        draft.add_association(AssociationKind::Panel, "p1");
        draft.add_association(AssociationKind::Panel, "p2");
        assert_eq!(
            draft.remove_association(AssociationKind::Panel, 0).as_deref(),
            Some("p1")
        );
        assert_eq!(draft.remove_association(AssociationKind::Panel, 4), None);
        assert_eq!(draft.panel_list, ["p2"]);
    }

    #[test]
    fn gallery_truncates_to_cap() {
        let mut draft = HospitalDraft::default();
        draft.append_gallery((0..7).map(|i| format!("http://x/{i}.png")));
        draft.append_gallery((7..14).map(|i| format!("http://x/{i}.png")));
        assert_eq!(draft.gallery_images.len(), MAX_IMAGES);
        assert_eq!(draft.gallery_images[0], "http://x/0.png");
        assert_eq!(draft.gallery_images[9], "http://x/9.png");
    }

    #[test]
    fn payload_uses_upstream_names() {
        let mut draft = HospitalDraft::default();
        draft.add_association(AssociationKind::Treatment, "t1");
        draft.append_images(["http://x/a.png".to_string()]);
        let payload = serde_json::to_value(&draft).unwrap();

        assert_eq!(payload["treatmentList"], serde_json::json!(["t1"]));
        assert_eq!(payload["cashlessList"], serde_json::json!([]));
        assert_eq!(payload["panelList"], serde_json::json!([]));
        assert_eq!(payload["imageUrls"], serde_json::json!(["http://x/a.png"]));
        assert_eq!(payload["timing"][0]["day"], "Monday");
        assert!(payload.get("mapLink").is_some());
    }
}
