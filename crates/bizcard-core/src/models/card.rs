//! Business card data models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A saved or editable business card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactRecord {
    /// Document id assigned by the record store. Absent until first save.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Person's name.
    pub name: String,

    /// Company or organization.
    pub company: String,

    /// Email address.
    pub email: String,

    /// Phone number, as printed.
    pub phone: String,

    /// Free-form notes.
    pub memo: String,

    /// Where the card was received.
    pub meeting_place: String,

    /// When the card was received.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_date: Option<NaiveDate>,

    /// Reference to the captured card image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_image: Option<String>,

    /// Reference to the captured face photo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_photo: Option<String>,

    /// Creation time reported by the record store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<DateTime<Utc>>,
}

impl ContactRecord {
    /// Create an editable record pre-populated from an OCR draft.
    ///
    /// Store-assigned fields (`id`, `registered_at`) stay empty.
    pub fn from_draft(draft: &CardDraft) -> Self {
        Self {
            name: draft.name.clone(),
            company: draft.company.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            ..Self::default()
        }
    }

    /// Drop store-assigned fields so the record can be sent as a new document.
    pub fn without_store_fields(mut self) -> Self {
        self.id = None;
        self.registered_at = None;
        self
    }

    /// Check whether the record has been saved.
    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }
}

/// Unconfirmed fields extracted from recognized card text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDraft {
    /// Best-guess name line.
    pub name: String,

    /// Best-guess company line.
    pub company: String,

    /// Best-guess email line.
    pub email: String,

    /// Best-guess phone line.
    pub phone: String,

    /// Full recognized text, unmodified.
    pub raw_text: String,
}

impl CardDraft {
    /// Check whether no field was extracted.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.company.is_empty()
            && self.email.is_empty()
            && self.phone.is_empty()
    }
}
