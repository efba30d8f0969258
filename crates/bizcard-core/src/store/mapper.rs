//! Mapping between contact records and store documents.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::warn;

use crate::models::card::ContactRecord;
use crate::models::config::PropertyLabels;

use super::document::{
    CreatePageRequest, Page, Parent, Properties, PropertyValue, Sort, SortDirection,
};

/// Calendar date format used for date properties.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Converts records to and from documents using a fixed set of labels.
#[derive(Debug, Clone)]
pub struct RecordMapper {
    labels: PropertyLabels,
}

impl RecordMapper {
    /// Create a mapper for the given labels.
    pub fn new(labels: PropertyLabels) -> Self {
        Self { labels }
    }

    /// Labels in use.
    pub fn labels(&self) -> &PropertyLabels {
        &self.labels
    }

    /// Build the property bag for a new document.
    ///
    /// The title is always present. Empty text fields and a missing meeting
    /// date are left out. Image references are never written: local URIs
    /// cannot be dereferenced by the store.
    pub fn to_properties(&self, record: &ContactRecord) -> Properties {
        let mut properties = Properties::new();

        let title = if record.name.is_empty() {
            self.labels.untitled.as_str()
        } else {
            record.name.as_str()
        };
        properties.insert(self.labels.name.clone(), PropertyValue::title(title));

        let texts = [
            (&self.labels.company, &record.company),
            (&self.labels.phone, &record.phone),
            (&self.labels.memo, &record.memo),
            (&self.labels.meeting_place, &record.meeting_place),
        ];
        for (label, value) in texts {
            if !value.is_empty() {
                properties.insert(label.clone(), PropertyValue::rich_text(value.as_str()));
            }
        }

        if !record.email.is_empty() {
            properties.insert(
                self.labels.email.clone(),
                PropertyValue::email(record.email.as_str()),
            );
        }

        if let Some(date) = record.meeting_date {
            properties.insert(
                self.labels.meeting_date.clone(),
                PropertyValue::date(date.format(DATE_FORMAT).to_string()),
            );
        }

        properties
    }

    /// Build a create-document request under the given collection.
    pub fn create_request(&self, collection_id: &str, record: &ContactRecord) -> CreatePageRequest {
        CreatePageRequest {
            parent: Parent {
                database_id: collection_id.to_string(),
            },
            properties: self.to_properties(record),
        }
    }

    /// Sort putting the most recent meeting first.
    pub fn meeting_date_sort(&self) -> Sort {
        Sort {
            property: self.labels.meeting_date.clone(),
            direction: SortDirection::Descending,
        }
    }

    /// Convert a stored document into a record.
    ///
    /// Every field is read independently. A field that is missing or fails to
    /// parse is left empty; the rest of the record is still returned.
    pub fn from_page(&self, page: &Page) -> ContactRecord {
        let prop = |label: &str| page.properties.get(label);
        let rich_text = |label: &str| {
            prop(label)
                .and_then(PropertyValue::first_rich_text)
                .unwrap_or_default()
                .to_string()
        };
        let file_url = |label: &str| {
            prop(label)
                .and_then(PropertyValue::first_file_url)
                .map(str::to_string)
        };

        ContactRecord {
            id: Some(page.id.clone()),
            name: prop(&self.labels.name)
                .and_then(PropertyValue::first_title)
                .unwrap_or_default()
                .to_string(),
            company: rich_text(&self.labels.company),
            email: prop(&self.labels.email)
                .and_then(|p| p.email.clone())
                .unwrap_or_default(),
            phone: rich_text(&self.labels.phone),
            memo: rich_text(&self.labels.memo),
            meeting_place: rich_text(&self.labels.meeting_place),
            meeting_date: prop(&self.labels.meeting_date)
                .and_then(|p| p.date.as_ref())
                .and_then(|d| parse_meeting_date(&d.start)),
            card_image: file_url(&self.labels.card_image),
            face_photo: file_url(&self.labels.face_photo),
            registered_at: page
                .created_time
                .as_deref()
                .and_then(parse_created_time),
        }
    }

    /// Convert a list of documents, keeping their order.
    pub fn from_pages(&self, pages: &[Page]) -> Vec<ContactRecord> {
        pages.iter().map(|page| self.from_page(page)).collect()
    }
}

/// Parse a date property start as a calendar date.
///
/// A date-time start yields its leading date.
pub fn parse_meeting_date(value: &str) -> Option<NaiveDate> {
    let parsed = NaiveDate::parse_from_str(value, DATE_FORMAT).or_else(|err| {
        value
            .get(..10)
            .filter(|_| value.len() > 10)
            .ok_or(err)
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, DATE_FORMAT))
    });

    match parsed {
        Ok(date) => Some(date),
        Err(e) => {
            warn!("Failed to parse meeting date {:?}: {}", value, e);
            None
        }
    }
}

/// Parse a document creation timestamp (RFC 3339) as UTC.
pub fn parse_created_time(value: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(time) => Some(time.with_timezone(&Utc)),
        Err(e) => {
            warn!("Failed to parse created_time {:?}: {}", value, e);
            None
        }
    }
}
