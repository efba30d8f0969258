//! Wire types for the record store API.
//!
//! Only the parts of the payloads bizcard reads or writes are modeled;
//! unknown fields are ignored when decoding.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Property values keyed by property label.
pub type Properties = BTreeMap<String, PropertyValue>;

/// A single property value in a document.
///
/// Exactly one of the typed slots is set on outgoing documents. Incoming
/// documents may carry any of them, or none for unsupported property types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Vec<RichText>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rich_text: Option<Vec<RichText>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<FileEntry>>,
}

impl PropertyValue {
    /// A title value holding one text segment.
    pub fn title(content: impl Into<String>) -> Self {
        Self {
            title: Some(vec![RichText::plain(content)]),
            ..Self::default()
        }
    }

    /// A rich-text value holding one text segment.
    pub fn rich_text(content: impl Into<String>) -> Self {
        Self {
            rich_text: Some(vec![RichText::plain(content)]),
            ..Self::default()
        }
    }

    /// An email value.
    pub fn email(address: impl Into<String>) -> Self {
        Self {
            email: Some(address.into()),
            ..Self::default()
        }
    }

    /// A date value with only a start.
    pub fn date(start: impl Into<String>) -> Self {
        Self {
            date: Some(DateValue {
                start: start.into(),
            }),
            ..Self::default()
        }
    }

    /// Text of the first title segment.
    pub fn first_title(&self) -> Option<&str> {
        self.title.as_deref().and_then(first_segment_text)
    }

    /// Text of the first rich-text segment.
    pub fn first_rich_text(&self) -> Option<&str> {
        self.rich_text.as_deref().and_then(first_segment_text)
    }

    /// URL of the first file entry, preferring an external URL.
    pub fn first_file_url(&self) -> Option<&str> {
        let entry = self.files.as_deref()?.first()?;
        entry
            .external
            .as_ref()
            .or(entry.file.as_ref())
            .map(|f| f.url.as_str())
    }
}

fn first_segment_text(segments: &[RichText]) -> Option<&str> {
    segments.first().and_then(RichText::text)
}

/// One segment of title or rich text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,

    /// Rendered text, present on segments read back from the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plain_text: Option<String>,
}

impl RichText {
    /// A plain text segment.
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            text: Some(TextContent {
                content: content.into(),
            }),
            plain_text: None,
        }
    }

    /// Segment text, falling back to the rendered text.
    pub fn text(&self) -> Option<&str> {
        self.text
            .as_ref()
            .map(|t| t.content.as_str())
            .or(self.plain_text.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateValue {
    pub start: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Externally hosted file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<FileUrl>,

    /// File hosted by the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileUrl>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUrl {
    pub url: String,
}

/// Parent reference of a new document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parent {
    pub database_id: String,
}

/// Body of a create-document call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePageRequest {
    pub parent: Parent,
    pub properties: Properties,
}

/// A stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,

    #[serde(default)]
    pub properties: Properties,
}

/// Sort direction for queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Sort on a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub property: String,
    pub direction: SortDirection,
}

/// Body of a query call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<Sort>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub results: Vec<Page>,

    #[serde(default)]
    pub has_more: bool,

    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Collection metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Store-canonical collection id.
    pub id: String,

    #[serde(default)]
    pub title: Vec<RichText>,

    /// Property schema keyed by label.
    #[serde(default)]
    pub properties: BTreeMap<String, SchemaProperty>,
}

impl Collection {
    /// Collection title, joined from its segments.
    pub fn title_text(&self) -> String {
        self.title.iter().filter_map(RichText::text).collect()
    }
}

/// Schema entry of a collection property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaProperty {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}
