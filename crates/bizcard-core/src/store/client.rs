//! Record store sync client.

use std::sync::{PoisonError, RwLock};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use crate::error::{BizcardError, Operation, SyncError};
use crate::models::card::ContactRecord;
use crate::models::config::{BizcardConfig, PropertyLabels};

use super::document::{Collection, Page, QueryRequest, QueryResponse};
use super::mapper::RecordMapper;
use super::transport::{HttpTransport, StoreRequest, StoreResponse, StoreTransport};

/// Largest page the store returns per query.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Verifies the collection, creates records and lists them.
///
/// The store may echo a collection id in a different form than the one
/// configured (dashed vs. undashed UUID). The first successful verification
/// caches the store's form, and every later call uses it.
///
/// `save_record` creates a new document on every successful call. Retrying a
/// save whose outcome is unknown (e.g. after a timeout) can create duplicates.
pub struct SyncClient<T> {
    transport: T,
    collection_id: String,
    mapper: RecordMapper,
    verified_id: RwLock<Option<String>>,
    page_size: u32,
}

impl SyncClient<HttpTransport> {
    /// Build an HTTP client from configuration.
    pub fn from_config(config: &BizcardConfig) -> Result<Self, BizcardError> {
        config.validate_store()?;
        let transport = HttpTransport::new(&config.store)
            .map_err(|e| BizcardError::Config(e.to_string()))?;
        Ok(Self::new(
            transport,
            config.store.collection_id.clone(),
            config.properties.clone(),
        ))
    }
}

impl<T: StoreTransport> SyncClient<T> {
    /// Create a client over a transport.
    pub fn new(transport: T, collection_id: impl Into<String>, labels: PropertyLabels) -> Self {
        Self {
            transport,
            collection_id: collection_id.into(),
            mapper: RecordMapper::new(labels),
            verified_id: RwLock::new(None),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set the query page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, DEFAULT_PAGE_SIZE);
        self
    }

    /// Collection id as configured.
    pub fn configured_collection_id(&self) -> &str {
        &self.collection_id
    }

    /// Store-confirmed collection id, once verified.
    pub fn verified_collection_id(&self) -> Option<String> {
        self.verified_id
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Mapper used for documents.
    pub fn mapper(&self) -> &RecordMapper {
        &self.mapper
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch collection metadata and cache the store-confirmed id.
    pub async fn describe_collection(&self) -> Result<Collection, SyncError> {
        let op = Operation::VerifyCollection;
        let request = StoreRequest::get(format!("databases/{}", self.collection_id));
        let response = self.call(op, request).await?;
        let collection: Collection = decode(op, &response)?;

        info!("Collection verified: {}", collection.id);
        debug!(
            "Configured id: {}, verified id: {}",
            self.collection_id, collection.id
        );
        self.log_schema(&collection);

        *self
            .verified_id
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(collection.id.clone());

        Ok(collection)
    }

    /// Verify the configured collection and return its store-confirmed id.
    pub async fn verify_collection(&self) -> Result<String, SyncError> {
        self.describe_collection().await.map(|c| c.id)
    }

    /// Create a document for the record and return its id.
    pub async fn save_record(&self, record: &ContactRecord) -> Result<String, SyncError> {
        let op = Operation::SaveRecord;
        let collection_id = self.resolve_collection_id().await;

        let request = self.mapper.create_request(&collection_id, record);
        debug!(
            "Creating document in {} with properties {:?}",
            collection_id,
            request.properties.keys().collect::<Vec<_>>()
        );

        let response = self
            .call(op, StoreRequest::post("pages", encode(op, &request)?))
            .await?;
        let page: Page = decode(op, &response)?;

        info!("Saved record {}", page.id);
        Ok(page.id)
    }

    /// Fetch every record, most recent meeting first.
    ///
    /// Ordering of records without a meeting date is up to the store.
    pub async fn list_records(&self) -> Result<Vec<ContactRecord>, SyncError> {
        let op = Operation::ListRecords;
        let collection_id = self.resolve_collection_id().await;
        let path = format!("databases/{}/query", collection_id);

        let mut records = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let query = QueryRequest {
                sorts: vec![self.mapper.meeting_date_sort()],
                start_cursor: cursor.clone(),
                page_size: Some(self.page_size),
            };
            let response = self
                .call(op, StoreRequest::post(path.clone(), encode(op, &query)?))
                .await?;
            let page: QueryResponse = decode(op, &response)?;

            debug!("Query returned {} documents", page.results.len());
            records.extend(self.mapper.from_pages(&page.results));

            if !page.has_more {
                break;
            }
            match page.next_cursor {
                Some(next) if cursor.as_deref() != Some(next.as_str()) => cursor = Some(next),
                Some(next) => {
                    return Err(SyncError::Mapping {
                        operation: op,
                        message: format!("store repeated cursor {}", next),
                    });
                }
                None => {
                    warn!("Store reported more results without a cursor; stopping");
                    break;
                }
            }
        }

        info!("Loaded {} records", records.len());
        Ok(records)
    }

    /// Cached id, else the id from one verification attempt, else the
    /// configured id.
    async fn resolve_collection_id(&self) -> String {
        if let Some(id) = self.verified_collection_id() {
            return id;
        }

        match self.verify_collection().await {
            Ok(id) => id,
            Err(e) => {
                warn!(
                    "Collection verification failed, using configured id {}: {}",
                    self.collection_id, e
                );
                self.collection_id.clone()
            }
        }
    }

    async fn call(&self, op: Operation, request: StoreRequest) -> Result<StoreResponse, SyncError> {
        let response = self.transport.send(request).await.map_err(|e| {
            error!("{} failed: {}", op, e);
            SyncError::Transport {
                operation: op,
                message: e.to_string(),
            }
        })?;

        if !response.is_success() {
            let err = SyncError::rejected(op, response.status, response.body);
            error!("{}", err);
            return Err(err);
        }

        Ok(response)
    }

    fn log_schema(&self, collection: &Collection) {
        for (name, property) in &collection.properties {
            debug!(
                "Property {:?} (type: {})",
                name,
                property.kind.as_deref().unwrap_or("unknown")
            );
        }

        if collection.properties.is_empty() {
            warn!("Collection {} reported no properties", collection.id);
            return;
        }

        for label in self.mapper.labels().all() {
            if !collection.properties.contains_key(label) {
                warn!(
                    "Collection {} has no property {:?}; that field will not be stored",
                    collection.id, label
                );
            }
        }
    }
}

fn encode<B: Serialize>(op: Operation, body: &B) -> Result<serde_json::Value, SyncError> {
    serde_json::to_value(body).map_err(|e| SyncError::Mapping {
        operation: op,
        message: format!("failed to encode request: {}", e),
    })
}

fn decode<D: DeserializeOwned>(op: Operation, response: &StoreResponse) -> Result<D, SyncError> {
    serde_json::from_str(&response.body).map_err(|e| SyncError::Mapping {
        operation: op,
        message: format!("failed to decode response: {}", e),
    })
}
