//! Record store synchronization.
//!
//! - [`document`]: wire types of the store API
//! - [`mapper`]: contact record to document mapping
//! - [`transport`]: HTTP seam
//! - [`client`]: verify, save and list operations

pub mod client;
pub mod document;
pub mod mapper;
pub mod transport;

pub use client::SyncClient;
pub use document::{Collection, Page, Properties, PropertyValue};
pub use mapper::RecordMapper;
pub use transport::{HttpTransport, StoreRequest, StoreResponse, StoreTransport};
