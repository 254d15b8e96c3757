//! Adapters implementing the domain ports.

pub mod in_memory;
pub mod json_file;
pub mod openweather;

use crate::config::StorageBackend;
use crate::domain::ports::MessageStoreBox;
use crate::error::Result;
use in_memory::InMemoryMessageStore;
use json_file::JsonFileMessageStore;

/// Builds the message store selected by configuration.
pub fn open_store(backend: &StorageBackend) -> Result<MessageStoreBox> {
    Ok(match backend {
        StorageBackend::Memory => Box::new(InMemoryMessageStore::new()),
        StorageBackend::JsonFile(path) => Box::new(JsonFileMessageStore::open(path)?),
    })
}
