//! Life Planner Record Store
//!
//! Persists the planner's records, one JSON document per key, behind a
//! small [`Storage`] collaborator.
//!
//! # Architecture
//!
//! ```text
//! RecordStore<S>  (typed get/update, defaults, shallow merge, export)
//!       │
//!       ▼
//! Storage         (get/set/remove of JSON text by key)
//!   ├── MemoryStorage
//!   └── FileStorage  (one <key>.json per record)
//! ```
//!
//! Reads never fail: a missing, unreadable or unparsable record yields
//! the record's default and a logged warning. Writes return a
//! [`StoreResult`] so callers can detect a lost write.
//!
//! # Example
//!
//! ```rust,ignore
//! use planner_store::{MemoryStorage, RecordStore};
//! use planner_model::UserPatch;
//!
//! let store = RecordStore::new(MemoryStorage::new());
//! store.set_user(&UserPatch::name("Alex"))?;
//! assert_eq!(store.user().name, "Alex");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod export;
pub mod file;
pub mod keys;
pub mod storage;
pub mod store;

pub use error::{StorageError, StoreError, StoreResult};
pub use export::ExportDocument;
pub use file::FileStorage;
pub use keys::RecordKey;
pub use storage::{MemoryStorage, Storage};
pub use store::RecordStore;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
