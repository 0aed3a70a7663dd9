//! Error types for the record store
//!
//! - [`StorageError`]: the backing storage could not read, write or remove a key
//! - [`StoreError`]: a typed store operation failed, or hit a plan limit

use planner_model::{FocusAreaId, IdeaId, PlanWarning};
use std::path::PathBuf;

/// Errors raised by a [`Storage`](crate::Storage) implementation
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// IO error on the file backing a key
    #[error("io error on {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Storage refused the write for lack of space
    #[error("storage quota exceeded writing '{key}'")]
    QuotaExceeded {
        /// Key being written
        key: String,
    },

    /// Storage cannot be used at all
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised by [`RecordStore`](crate::RecordStore) operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Backing storage failed
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Record could not be encoded or decoded
    #[error("serialization error for '{key}': {source}")]
    Serialization {
        /// Key involved
        key: String,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// A stored record exists but cannot be read back; it is left untouched
    #[error("stored record '{key}' is unreadable: {reason}")]
    Corrupt {
        /// Key involved
        key: String,
        /// Parse or shape failure
        reason: String,
    },

    /// No focus area with this id
    #[error("focus area not found: {0}")]
    FocusAreaNotFound(FocusAreaId),

    /// No whimsy item with this id
    #[error("whimsy item not found: {0}")]
    WhimsyNotFound(IdeaId),

    /// No legacy quarterly item with this id
    #[error("quarterly item not found: {0}")]
    QuarterlyItemNotFound(IdeaId),

    /// The edit would exceed a plan limit and was not applied
    #[error("{0}")]
    Limit(#[from] PlanWarning),

    /// Some keys could not be removed; the store now holds a mix of old and cleared records
    #[error("failed to clear keys: {keys:?}")]
    PartialClear {
        /// Keys still present
        keys: Vec<String>,
    },
}

impl StoreError {
    /// Create serialization error for key
    pub fn serialization(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            key: key.into(),
            source,
        }
    }

    /// Create corrupt-record error for key
    pub fn corrupt(key: impl Into<String>, reason: impl ToString) -> Self {
        Self::Corrupt {
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    /// The plan warning carried by a [`StoreError::Limit`], if any
    #[inline]
    #[must_use]
    pub fn warning(&self) -> Option<PlanWarning> {
        match self {
            Self::Limit(w) => Some(*w),
            _ => None,
        }
    }

    /// Whether the failure came from the backing storage
    #[inline]
    #[must_use]
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::PartialClear { .. })
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
