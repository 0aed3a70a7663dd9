//! Record identifiers
//!
//! New records get a UUID v4. Identifiers written by older data
//! (millisecond timestamps, `timestamp-suffix` strings) are accepted verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh random identifier
            #[inline]
            #[must_use]
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            /// Borrow the identifier text
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Identifier of an [`Idea`](crate::Idea), whimsy item or legacy quarterly item
    IdeaId
);

string_id!(
    /// Identifier of a [`FocusArea`](crate::FocusArea)
    FocusAreaId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(IdeaId::generate(), IdeaId::generate());
    }

    #[test]
    fn legacy_ids_round_trip_as_plain_strings() {
        let id: FocusAreaId = serde_json::from_str("\"1700000000000-abc123xyz\"").unwrap();
        assert_eq!(id.as_str(), "1700000000000-abc123xyz");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"1700000000000-abc123xyz\"");
    }
}
