//! Typed ID wrappers for domain entities.
//!
//! Ids are opaque strings. Freshly generated ids are 26 lowercase base32
//! characters taken from a v7 UUID, so they sort roughly by creation time.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use uuid::Uuid;

/// Length of a generated id.
pub const ID_LENGTH: usize = 26;

const ID_ALPHABET: &[u8; 32] = b"abcdefghijklmnopqrstuvwxyz234567";

/// Generates a new 26-character id.
#[must_use]
pub fn new_id() -> String {
    let mut value = Uuid::now_v7().as_u128();
    let mut encoded = [0u8; ID_LENGTH];
    for slot in encoded.iter_mut().rev() {
        *slot = ID_ALPHABET[(value & 0x1f) as usize];
        value >>= 5;
    }
    encoded.iter().map(|&b| char::from(b)).collect()
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing id.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generates a fresh id.
            #[must_use]
            pub fn generate() -> Self {
                Self(new_id())
            }

            /// Returns the id as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// A strongly-typed wrapper for channel IDs.
    ChannelId
);

string_id!(
    /// A strongly-typed wrapper for user IDs.
    UserId
);

string_id!(
    /// A strongly-typed wrapper for team IDs.
    TeamId
);

string_id!(
    /// A strongly-typed wrapper for post IDs.
    PostId
);
