//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// In-match player number, as assigned by the replay decoder (1-based).
pub type PlayerId = u8;

/// Decoder-assigned unit identifier.
pub type UnitId = u32;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// A control group index outside 0-9.
    #[error("control group must be between 0 and 9, got {value}")]
    ControlGroupOutOfRange { value: u8 },
}

/// A playable race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Race {
    Protoss,
    Terran,
    Zerg,
}

impl Race {
    /// All races, in catalog order.
    pub const ALL: [Self; 3] = [Self::Protoss, Self::Terran, Self::Zerg];

    /// Canonical race name as it appears in replays.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Protoss => "Protoss",
            Self::Terran => "Terran",
            Self::Zerg => "Zerg",
        }
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated replay name.
    ///
    /// Usually the file name of the recording the match was decoded from.
    /// Used verbatim as the `replay_name` field of every statistics record.
    ReplayName, "replay name"
);

/// A control group slot in \[0, 9\].
///
/// Slot 0 exists in game but is excluded from group snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ControlGroupIndex(u8);

impl ControlGroupIndex {
    /// Highest valid slot.
    pub const MAX: u8 = 9;

    /// Creates a new index after validation.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if value > Self::MAX {
            return Err(ValidationError::ControlGroupOutOfRange { value });
        }
        Ok(Self(value))
    }

    /// Returns the inner slot number.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Whether this slot is one of the numbered groups 1-9.
    #[must_use]
    pub const fn is_numbered(self) -> bool {
        self.0 >= 1
    }
}

impl TryFrom<u8> for ControlGroupIndex {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ControlGroupIndex> for u8 {
    fn from(index: ControlGroupIndex) -> Self {
        index.0
    }
}

impl fmt::Display for ControlGroupIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
