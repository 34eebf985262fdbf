//! Customer record types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Maximum length of a customer name, in characters.
pub const MAX_NAME_LENGTH: usize = 100;

/// Globally unique customer identifier.
///
/// Serialized as a hyphenated UUID string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(Uuid);

impl CustomerId {
    /// Generates a new random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for CustomerId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for CustomerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

/// A stored customer.
///
/// Callers always receive owned copies; mutating one has no effect on storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Server-assigned identifier, immutable after creation.
    pub id: CustomerId,
    /// Display name.
    pub name: String,
}

impl Customer {
    /// Creates a customer record.
    pub fn new(id: CustomerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Inbound customer payload used by create and update.
///
/// The `id` is accepted on the wire but never trusted: create always assigns a
/// fresh id, and update takes the id from the request path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerPayload {
    /// Client-supplied id, ignored by storage.
    #[serde(default)]
    pub id: Option<CustomerId>,
    /// Requested name.
    #[serde(default)]
    pub name: Option<String>,
}

impl CustomerPayload {
    /// Creates a payload carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }

    /// Sets the advisory id.
    pub fn with_id(mut self, id: CustomerId) -> Self {
        self.id = Some(id);
        self
    }

    /// Validates the payload and returns the name to store, exactly as sent.
    ///
    /// Surrounding whitespace only matters for the blank and length checks.
    pub fn validated_name(&self) -> Result<String, ValidationError> {
        let name = self
            .name
            .as_deref()
            .ok_or_else(|| ValidationError::MissingRequiredField {
                field: "name".to_string(),
            })?;
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::InvalidField {
                field: "name".to_string(),
                message: "must not be blank".to_string(),
            });
        }

        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(ValidationError::InvalidField {
                field: "name".to_string(),
                message: format!("must be at most {} characters", MAX_NAME_LENGTH),
            });
        }

        Ok(name.to_string())
    }
}
