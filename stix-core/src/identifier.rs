//! Type-prefixed object identifiers
//!
//! Every object carries an identifier of the form `<type>--<uuid-v4>`.
//! Identifiers are issued once by [`Identifier::generate`] and never change.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use uuid::Uuid;

use crate::{ObjectType, ID_SEPARATOR};

static IDENTIFIER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9-]*--[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .unwrap()
});

/// A globally unique, type-prefixed object identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Issue a fresh identifier for an object of the given type.
    ///
    /// The random token comes from `Uuid::new_v4`, which panics if the
    /// system entropy source is unavailable.
    pub fn generate(object_type: ObjectType) -> Self {
        Self(format!("{}{}{}", object_type.as_str(), ID_SEPARATOR, Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The type prefix, if the identifier contains a separator
    pub fn object_type(&self) -> Option<&str> {
        self.0.split_once(ID_SEPARATOR).map(|(prefix, _)| prefix)
    }

    /// Whether the identifier is `<lowercase-type>--<lowercase uuid>`
    pub fn is_well_formed(&self) -> bool {
        IDENTIFIER_REGEX.is_match(&self.0)
    }

    /// Whether the type prefix equals `object_type`
    pub fn is_of_type(&self, object_type: ObjectType) -> bool {
        self.object_type() == Some(object_type.as_str())
    }

    /// Consume into the raw string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// References may point at objects outside the bundle, so raw strings are accepted
impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&Identifier> for Identifier {
    fn from(value: &Identifier) -> Self {
        value.clone()
    }
}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
