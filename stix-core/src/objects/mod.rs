//! Object model
//!
//! Domain objects (campaign, indicator, infrastructure, malware, observed
//! data) and relationship objects (relationship, sighting) as one sum type.
//! Shared records live in [`common`]; each kind adds its own fields.

pub mod common;
pub mod kill_chain;
pub mod campaign;
pub mod indicator;
pub mod infrastructure;
pub mod malware;
pub mod observed_data;
pub mod relationship;
pub mod sighting;

pub use common::*;
pub use kill_chain::*;
pub use campaign::*;
pub use indicator::*;
pub use infrastructure::*;
pub use malware::*;
pub use observed_data::*;
pub use relationship::*;
pub use sighting::*;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Identifier, Reference};

/// Literal type tags used in identifiers and in the `type` property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectType {
    Bundle,
    Campaign,
    Indicator,
    Infrastructure,
    Malware,
    ObservedData,
    Relationship,
    Sighting,
}

impl ObjectType {
    /// Every kind a bundle can hold
    pub const OBJECT_KINDS: [ObjectType; 7] = [
        ObjectType::Campaign,
        ObjectType::Indicator,
        ObjectType::Infrastructure,
        ObjectType::Malware,
        ObjectType::ObservedData,
        ObjectType::Relationship,
        ObjectType::Sighting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Bundle => "bundle",
            ObjectType::Campaign => "campaign",
            ObjectType::Indicator => "indicator",
            ObjectType::Infrastructure => "infrastructure",
            ObjectType::Malware => "malware",
            ObjectType::ObservedData => "observed-data",
            ObjectType::Relationship => "relationship",
            ObjectType::Sighting => "sighting",
        }
    }

    /// Relationship and sighting assert links rather than describe entities
    pub fn is_relationship_object(&self) -> bool {
        matches!(self, ObjectType::Relationship | ObjectType::Sighting)
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Any object a bundle can hold, tagged by its `type` property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StixObject {
    Campaign(Campaign),
    Indicator(Indicator),
    Infrastructure(Infrastructure),
    Malware(Malware),
    ObservedData(ObservedData),
    Relationship(Relationship),
    Sighting(Sighting),
}

macro_rules! each_kind {
    ($object:expr, $inner:ident => $body:expr) => {
        match $object {
            StixObject::Campaign($inner) => $body,
            StixObject::Indicator($inner) => $body,
            StixObject::Infrastructure($inner) => $body,
            StixObject::Malware($inner) => $body,
            StixObject::ObservedData($inner) => $body,
            StixObject::Relationship($inner) => $body,
            StixObject::Sighting($inner) => $body,
        }
    };
}

impl StixObject {
    /// Kind of this object
    pub fn object_type(&self) -> ObjectType {
        match self {
            StixObject::Campaign(_) => ObjectType::Campaign,
            StixObject::Indicator(_) => ObjectType::Indicator,
            StixObject::Infrastructure(_) => ObjectType::Infrastructure,
            StixObject::Malware(_) => ObjectType::Malware,
            StixObject::ObservedData(_) => ObjectType::ObservedData,
            StixObject::Relationship(_) => ObjectType::Relationship,
            StixObject::Sighting(_) => ObjectType::Sighting,
        }
    }

    /// Properties shared by every kind
    pub fn common(&self) -> &CommonProperties {
        each_kind!(self, inner => inner.common())
    }

    /// Object identifier
    pub fn id(&self) -> &Identifier {
        self.common().id()
    }

    /// Every identifier this object points at, with the property holding it
    pub fn references(&self) -> Vec<Reference<'_>> {
        each_kind!(self, inner => inner.references())
    }
}

/// A concrete object kind that a bundle factory can create
pub trait StixKind: CommonObject + Sized {
    const OBJECT_TYPE: ObjectType;

    /// A zero-valued instance holding only its identifier
    fn with_id(id: Identifier) -> Self;

    fn into_object(self) -> StixObject;

    fn from_object(object: &StixObject) -> Option<&Self>;

    fn from_object_mut(object: &mut StixObject) -> Option<&mut Self>;
}

macro_rules! stix_kind {
    ($kind:ident) => {
        impl CommonObject for $kind {
            fn common(&self) -> &CommonProperties {
                &self.common
            }

            fn common_mut(&mut self) -> &mut CommonProperties {
                &mut self.common
            }
        }

        impl StixKind for $kind {
            const OBJECT_TYPE: ObjectType = ObjectType::$kind;

            fn with_id(id: Identifier) -> Self {
                <$kind>::blank(id)
            }

            fn into_object(self) -> StixObject {
                StixObject::$kind(self)
            }

            fn from_object(object: &StixObject) -> Option<&Self> {
                match object {
                    StixObject::$kind(inner) => Some(inner),
                    _ => None,
                }
            }

            fn from_object_mut(object: &mut StixObject) -> Option<&mut Self> {
                match object {
                    StixObject::$kind(inner) => Some(inner),
                    _ => None,
                }
            }
        }

        impl From<$kind> for StixObject {
            fn from(value: $kind) -> Self {
                StixObject::$kind(value)
            }
        }
    };
}

macro_rules! described {
    ($kind:ident) => {
        impl Described for $kind {
            fn descriptor(&self) -> &Descriptor {
                &self.descriptor
            }

            fn descriptor_mut(&mut self) -> &mut Descriptor {
                &mut self.descriptor
            }
        }
    };
}

stix_kind!(Campaign);
stix_kind!(Indicator);
stix_kind!(Infrastructure);
stix_kind!(Malware);
stix_kind!(ObservedData);
stix_kind!(Relationship);
stix_kind!(Sighting);

described!(Campaign);
described!(Indicator);
described!(Infrastructure);
described!(Malware);
described!(ObservedData);

/// Push `item` unless an equal item is already present; keeps first-insertion order
pub(crate) fn insert_unique<T: PartialEq>(items: &mut Vec<T>, item: T) -> bool {
    if items.contains(&item) {
        return false;
    }
    items.push(item);
    true
}
