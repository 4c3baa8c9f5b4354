//! STIX Core - object graph builder and serializer for threat intelligence
//!
//! This crate provides the foundational primitives:
//! - Type-prefixed identifiers for every object
//! - Domain objects (campaign, indicator, infrastructure, malware, observed data)
//! - Relationship objects (relationship, sighting) that link objects by identifier
//! - A bundle that owns every object it creates and hands out typed handles
//! - Reference validation and deterministic JSON serialization

pub mod identifier;
pub mod objects;
pub mod bundle;
pub mod references;
pub mod serialize;
pub mod shared;
pub mod error;

pub use identifier::*;
pub use objects::*;
pub use bundle::*;
pub use references::*;
pub use serialize::{OutputStyle, SerializerConfig};
pub use shared::*;
pub use error::*;

/// STIX specification version stamped on new bundles
pub const DEFAULT_SPEC_VERSION: &str = "2.0";

/// Indentation width used by pretty output
pub const DEFAULT_INDENT: usize = 4;

/// Separator between the type prefix and the random token of an identifier
pub const ID_SEPARATOR: &str = "--";
