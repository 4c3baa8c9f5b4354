//! Bundle - the container every object is created in
//!
//! The bundle is the only way to create objects:
//! - Each factory issues an identifier, appends a blank object and
//!   returns a typed [`Handle`] to it
//! - Objects keep their creation order, which is also the output order
//! - Objects are never removed or re-identified
//!
//! A handle is an index into the bundle plus the object's identifier, so
//! callers can keep many handles alive and still mutate through the bundle.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};
use tracing::debug;

use crate::{
    serialize, BundleError, Campaign, Identifier, Indicator, Infrastructure, Malware, ObjectType,
    ObservedData, Relationship, SerializerConfig, Sighting, StixKind, StixObject,
    DEFAULT_SPEC_VERSION,
};

/// Bundle configuration
#[derive(Debug, Clone)]
pub struct BundleConfig {
    /// Value of the `spec_version` property (default: 2.0)
    pub spec_version: String,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            spec_version: DEFAULT_SPEC_VERSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum BundleTag {
    #[default]
    Bundle,
}

/// Typed reference to an object created by a bundle factory
#[derive(Debug, Clone, PartialEq)]
pub struct Handle<T> {
    index: usize,
    id: Identifier,
    kind: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    /// Identifier of the referenced object, usable as a reference target
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// Position of the object in its bundle
    pub fn index(&self) -> usize {
        self.index
    }
}

/// An ordered collection of every object created in one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    #[serde(rename = "type")]
    tag: BundleTag,
    id: Identifier,
    spec_version: String,
    #[serde(default)]
    objects: Vec<StixObject>,
}

impl Bundle {
    /// Create an empty bundle with the default spec version
    pub fn new() -> Self {
        Self::with_config(BundleConfig::default())
    }

    /// Create an empty bundle with explicit settings
    pub fn with_config(config: BundleConfig) -> Self {
        let bundle = Self {
            tag: BundleTag::Bundle,
            id: Identifier::generate(ObjectType::Bundle),
            spec_version: config.spec_version,
            objects: Vec::new(),
        };
        debug!("Created bundle {} (spec {})", bundle.id, bundle.spec_version);
        bundle
    }

    /// Bundle identifier
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// Value of the `spec_version` property
    pub fn spec_version(&self) -> &str {
        &self.spec_version
    }

    /// Number of objects held
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the bundle holds no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All objects in creation order
    pub fn objects(&self) -> &[StixObject] {
        &self.objects
    }

    /// Create and register a blank object of kind `T`
    pub fn create<T: StixKind>(&mut self) -> Handle<T> {
        let id = Identifier::generate(T::OBJECT_TYPE);
        let index = self.objects.len();
        self.objects.push(T::with_id(id.clone()).into_object());
        debug!("Registered {} at position {}", id, index);

        Handle {
            index,
            id,
            kind: PhantomData,
        }
    }

    /// Create a campaign
    pub fn new_campaign(&mut self) -> Handle<Campaign> {
        self.create()
    }

    /// Create an indicator
    pub fn new_indicator(&mut self) -> Handle<Indicator> {
        self.create()
    }

    /// Create an infrastructure object
    pub fn new_infrastructure(&mut self) -> Handle<Infrastructure> {
        self.create()
    }

    /// Create a malware object
    pub fn new_malware(&mut self) -> Handle<Malware> {
        self.create()
    }

    /// Create an observed-data object
    pub fn new_observed_data(&mut self) -> Handle<ObservedData> {
        self.create()
    }

    /// Create a relationship
    pub fn new_relationship(&mut self) -> Handle<Relationship> {
        self.create()
    }

    /// Create a sighting
    pub fn new_sighting(&mut self) -> Handle<Sighting> {
        self.create()
    }

    /// Look up the object behind a handle.
    ///
    /// Returns `None` for a handle issued by a different bundle.
    pub fn get<T: StixKind>(&self, handle: &Handle<T>) -> Option<&T> {
        self.objects
            .get(handle.index)
            .filter(|object| object.id() == &handle.id)
            .and_then(T::from_object)
    }

    /// Get a mutable reference to a handle's object; `None` for a foreign handle
    pub fn get_mut<T: StixKind>(&mut self, handle: &Handle<T>) -> Option<&mut T> {
        self.objects
            .get_mut(handle.index)
            .filter(|object| object.id() == &handle.id)
            .and_then(T::from_object_mut)
    }

    /// Find an object by identifier
    pub fn find(&self, id: &Identifier) -> Option<&StixObject> {
        self.objects.iter().find(|object| object.id() == id)
    }

    /// Whether an object with this identifier is held
    pub fn contains(&self, id: &Identifier) -> bool {
        self.find(id).is_some()
    }

    /// Object counts per kind, in first-seen order
    pub fn stats(&self) -> BundleStats {
        let mut by_type: Vec<(ObjectType, usize)> = Vec::new();
        let mut references = 0;

        for object in &self.objects {
            let kind = object.object_type();
            match by_type.iter_mut().find(|(t, _)| *t == kind) {
                Some((_, count)) => *count += 1,
                None => by_type.push((kind, 1)),
            }
            references += object.references().len();
        }

        BundleStats {
            total_objects: self.objects.len(),
            by_type,
            total_references: references,
        }
    }

    /// Check references and required properties; see [`crate::validate`]
    pub fn validate(&self) -> Result<(), BundleError> {
        crate::validate(self).map_err(BundleError::from)
    }

    /// Compact JSON
    pub fn to_json(&self) -> Result<String, BundleError> {
        serialize::to_string(self, &SerializerConfig::compact())
    }

    /// Indented JSON (4 spaces)
    pub fn to_json_pretty(&self) -> Result<String, BundleError> {
        serialize::to_string(self, &SerializerConfig::pretty())
    }

    /// SHA-256 of the compact encoding
    pub fn fingerprint(&self) -> Result<String, BundleError> {
        serialize::fingerprint(self)
    }

    /// Parse a bundle previously produced by [`Bundle::to_json`] or any
    /// STIX 2.0 producer using the supported object kinds
    pub fn from_json(json: &str) -> Result<Self, BundleError> {
        let bundle: Bundle = serde_json::from_str(json).map_err(BundleError::Parse)?;
        debug!("Parsed bundle {} with {} objects", bundle.id, bundle.objects.len());
        Ok(bundle)
    }
}

impl Default for Bundle {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StixKind> Index<&Handle<T>> for Bundle {
    type Output = T;

    fn index(&self, handle: &Handle<T>) -> &T {
        self.get(handle)
            .unwrap_or_else(|| panic!("handle {} does not belong to bundle {}", handle.id, self.id))
    }
}

impl<T: StixKind> IndexMut<&Handle<T>> for Bundle {
    fn index_mut(&mut self, handle: &Handle<T>) -> &mut T {
        let bundle_id = self.id.clone();
        self.get_mut(handle)
            .unwrap_or_else(|| panic!("handle {} does not belong to bundle {}", handle.id, bundle_id))
    }
}

/// Bundle statistics
#[derive(Debug, Clone)]
pub struct BundleStats {
    pub total_objects: usize,
    pub by_type: Vec<(ObjectType, usize)>,
    pub total_references: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CommonObject, Described};

    #[test]
    fn test_factory_ids_are_prefixed_and_unique() {
        let mut bundle = Bundle::new();
        let ids = vec![
            bundle.new_campaign().id().clone(),
            bundle.new_indicator().id().clone(),
            bundle.new_infrastructure().id().clone(),
            bundle.new_malware().id().clone(),
            bundle.new_observed_data().id().clone(),
            bundle.new_relationship().id().clone(),
            bundle.new_sighting().id().clone(),
        ];

        for (id, kind) in ids.iter().zip(ObjectType::OBJECT_KINDS) {
            assert!(id.as_str().starts_with(&format!("{}--", kind.as_str())));
        }

        let second = bundle.new_malware();
        assert_ne!(second.id(), &ids[3]);
        assert_eq!(bundle.len(), 8);
    }

    #[test]
    fn test_handle_id_matches_object_id() {
        let mut bundle = Bundle::new();
        let malware = bundle.new_malware();
        assert_eq!(bundle[&malware].id(), malware.id());
        assert_eq!(bundle.objects()[malware.index()].id(), malware.id());
    }

    #[test]
    fn test_mutation_through_handle() {
        let mut bundle = Bundle::new();
        let campaign = bundle.new_campaign();
        let indicator = bundle.new_indicator();

        bundle[&campaign].set_name("Bank Attack 2016");
        bundle[&indicator].set_pattern("file-object:hashes.md5 = 84714c100d2dfc88629531f6456b8276");
        bundle[&campaign].set_description("late edit");

        assert_eq!(bundle[&campaign].name(), Some("Bank Attack 2016"));
        assert_eq!(bundle[&campaign].description(), Some("late edit"));
        assert!(bundle[&indicator].pattern().is_some());
    }

    #[test]
    fn test_foreign_handle_rejected() {
        let mut first = Bundle::new();
        let mut second = Bundle::new();
        let handle = first.new_malware();
        second.new_malware();

        assert!(second.get(&handle).is_none());
        assert!(second.get_mut(&handle).is_none());
        assert!(first.get(&handle).is_some());
    }

    #[test]
    #[should_panic(expected = "does not belong to bundle")]
    fn test_foreign_handle_index_panics() {
        let mut first = Bundle::new();
        let handle = first.new_campaign();
        let second = Bundle::new();
        let _ = &second[&handle];
    }

    #[test]
    fn test_find_and_contains() {
        let mut bundle = Bundle::new();
        let infra = bundle.new_infrastructure();
        assert!(bundle.contains(infra.id()));
        assert_eq!(
            bundle.find(infra.id()).map(|o| o.object_type()),
            Some(ObjectType::Infrastructure)
        );
        assert!(!bundle.contains(&Identifier::generate(ObjectType::Infrastructure)));
    }

    #[test]
    fn test_references_stable_across_mutation_order() {
        let mut bundle = Bundle::new();
        let rel = bundle.new_relationship();
        let a = bundle.new_campaign();
        let b = bundle.new_malware();

        // Endpoints set before the referenced objects are populated
        bundle[&rel].set_source_target(a.id(), b.id());
        bundle[&a].set_name("A");
        bundle[&b].set_name("B");
        bundle[&b].set_modified_text("2016-09-01T00:00:01Z");

        assert_eq!(bundle[&rel].source_ref(), Some(bundle[&a].id()));
        assert_eq!(bundle[&rel].target_ref(), Some(bundle[&b].id()));
    }

    #[test]
    fn test_stats() {
        let mut bundle = Bundle::new();
        let a = bundle.new_malware();
        let b = bundle.new_malware();
        let rel = bundle.new_relationship();
        bundle[&rel].set_source_target(a.id(), b.id());

        let stats = bundle.stats();
        assert_eq!(stats.total_objects, 3);
        assert_eq!(
            stats.by_type,
            vec![(ObjectType::Malware, 2), (ObjectType::Relationship, 1)]
        );
        assert_eq!(stats.total_references, 2);
    }

    #[test]
    fn test_spec_version_config() {
        let bundle = Bundle::with_config(BundleConfig {
            spec_version: "2.1".to_string(),
        });
        assert_eq!(bundle.spec_version(), "2.1");
        assert!(bundle.id().is_of_type(ObjectType::Bundle));
        assert!(bundle.is_empty());
    }
}
