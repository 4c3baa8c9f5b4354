//! Observed data: raw observations collected over a time window
//!
//! The observation payload is opaque to this crate. It is kept as a JSON
//! value and emitted under `objects` exactly as given.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{timestamp, CommonProperties, Descriptor};
use crate::{Identifier, Reference};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservedData {
    #[serde(flatten)]
    pub(crate) common: CommonProperties,
    #[serde(flatten)]
    pub(crate) descriptor: Descriptor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    first_observed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_observed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    number_observed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    objects: Option<Value>,
}

impl ObservedData {
    pub(crate) fn blank(id: Identifier) -> Self {
        Self {
            common: CommonProperties::new(id),
            descriptor: Descriptor::default(),
            first_observed: None,
            last_observed: None,
            number_observed: None,
            objects: None,
        }
    }

    /// Start of the observation window
    pub fn first_observed(&self) -> Option<&str> {
        self.first_observed.as_deref()
    }

    /// Set first_observed from pre-formatted text
    pub fn set_first_observed_text(&mut self, ts: &str) {
        self.first_observed = Some(ts.to_string());
    }

    /// Set first_observed from a UTC time
    pub fn set_first_observed(&mut self, ts: DateTime<Utc>) {
        self.first_observed = Some(timestamp(ts));
    }

    /// End of the observation window
    pub fn last_observed(&self) -> Option<&str> {
        self.last_observed.as_deref()
    }

    /// Set last_observed from pre-formatted text
    pub fn set_last_observed_text(&mut self, ts: &str) {
        self.last_observed = Some(ts.to_string());
    }

    /// Set last_observed from a UTC time
    pub fn set_last_observed(&mut self, ts: DateTime<Utc>) {
        self.last_observed = Some(timestamp(ts));
    }

    /// How many times the data was observed
    pub fn number_observed(&self) -> Option<u32> {
        self.number_observed
    }

    /// Set number_observed
    pub fn set_number_observed(&mut self, count: u32) {
        self.number_observed = Some(count);
    }

    /// Observed payload
    pub fn objects(&self) -> Option<&Value> {
        self.objects.as_ref()
    }

    /// Attach the observation payload; a `&str` is stored as a JSON string
    pub fn set_objects(&mut self, payload: impl Into<Value>) {
        self.objects = Some(payload.into());
    }

    /// Identifiers this observed data points at
    pub fn references(&self) -> Vec<Reference<'_>> {
        self.common.references()
    }
}
