use serde::{Deserialize, Serialize};

use crate::feature::FeatureCollection;

/// Case-sensitive substring that marks a property as a population series key.
pub const POPULATION_MARKER: &str = "Pop";

/// Ordered list of time-series attribute names, derived once at load time.
/// Order matches first-occurrence order in the schema scan; the length is
/// fixed for the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeSequence(Vec<String>);

impl AttributeSequence {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Scan the first feature's property keys, in natural enumeration order, and
/// retain the ones containing `marker`. An empty collection yields an empty
/// sequence; callers treat that as a configuration error, not a crash.
pub fn extract_attributes(collection: &FeatureCollection, marker: &str) -> AttributeSequence {
    let Some(first) = collection.features.first() else {
        return AttributeSequence::default();
    };
    AttributeSequence::new(
        first
            .properties
            .keys()
            .filter(|key| key.contains(marker))
            .cloned()
            .collect(),
    )
}

/// Display year of a series attribute: the substring after the first `_` in
/// `<Prefix>_<Year>` names. Names without an underscore yield an empty label.
pub fn year_label(attribute: &str) -> &str {
    attribute
        .split_once('_')
        .map(|(_, year)| year)
        .unwrap_or("")
}
