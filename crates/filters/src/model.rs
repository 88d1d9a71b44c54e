use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Filter-relevant part of a collection description.
///
/// Every key is optional. Keys that do not concern search filtering are
/// ignored so a full collection description can be decoded as-is.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CollectionDescription {
    /// Fields indexed as searchable.
    #[serde(default)]
    pub searchable: Vec<String>,
    /// Per-field type and analyzer overrides.
    #[serde(default)]
    pub searchable_config: BTreeMap<String, CollectionSearchableConfig>,
    /// Fields kept in the schema but excluded from search.
    #[serde(default)]
    pub additional: Vec<String>,
    /// Collections whose documents may be nested inside this one.
    #[serde(default)]
    pub contains: Vec<String>,
    /// Cross-collection links keyed by field.
    #[serde(default)]
    pub relations: BTreeMap<String, CollectionRelation>,
}

/// Type and analyzer override for one searchable field.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
pub struct CollectionSearchableConfig {
    /// Replacement for the member type, when present.
    #[serde(rename = "Type", default)]
    pub type_name: Option<String>,
    /// Analyzer assigned to the member. Empty clears any previous analyzer.
    #[serde(rename = "Analyzer", default)]
    pub analyzer: String,
}

impl CollectionSearchableConfig {
    /// Creates an override that only sets the analyzer.
    #[must_use]
    pub fn analyzer(analyzer: impl Into<String>) -> Self {
        Self {
            type_name: None,
            analyzer: analyzer.into(),
        }
    }

    /// Adds a type override.
    #[must_use]
    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }
}

/// Link from a field to another collection, used for joined search results.
#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "PascalCase")]
pub struct CollectionRelation {
    /// Target collection.
    pub collection: String,
    /// Field of the target collection the link resolves against.
    #[serde(default)]
    pub field: Option<String>,
    /// Whether the field links to many target documents.
    #[serde(default)]
    pub multiple: bool,
}

impl CollectionRelation {
    /// Creates a single-valued relation to `collection`.
    #[must_use]
    pub fn to(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            field: None,
            multiple: false,
        }
    }

    /// Sets the target field.
    #[must_use]
    pub fn on_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Marks the relation as many-valued.
    #[must_use]
    pub fn many(mut self) -> Self {
        self.multiple = true;
        self
    }
}
