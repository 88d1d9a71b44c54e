use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::{CollectionDescription, CollectionRelation, CollectionSearchableConfig};

/// Search rules declared for one collection.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Filter {
    pub(crate) name: String,
    pub(crate) items: Vec<String>,
    pub(crate) items_config: BTreeMap<String, CollectionSearchableConfig>,
    pub(crate) additional: Vec<String>,
    pub(crate) contains: BTreeSet<String>,
    pub(crate) relations: BTreeMap<String, Arc<CollectionRelation>>,
}

impl Filter {
    /// Creates an empty filter for the collection `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builds the filter for `name` from its decoded description.
    ///
    /// Relations are moved behind shared pointers so retained members can
    /// reference them, and the `Contains` list collapses into a set.
    #[must_use]
    pub fn from_description(name: impl Into<String>, description: CollectionDescription) -> Self {
        let CollectionDescription {
            searchable,
            searchable_config,
            additional,
            contains,
            relations,
        } = description;

        Self {
            name: name.into(),
            items: searchable,
            items_config: searchable_config,
            additional,
            contains: contains.into_iter().collect(),
            relations: relations
                .into_iter()
                .map(|(field, relation)| (field, Arc::new(relation)))
                .collect(),
        }
    }

    /// Adds searchable fields.
    #[must_use]
    pub fn with_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items.extend(items.into_iter().map(Into::into));
        self
    }

    /// Adds a type/analyzer override for `field`.
    #[must_use]
    pub fn with_item_config(
        mut self,
        field: impl Into<String>,
        config: CollectionSearchableConfig,
    ) -> Self {
        self.items_config.insert(field.into(), config);
        self
    }

    /// Adds fields that are kept but not searchable.
    #[must_use]
    pub fn with_additional<I, S>(mut self, additional: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.additional.extend(additional.into_iter().map(Into::into));
        self
    }

    /// Declares collections nested inside this one.
    #[must_use]
    pub fn with_contains<I, S>(mut self, contains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contains.extend(contains.into_iter().map(Into::into));
        self
    }

    /// Links `field` to another collection.
    #[must_use]
    pub fn with_relation(mut self, field: impl Into<String>, relation: CollectionRelation) -> Self {
        self.relations.insert(field.into(), Arc::new(relation));
        self
    }

    /// Returns the collection name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the searchable fields in declaration order.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Returns the per-field overrides.
    #[must_use]
    pub fn items_config(&self) -> &BTreeMap<String, CollectionSearchableConfig> {
        &self.items_config
    }

    /// Returns the fields kept but excluded from search.
    #[must_use]
    pub fn additional(&self) -> &[String] {
        &self.additional
    }

    /// Returns the collections nested inside this one.
    #[must_use]
    pub fn contains(&self) -> &BTreeSet<String> {
        &self.contains
    }

    /// Returns the relations keyed by field.
    #[must_use]
    pub fn relations(&self) -> &BTreeMap<String, Arc<CollectionRelation>> {
        &self.relations
    }
}
