use std::sync::Arc;

use crate::CollectionRelation;

/// Field metadata produced by schema generation.
///
/// The retention decision is the only part of this crate that writes to a
/// member, and only to the one it is handed.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Member {
    /// Field name within its relation.
    pub name: String,
    /// Whether the field is indexed for search.
    pub searchable: bool,
    /// Schema type of the field.
    pub type_name: String,
    /// Analyzer applied to the field. Empty means the index default.
    pub analyzer: String,
    /// Cross-collection link attached to the field.
    pub relation: Option<Arc<CollectionRelation>>,
}

impl Member {
    /// Creates a non-searchable member with no analyzer and no relation.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    /// Sets the analyzer.
    #[must_use]
    pub fn with_analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.analyzer = analyzer.into();
        self
    }
}
