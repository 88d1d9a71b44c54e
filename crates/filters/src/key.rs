use std::fmt;

/// Composite lookup key naming one field of one relation.
///
/// Displays as `relation.field`.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct FieldKey {
    relation: String,
    field: String,
}

impl FieldKey {
    /// Creates a key for `field` of `relation`.
    #[must_use]
    pub fn new(relation: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            field: field.into(),
        }
    }

    /// Returns the relation (collection) name.
    #[must_use]
    pub fn relation(&self) -> &str {
        &self.relation
    }

    /// Returns the field name.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.relation, self.field)
    }
}
