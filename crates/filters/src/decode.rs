use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::slice;

use rustc_hash::FxHashSet;
use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};

use crate::{CollectionDescription, Filter, FiltersError, diagnostics};

/// Ordered list of filters, one per configured collection.
///
/// Decoding from a mapping keeps the collections in the order they were
/// written, which is what schema generation iterates in. The mapping types of
/// most serialization formats do not promise that order, so the decoder
/// tracks it explicitly while the keys stream by.
///
/// # Examples
///
/// ```
/// use filters::Filters;
///
/// let filters = Filters::from_yaml_str("zeta: {}\nalpha: {}\nmid: {}\n").unwrap();
/// let names: Vec<_> = filters.names().collect();
/// assert_eq!(names, ["zeta", "alpha", "mid"]);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Filters {
    filters: Vec<Filter>,
}

impl Filters {
    /// Decodes filters from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, FiltersError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Decodes filters from a YAML stream.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, FiltersError> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    /// Reads and decodes the YAML file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FiltersError> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).map_err(|source| FiltersError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Returns the number of filters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns `true` when no collection is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Iterates the filters in declaration order.
    pub fn iter(&self) -> slice::Iter<'_, Filter> {
        self.filters.iter()
    }

    /// Iterates the collection names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.filters.iter().map(Filter::name)
    }

    /// Looks up the filter for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Filter> {
        self.filters.iter().find(|filter| filter.name() == name)
    }
}

/// Builds a filter list in iteration order.
///
/// Name uniqueness is only enforced when decoding; callers assembling filters
/// by hand are expected to supply distinct names.
impl FromIterator<Filter> for Filters {
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        Self {
            filters: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Filters {
    type Item = Filter;
    type IntoIter = std::vec::IntoIter<Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.into_iter()
    }
}

impl<'a> IntoIterator for &'a Filters {
    type Item = &'a Filter;
    type IntoIter = slice::Iter<'a, Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}

impl<'de> Deserialize<'de> for Filters {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(FiltersVisitor)
    }
}

/// Position of a filter name within the mapping it was decoded from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
struct DeclarationOrder(u64);

/// Hands out declaration positions for a single decode call.
#[derive(Debug, Default)]
struct DecodeContext {
    next: u64,
}

impl DecodeContext {
    fn next_order(&mut self) -> DeclarationOrder {
        let order = DeclarationOrder(self.next);
        self.next += 1;
        order
    }
}

struct FiltersVisitor;

impl<'de> Visitor<'de> for FiltersVisitor {
    type Value = Filters;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a mapping of collection names to collection descriptions")
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Filters::default())
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut context = DecodeContext::default();
        let mut seen = FxHashSet::default();
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));

        while let Some(name) = map.next_key::<String>().map_err(|error| {
            <A::Error as de::Error>::custom(format_args!("invalid filter name: {error}"))
        })? {
            let order = context.next_order();
            if !seen.insert(name.clone()) {
                return Err(<A::Error as de::Error>::custom(format_args!(
                    "duplicate filter '{name}'"
                )));
            }

            // A bare `name:` declares a collection with no rules.
            let description = map
                .next_value::<Option<CollectionDescription>>()
                .map_err(|error| {
                    <A::Error as de::Error>::custom(format_args!(
                        "invalid filter '{name}': {error}"
                    ))
                })?
                .unwrap_or_default();

            entries.push((order, name, description));
        }

        entries.sort_by_key(|(order, _, _)| *order);

        let filters: Filters = entries
            .into_iter()
            .map(|(_, name, description)| Filter::from_description(name, description))
            .collect();
        diagnostics::trace_filters_decoded(filters.len());
        Ok(filters)
    }
}
