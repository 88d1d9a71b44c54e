use std::collections::{BTreeMap, BTreeSet, btree_map};

use crate::Filters;

/// Direct containment between configured collections.
///
/// Maps each collection to the collections whose documents may hold it,
/// including itself. Only relationships declared through `Contains` are
/// recorded: when `a` contains `b` and `b` contains `c`, `a` is not a
/// container of `c` unless `a` lists `c` as well.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Containment {
    containers: BTreeMap<String, BTreeSet<String>>,
}

impl Containment {
    /// Returns the collections that contain `name`, or `None` when `name` is
    /// not a configured collection.
    #[must_use]
    pub fn containers_of(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.containers.get(name)
    }

    /// Returns `true` if documents of `member` may be found inside `container`.
    #[must_use]
    pub fn is_contained_in(&self, member: &str, container: &str) -> bool {
        self.containers
            .get(member)
            .is_some_and(|containers| containers.contains(container))
    }

    /// Returns the number of collections in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    /// Returns `true` when no collection is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Iterates collections and their containers, ordered by name.
    pub fn iter(&self) -> btree_map::Iter<'_, String, BTreeSet<String>> {
        self.containers.iter()
    }
}

impl<'a> IntoIterator for &'a Containment {
    type Item = (&'a String, &'a BTreeSet<String>);
    type IntoIter = btree_map::Iter<'a, String, BTreeSet<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.containers.iter()
    }
}

impl Filters {
    /// Computes which collections may contain which others.
    ///
    /// Quadratic in the number of filters, which stays in the tens.
    #[must_use]
    pub fn containment(&self) -> Containment {
        let containers = self
            .iter()
            .map(|member| {
                let mut set = BTreeSet::from([member.name().to_owned()]);
                set.extend(
                    self.iter()
                        .filter(|container| container.contains().contains(member.name()))
                        .map(|container| container.name().to_owned()),
                );
                (member.name().to_owned(), set)
            })
            .collect();

        Containment { containers }
    }
}
