use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    CollectionRelation, CollectionSearchableConfig, FieldKey, Filter, Member, diagnostics,
};

/// Lookup tables flattened from every filter.
#[derive(Debug, Default)]
struct RetentionTables {
    keep: FxHashSet<FieldKey>,
    config: FxHashMap<FieldKey, CollectionSearchableConfig>,
    additional: FxHashSet<FieldKey>,
    relations: FxHashMap<FieldKey, Arc<CollectionRelation>>,
}

/// Result of evaluating one field against a [`RetentionFilter`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RetentionOutcome {
    /// The field stays in the schema and is searchable.
    Searchable,
    /// The field stays in the schema but is excluded from search.
    Additional,
    /// The field is not configured and is removed from the schema.
    Dropped(FieldKey),
}

impl RetentionOutcome {
    /// Returns `true` if the field stays in the schema.
    #[must_use]
    pub const fn is_retained(&self) -> bool {
        !matches!(self, Self::Dropped(_))
    }

    /// Returns a human-readable explanation for dropped fields.
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        match self {
            Self::Dropped(key) => Some(format!("removing filtered {key}")),
            Self::Searchable | Self::Additional => None,
        }
    }
}

/// Immutable retention decision merged from all filters.
///
/// Built once per configuration via [`from_filters`](Self::from_filters) and
/// then evaluated for every `(relation, field)` pair the schema walker
/// discovers. Evaluation applies, in order:
///
/// 1. a configured relation is attached to the member;
/// 2. a configured override replaces the member type (when it carries one)
///    and always replaces the analyzer, even with an empty value;
/// 3. an `Additional` field is kept as non-searchable, without consulting the
///    searchable set;
/// 4. a field missing from every `Searchable` list is dropped;
/// 5. anything else is kept as searchable.
///
/// `RetentionFilter` is cheaply cloneable (the tables are behind an [`Arc`])
/// and can be shared across threads; it only writes to the member it is
/// handed.
///
/// # Examples
///
/// ```
/// use filters::{Filter, Member, RetentionFilter, RetentionOutcome};
///
/// let filters = [Filter::new("article").with_items(["title"])];
/// let retention = RetentionFilter::from_filters(&filters, false);
///
/// let mut title = Member::new("title", "text");
/// assert_eq!(
///     retention.evaluate("article", "title", &mut title),
///     RetentionOutcome::Searchable
/// );
/// assert!(title.searchable);
///
/// let mut body = Member::new("body", "text");
/// let outcome = retention.evaluate("article", "body", &mut body);
/// assert!(!outcome.is_retained());
/// assert_eq!(outcome.reason().unwrap(), "removing filtered article.body");
/// ```
#[derive(Clone, Debug, Default)]
pub struct RetentionFilter {
    tables: Arc<RetentionTables>,
    verbose: bool,
}

impl RetentionFilter {
    /// Flattens `filters` into a retention filter.
    ///
    /// Filters are processed in iteration order. `Searchable` and `Additional`
    /// fields accumulate; a later override or relation for the same field
    /// replaces an earlier one. When `verbose` is set,
    /// [`retain`](Self::retain) reports every dropped field.
    #[must_use]
    pub fn from_filters<'a, I>(filters: I, verbose: bool) -> Self
    where
        I: IntoIterator<Item = &'a Filter>,
    {
        let mut tables = RetentionTables::default();

        for filter in filters {
            let name = filter.name();
            tables.keep.extend(
                filter
                    .items()
                    .iter()
                    .map(|field| FieldKey::new(name, field.as_str())),
            );
            tables.config.extend(
                filter
                    .items_config()
                    .iter()
                    .map(|(field, config)| (FieldKey::new(name, field.as_str()), config.clone())),
            );
            tables.additional.extend(
                filter
                    .additional()
                    .iter()
                    .map(|field| FieldKey::new(name, field.as_str())),
            );
            tables.relations.extend(filter.relations().iter().map(|(field, relation)| {
                (FieldKey::new(name, field.as_str()), Arc::clone(relation))
            }));
        }

        diagnostics::trace_retention_built(
            tables.keep.len(),
            tables.config.len(),
            tables.additional.len(),
            tables.relations.len(),
        );

        Self {
            tables: Arc::new(tables),
            verbose,
        }
    }

    /// Returns `true` if dropped fields are reported by [`retain`](Self::retain).
    #[must_use]
    pub const fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Decides whether `field` of `relation` is kept and updates `member`.
    ///
    /// Never reports anything; use [`RetentionOutcome::reason`] to describe a
    /// drop.
    pub fn evaluate(&self, relation: &str, field: &str, member: &mut Member) -> RetentionOutcome {
        let key = FieldKey::new(relation, field);
        let tables = &*self.tables;

        if let Some(linked) = tables.relations.get(&key) {
            member.relation = Some(Arc::clone(linked));
        }

        if let Some(config) = tables.config.get(&key) {
            if let Some(type_name) = &config.type_name {
                member.type_name.clone_from(type_name);
            }
            member.analyzer.clone_from(&config.analyzer);
        }

        if tables.additional.contains(&key) {
            member.searchable = false;
            return RetentionOutcome::Additional;
        }

        if !tables.keep.contains(&key) {
            return RetentionOutcome::Dropped(key);
        }

        member.searchable = true;
        RetentionOutcome::Searchable
    }

    /// Evaluates like [`evaluate`](Self::evaluate) and returns whether the
    /// field is kept.
    ///
    /// A verbose filter emits one diagnostic line per dropped field.
    pub fn retain(&self, relation: &str, field: &str, member: &mut Member) -> bool {
        match self.evaluate(relation, field, member) {
            RetentionOutcome::Dropped(key) => {
                if self.verbose {
                    diagnostics::trace_field_removed(&key);
                }
                false
            }
            RetentionOutcome::Searchable | RetentionOutcome::Additional => true,
        }
    }

    /// Applies [`retain`](Self::retain) to every member of `relation`,
    /// removing the dropped ones.
    ///
    /// Members are addressed by their [`name`](Member::name). Returns the
    /// number of removed members.
    pub fn retain_members(&self, relation: &str, members: &mut Vec<Member>) -> usize {
        let before = members.len();
        members.retain_mut(|member| {
            let field = member.name.clone();
            self.retain(relation, &field, member)
        });
        before - members.len()
    }
}
