#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `filters` turns the declarative search configuration of a metadata-driven
//! indexer into the three artefacts schema generation needs: an ordered list
//! of per-collection [`Filter`]s, a [`Containment`] map describing which
//! collections nest inside which others, and a [`RetentionFilter`] that
//! decides, field by field, whether a member survives in the generated search
//! schema and how its metadata is rewritten.
//!
//! # Design
//!
//! - [`Filters`] decodes a mapping of collection name to
//!   [`CollectionDescription`] while preserving the order in which the names
//!   were declared. Decoding goes through serde, so any self-describing format
//!   works; YAML helpers are provided because that is how the configuration is
//!   authored.
//! - [`Filters::containment`] computes direct (one hop) containment. Every
//!   collection contains itself; transitive chains are not followed.
//! - [`RetentionFilter`] flattens every filter into four lookup tables keyed by
//!   [`FieldKey`] and evaluates them with a fixed precedence. Evaluation returns
//!   a [`RetentionOutcome`] so callers decide how to report dropped fields;
//!   [`RetentionFilter::retain`] is the convenience that reports them through
//!   the `tracing` diagnostics when the filter was built verbose.
//!
//! # Invariants
//!
//! - Filter names are unique within one decoded configuration.
//! - `Contains` is deduplicated regardless of how often a name is listed.
//! - `Searchable` and `Additional` entries accumulate across filters, while
//!   `SearchableConfig` and `Relations` entries of later filters replace those
//!   of earlier ones for the same key.
//! - An `Additional` field is always retained as non-searchable, even when it
//!   is also listed as searchable.
//!
//! # Errors
//!
//! Decoding reports [`FiltersError`] when a filter name is not a string, a
//! filter body does not match the collection description shape, a name is
//! declared twice, or the configuration file cannot be read. Decoding is
//! all-or-nothing. Evaluation never fails.
//!
//! # Examples
//!
//! ```
//! use filters::{Filters, Member, RetentionFilter};
//!
//! let filters = Filters::from_yaml_str(
//!     "
//! article:
//!   Searchable: [title, body]
//!   Additional: [slug]
//!   Contains: [comment]
//! comment:
//!   Searchable: [text]
//! ",
//! )
//! .expect("filters decode");
//!
//! let names: Vec<_> = filters.iter().map(|filter| filter.name()).collect();
//! assert_eq!(names, ["article", "comment"]);
//!
//! let containment = filters.containment();
//! assert!(containment.is_contained_in("comment", "article"));
//!
//! let retention = RetentionFilter::from_filters(&filters, false);
//! let mut slug = Member::new("slug", "keyword");
//! assert!(retention.retain("article", "slug", &mut slug));
//! assert!(!slug.searchable);
//!
//! let mut draft = Member::new("draft", "boolean");
//! assert!(!retention.retain("article", "draft", &mut draft));
//! ```

pub mod diagnostics;
mod containment;
mod decode;
mod error;
mod filter;
mod key;
mod member;
mod model;
mod retention;

pub use containment::Containment;
pub use decode::Filters;
pub use error::FiltersError;
pub use filter::Filter;
pub use key::FieldKey;
pub use member::Member;
pub use model::{CollectionDescription, CollectionRelation, CollectionSearchableConfig};
pub use retention::{RetentionFilter, RetentionOutcome};
