//! Tracing for filter decoding and field retention.
//!
//! Every event is emitted on the [`FILTER_TARGET`] target. All tracing is
//! conditionally compiled behind the `tracing` feature flag and produces no-op
//! inline functions when disabled, so callers never need their own `cfg`
//! guards.
//!
//! # Examples
//!
//! ```rust
//! use filters::diagnostics::trace_field_removed;
//! use filters::FieldKey;
//!
//! // Emits "removing filtered article.draft" at INFO level.
//! trace_field_removed(&FieldKey::new("article", "draft"));
//! ```

use crate::FieldKey;

/// Target name for tracing events.
pub const FILTER_TARGET: &str = "searchmeta::filter";

/// Traces a completed decode.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_filters_decoded(filter_count: usize) {
    tracing::debug!(
        target: FILTER_TARGET,
        filter_count = filter_count,
        "filters_decoded"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_filters_decoded(_filter_count: usize) {}

/// Traces the sizes of the lookup tables of a freshly built retention filter.
///
/// # Arguments
///
/// * `keep` - Searchable fields across all filters
/// * `config` - Fields with a type or analyzer override
/// * `additional` - Fields kept but excluded from search
/// * `relations` - Fields linked to another collection
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_retention_built(keep: usize, config: usize, additional: usize, relations: usize) {
    tracing::debug!(
        target: FILTER_TARGET,
        keep = keep,
        config = config,
        additional = additional,
        relations = relations,
        "retention_built"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_retention_built(_keep: usize, _config: usize, _additional: usize, _relations: usize) {}

/// Reports a field dropped from the schema.
///
/// Emits a single INFO line of the form `removing filtered relation.field`.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_field_removed(key: &FieldKey) {
    tracing::info!(target: FILTER_TARGET, "removing filtered {key}");
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_field_removed(_key: &FieldKey) {}
