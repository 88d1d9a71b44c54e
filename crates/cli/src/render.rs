//! Line-oriented rendering of decoded filters.

use std::io::{self, Write};

use filters::{Containment, FieldKey, Filters, Member, RetentionFilter};

/// Placeholder printed for empty values.
const NONE: &str = "-";

/// Writes one summary line per filter in declaration order.
pub(crate) fn filter_listing<W: Write>(filters: &Filters, out: &mut W) -> io::Result<()> {
    for filter in filters {
        let contains = if filter.contains().is_empty() {
            NONE.to_owned()
        } else {
            filter
                .contains()
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(",")
        };

        writeln!(
            out,
            "{} searchable={} additional={} config={} relations={} contains={contains}",
            filter.name(),
            filter.items().len(),
            filter.additional().len(),
            filter.items_config().len(),
            filter.relations().len(),
        )?;
    }
    Ok(())
}

/// Writes `NAME: CONTAINER...` for every filter in declaration order.
pub(crate) fn containment<W: Write>(
    filters: &Filters,
    containment: &Containment,
    out: &mut W,
) -> io::Result<()> {
    for name in filters.names() {
        write!(out, "{name}:")?;
        for container in containment.containers_of(name).into_iter().flatten() {
            write!(out, " {container}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Evaluates each requested pair against a fresh member and reports the result.
pub(crate) fn checks<W: Write>(
    retention: &RetentionFilter,
    checks: &[FieldKey],
    out: &mut W,
) -> io::Result<()> {
    for key in checks {
        let mut member = Member::new(key.field(), "");
        if !retention.retain(key.relation(), key.field(), &mut member) {
            writeln!(out, "{key} dropped")?;
            continue;
        }

        let relation = member
            .relation
            .as_deref()
            .map_or(NONE, |relation| relation.collection.as_str());
        writeln!(
            out,
            "{key} retained searchable={} type={} analyzer={} relation={relation}",
            member.searchable,
            or_none(&member.type_name),
            or_none(&member.analyzer),
        )?;
    }
    Ok(())
}

fn or_none(value: &str) -> &str {
    if value.is_empty() { NONE } else { value }
}
