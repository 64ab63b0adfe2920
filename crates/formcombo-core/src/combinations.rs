//! Bounded Cartesian-product enumeration of field values
//!
//! Fields are processed in input order and each field's values in their
//! declared order, so the first field varies slowest. Enumeration stops as
//! soon as `limit` configurations exist; the reported total is always the
//! true product.

use crate::types::{CombinationResult, Configuration, FieldDescriptor};
use std::num::NonZeroUsize;
use tracing::{debug, warn};

/// Ceiling used when listing configurations
pub const DEFAULT_REPORT_LIMIT: NonZeroUsize = match NonZeroUsize::new(10_000) {
    Some(limit) => limit,
    None => panic!("report limit must be non-zero"),
};

/// Ceiling used when planning physical variants
pub const DEFAULT_VARIANT_LIMIT: NonZeroUsize = match NonZeroUsize::new(500) {
    Some(limit) => limit,
    None => panic!("variant limit must be non-zero"),
};

/// Configurations reserved before enumeration starts; the output grows past it on demand
const MAX_PREALLOCATED: usize = 1024;

/// Size of the Cartesian product of all value sets
///
/// Zero for an empty field list. Saturates at `u64::MAX`.
pub fn total_combinations(fields: &[FieldDescriptor]) -> u64 {
    if fields.is_empty() {
        return 0;
    }
    fields
        .iter()
        .fold(1u64, |acc, field| acc.saturating_mul(field.values.len() as u64))
}

/// Enumerate configurations of `fields`, producing at most `limit` of them
///
/// Recursion depth equals the number of fields, which stays in the tens
/// for real dialogs.
pub fn generate(fields: &[FieldDescriptor], limit: NonZeroUsize) -> CombinationResult {
    let total_count = total_combinations(fields);
    if total_count == 0 {
        debug!(fields = fields.len(), "Nothing to enumerate");
        return CombinationResult::empty();
    }

    let limit = limit.get();
    let mut configurations = Vec::with_capacity(initial_capacity(total_count, limit));
    enumerate(fields, Configuration::new(), limit, &mut configurations);

    let truncated = total_count > limit as u64;
    if truncated {
        warn!(
            total = total_count,
            limit,
            "Combination count exceeds the limit, returning a subset"
        );
    }
    debug!(
        fields = fields.len(),
        total = total_count,
        emitted = configurations.len(),
        "Enumerated configurations"
    );

    CombinationResult {
        configurations,
        total_count,
        truncated,
    }
}

/// Up-front reservation for the output, never more than [`MAX_PREALLOCATED`]
fn initial_capacity(total_count: u64, limit: usize) -> usize {
    usize::try_from(total_count)
        .map_or(limit, |total| total.min(limit))
        .min(MAX_PREALLOCATED)
}

fn enumerate(
    remaining: &[FieldDescriptor],
    current: Configuration,
    limit: usize,
    out: &mut Vec<Configuration>,
) {
    let Some((field, rest)) = remaining.split_first() else {
        out.push(current);
        return;
    };

    for value in &field.values {
        if out.len() >= limit {
            return;
        }
        enumerate(rest, current.extended(&field.name, value), limit, out);
    }
}

/// Render a configuration as `name = value` pairs joined by `, `
pub fn describe(config: &Configuration) -> String {
    config
        .iter()
        .map(|(name, value)| format!("{} = {}", name, value))
        .collect::<Vec<_>>()
        .join(", ")
}
