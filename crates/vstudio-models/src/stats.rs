//! Per-style usage statistics.

use schemars::JsonSchema;
use serde::Serialize;
use std::collections::HashMap;

use crate::catalog::VideoStyle;
use crate::record::GeneratedVideoRecord;

/// Number of generated videos for one catalog style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct StyleUsage {
    /// Display name of the style.
    pub style: String,
    /// Number of records referencing it.
    pub count: u32,
}

/// Aggregate records into per-style counts.
///
/// Output preserves catalog order and omits styles with no matching
/// records; records referencing ids absent from the catalog contribute
/// nothing. Pure, no failure modes — no data yields an empty sequence.
pub fn usage_by_style(records: &[GeneratedVideoRecord], styles: &[VideoStyle]) -> Vec<StyleUsage> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for record in records {
        *counts.entry(record.style.as_str()).or_default() += 1;
    }

    styles
        .iter()
        .filter_map(|style| {
            let count = counts.get(style.id).copied().unwrap_or(0);
            (count > 0).then(|| StyleUsage {
                style: style.name.to_string(),
                count,
            })
        })
        .collect()
}
