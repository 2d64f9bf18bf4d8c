//! Two-line element set ingestion
//!
//! Upstream element-set feeds are third-party text and not guaranteed
//! well-formed, so parsing is deliberately permissive: malformed or
//! truncated groups are skipped, never surfaced as errors.

/// Catalog number field of line 1 (columns 3-7, 1-indexed).
const CATALOG_ID_RANGE: std::ops::Range<usize> = 2..7;

/// A raw, validated element-set record as found in the feed.
///
/// Immutable once parsed; consumed into a live satellite entity during
/// registry construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSetRecord {
    pub name: String,
    pub line1: String,
    pub line2: String,
    /// Digits-only catalog number taken from line 1.
    pub catalog_id: String,
}

/// Parse up to `max` element-set records from raw feed text.
///
/// The feed repeats 3-line groups (name, line 1, line 2). A group is kept
/// when all three trimmed lines are non-empty, line 1 starts with `"1 "`,
/// line 2 starts with `"2 "`, and the catalog number field contains only
/// digits. Invalid groups are skipped by advancing one line and trying
/// again; a truncated trailing group is dropped. File order is preserved
/// and duplicates are accepted as-is.
pub fn parse_element_sets(text: &str, max: usize) -> Vec<ElementSetRecord> {
    let mut records = Vec::new();
    let mut lines = text.lines();
    // Sliding 3-line window so the feed never has to be held whole; the
    // walk stops as soon as the cap is reached.
    let mut window: std::collections::VecDeque<&str> = std::collections::VecDeque::with_capacity(3);

    'outer: while records.len() < max {
        while window.len() < 3 {
            match lines.next() {
                Some(line) => window.push_back(line),
                // Truncated trailing group: dropped.
                None => break 'outer,
            }
        }

        let name = window[0].trim();
        let line1 = window[1].trim();
        let line2 = window[2].trim();

        match validate_group(name, line1, line2) {
            Some(catalog_id) => {
                records.push(ElementSetRecord {
                    name: name.to_string(),
                    line1: line1.to_string(),
                    line2: line2.to_string(),
                    catalog_id,
                });
                window.clear();
            }
            None => {
                // Resync one line at a time until a plausible group starts.
                window.pop_front();
            }
        }
    }

    log::debug!("parsed {} element-set records", records.len());

    records
}

/// Returns the digits-only catalog ID when the group is valid.
fn validate_group(name: &str, line1: &str, line2: &str) -> Option<String> {
    if name.is_empty() || line1.is_empty() || line2.is_empty() {
        return None;
    }
    if !line1.starts_with("1 ") || !line2.starts_with("2 ") {
        return None;
    }

    let field = line1.get(CATALOG_ID_RANGE)?.trim();
    if field.is_empty() || !field.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    Some(field.to_string())
}
