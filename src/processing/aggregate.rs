//! Count aggregations: grouping, ranking and Top-N+Other summaries.

use std::collections::HashMap;

use crate::types::Bucket;

/// Number of visible categories (including "Other") used when the caller passes `0`.
pub const DEFAULT_TOP_N: usize = 10;

/// Key of the synthetic catch-all bucket emitted by [`top_n_with_other`].
pub const OTHER_KEY: &str = "Other";

/// Resolve a user-facing category count: `0` means "use the default".
pub fn resolve_top_n(n: usize) -> usize {
    if n == 0 { DEFAULT_TOP_N } else { n }
}

/// Group `items` by `key` and count each group.
///
/// Items whose key is `None` are skipped. Buckets come back in order of the first
/// occurrence of each key, which is what makes every later ranking deterministic.
pub fn group_count<'a, T, F>(items: &'a [T], key: F) -> Vec<Bucket>
where
    F: Fn(&'a T) -> Option<&'a str>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut buckets: Vec<Bucket> = Vec::new();

    for item in items {
        let Some(k) = key(item) else {
            continue;
        };
        match index.get(k) {
            Some(&pos) => buckets[pos].count += 1,
            None => {
                index.insert(k, buckets.len());
                buckets.push(Bucket::new(k, 1));
            }
        }
    }

    buckets
}

/// [`group_count`] sorted by count, descending. Equal counts keep first-occurrence order.
pub fn ranked_counts<'a, T, F>(items: &'a [T], key: F) -> Vec<Bucket>
where
    F: Fn(&'a T) -> Option<&'a str>,
{
    let mut buckets = group_count(items, key);
    // `sort_by` is stable.
    buckets.sort_by(|a, b| b.count.cmp(&a.count));
    buckets
}

/// Summarize `items` as the `n - 1` largest groups followed by an `"Other"` bucket holding
/// the remainder.
///
/// - `n` counts the visible categories including "Other"; `0` resolves to [`DEFAULT_TOP_N`].
/// - "Other" is always emitted for non-empty input, with count 0 when nothing is left over.
/// - Empty input, or input where every key is `None`, produces an empty view.
pub fn top_n_with_other<'a, T, F>(items: &'a [T], key: F, n: usize) -> Vec<Bucket>
where
    F: Fn(&'a T) -> Option<&'a str>,
{
    let ranked = ranked_counts(items, key);
    if ranked.is_empty() {
        return Vec::new();
    }

    let visible = resolve_top_n(n) - 1;
    let mut out: Vec<Bucket> = Vec::with_capacity(visible.min(ranked.len()) + 1);
    let mut rest = 0usize;
    for (i, bucket) in ranked.into_iter().enumerate() {
        if i < visible {
            out.push(bucket);
        } else {
            rest += bucket.count;
        }
    }
    out.push(Bucket::new(OTHER_KEY, rest));
    out
}

/// Sum of all bucket counts.
pub fn total_count(buckets: &[Bucket]) -> usize {
    buckets.iter().map(|b| b.count).sum()
}
