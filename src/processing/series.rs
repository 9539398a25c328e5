//! Cumulative per-category time series for the line chart.

use std::collections::{BTreeMap, HashMap};

use crate::types::{CategorySeries, SeriesPoint, Year, YearRange};

use super::aggregate::{ranked_counts, resolve_top_n};

/// Year extent of `items`, or `None` for empty input.
pub fn year_extent<T, Y>(items: &[T], year: Y) -> Option<YearRange>
where
    Y: Fn(&T) -> Year,
{
    let mut iter = items.iter().map(&year);
    let first = iter.next()?;
    let (min, max) = iter.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y)));
    Some(YearRange::new(min, max))
}

/// Build one cumulative series per category.
///
/// Categories are ranked by count (descending, ties by first occurrence). The top `shift`
/// categories are skipped and the next `categories` are kept (`0` resolves to the default
/// of 10). Every series is extended to the year extent of the whole input: a zero point is
/// prepended when the category starts later than the first year, and the final total is
/// repeated at the last year when the category ends earlier. All series therefore share
/// one x-domain.
pub fn cumulative_series_by_category<'a, T, K, Y>(
    items: &'a [T],
    key: K,
    year: Y,
    categories: usize,
    shift: usize,
) -> Vec<CategorySeries>
where
    K: Fn(&'a T) -> Option<&'a str>,
    Y: Fn(&T) -> Year,
{
    let Some(extent) = year_extent(items, &year) else {
        return Vec::new();
    };

    let window: Vec<String> = ranked_counts(items, &key)
        .into_iter()
        .skip(shift)
        .take(resolve_top_n(categories))
        .map(|b| b.key)
        .collect();
    if window.is_empty() {
        return Vec::new();
    }

    let slot: HashMap<&str, usize> = window
        .iter()
        .enumerate()
        .map(|(i, k)| (k.as_str(), i))
        .collect();
    let mut per_year: Vec<BTreeMap<Year, usize>> = vec![BTreeMap::new(); window.len()];
    for item in items {
        let Some(k) = key(item) else {
            continue;
        };
        if let Some(&i) = slot.get(k) {
            *per_year[i].entry(year(item)).or_insert(0) += 1;
        }
    }

    window
        .iter()
        .zip(per_year)
        .map(|(category, counts)| CategorySeries {
            category: category.clone(),
            points: extend_to_extent(accumulate(counts), extent),
        })
        .collect()
}

fn accumulate(counts: BTreeMap<Year, usize>) -> Vec<SeriesPoint> {
    let mut running = 0usize;
    counts
        .into_iter()
        .map(|(year, n)| {
            running += n;
            SeriesPoint::new(year, running)
        })
        .collect()
}

fn extend_to_extent(mut points: Vec<SeriesPoint>, extent: YearRange) -> Vec<SeriesPoint> {
    let (Some(first), Some(last)) = (points.first().copied(), points.last().copied()) else {
        return points;
    };
    if first.year > extent.min() {
        points.insert(0, SeriesPoint::new(extent.min(), 0));
    }
    if last.year < extent.max() {
        points.push(SeriesPoint::new(extent.max(), last.cumulative));
    }
    points
}
