//! Country normalization and per-country counts for the choropleth map.

use std::collections::HashMap;

use crate::types::{Bucket, Record};

use super::aggregate::ranked_counts;

const UNCERTAINTY_PREFIXES: [&str; 4] = ["probably", "possible", "possibly", "central"];

/// Map a free-text country of origin onto the name used by the world map.
///
/// Returns `None` for blank input.
pub fn normalize_country(raw: &str) -> Option<String> {
    let mut n = raw.trim().to_lowercase();
    n = n
        .trim_end_matches(|c: char| c == '?' || c == '(' || c == ')' || c.is_whitespace())
        .trim()
        .to_string();
    if let Some(rest) = strip_uncertainty_prefix(&n) {
        n = rest.trim().to_string();
    }
    if let Some(rest) = n.strip_prefix("present-day ") {
        n = rest.trim().to_string();
    }
    if n.is_empty() {
        return None;
    }

    let alias = match n.as_str() {
        "united states" | "usa" | "u.s.a." | "u.s.a" | "us" => Some("United States of America"),
        "england" | "scotland" | "wales" => Some("United Kingdom"),
        "czech republic" => Some("Czechia"),
        "republic of the philippines" => Some("Philippines"),
        "myanmar (formerly burma" => Some("Myanmar"),
        "republic of cameroon" => Some("Cameroon"),
        "croatia (former yugoslavia" => Some("Croatia"),
        _ => None,
    };
    Some(match alias {
        Some(name) => name.to_string(),
        None => title_case(&n),
    })
}

fn strip_uncertainty_prefix(n: &str) -> Option<&str> {
    UNCERTAINTY_PREFIXES.iter().find_map(|p| {
        let rest = n.strip_prefix(p)?;
        rest.starts_with(char::is_whitespace).then_some(rest)
    })
}

fn title_case(n: &str) -> String {
    n.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Object counts per normalized country, largest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryCounts {
    ranked: Vec<Bucket>,
    index: HashMap<String, usize>,
}

impl CountryCounts {
    /// Build from already-counted `(country, count)` pairs (e.g. a preprocessed JSON map).
    ///
    /// Pairs are re-sorted by count, descending; duplicate names are summed.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, usize)>) -> Self {
        let mut ranked: Vec<Bucket> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for (name, count) in pairs {
            match index.get(&name) {
                Some(&pos) => ranked[pos].count += count,
                None => {
                    index.insert(name.clone(), ranked.len());
                    ranked.push(Bucket::new(name, count));
                }
            }
        }
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        Self::from_ranked(ranked)
    }

    fn from_ranked(ranked: Vec<Bucket>) -> Self {
        let index = ranked
            .iter()
            .enumerate()
            .map(|(i, b)| (b.key.clone(), i))
            .collect();
        Self { ranked, index }
    }

    /// Count for `country`, 0 when the map has no objects from it.
    pub fn get(&self, country: &str) -> usize {
        self.index
            .get(country)
            .map(|&i| self.ranked[i].count)
            .unwrap_or(0)
    }

    /// Largest count, used as the upper end of the log color scale.
    pub fn max_count(&self) -> usize {
        self.ranked.first().map(|b| b.count).unwrap_or(0)
    }

    pub fn ranked(&self) -> &[Bucket] {
        &self.ranked
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

/// Count records per normalized country. Records without a usable country are skipped.
pub fn country_counts(records: &[Record]) -> CountryCounts {
    let normalized: Vec<Option<String>> = records
        .iter()
        .map(|r| r.country.as_deref().and_then(normalize_country))
        .collect();
    CountryCounts::from_ranked(ranked_counts(&normalized, |c| c.as_deref()))
}
