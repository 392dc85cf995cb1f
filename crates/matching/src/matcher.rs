use std::collections::HashSet;

use strsim::{jaro_winkler, normalized_levenshtein};

/// Minimum score an approximate match needs to be accepted.
pub const DEFAULT_ACCEPTANCE_THRESHOLD: f64 = 0.75;

/// Upper bound for any non-identical pair, so an exact match always ranks first.
const MAX_APPROXIMATE_SCORE: f64 = 0.99;

/// Score floor when one name contains the other's words in order.
const CONTAINMENT_FLOOR: f64 = 0.75;

/// Shortest side allowed to earn the containment floor.
const MIN_CONTAINED_CHARS: usize = 3;

#[derive(Debug)]
pub struct Match<'a, T> {
    pub item: &'a T,
    pub score: f64,
}

/// Lowercases, trims and collapses inner whitespace.
pub fn normalize(value: &str) -> String {
    value
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Similarity of two normalized names in `0.0..=1.0`.
///
/// `1.0` only for identical input. Character closeness mixes normalized
/// Levenshtein with Jaro-Winkler; word overlap uses the Dice coefficient so
/// reordered multi-word names still score well.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }

    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let characters = (normalized_levenshtein(a, b) + jaro_winkler(a, b)) / 2.0;
    let words = 0.25 * characters + 0.75 * token_dice(a, b);
    let mut score = characters.max(words);

    let (shorter, longer) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let shorter_len = shorter.chars().count();
    if shorter_len >= MIN_CONTAINED_CHARS && contains_words(longer, shorter) {
        let ratio = shorter_len as f64 / longer.chars().count() as f64;
        score = score.max(CONTAINMENT_FLOOR + 0.2 * ratio);
    }

    score.min(MAX_APPROXIMATE_SCORE)
}

/// Whether `needle` appears in `haystack` as a run of whole words.
fn contains_words(haystack: &str, needle: &str) -> bool {
    format!(" {haystack} ").contains(&format!(" {needle} "))
}

fn token_dice(a: &str, b: &str) -> f64 {
    let left = a.split(' ').collect::<HashSet<_>>();
    let right = b.split(' ').collect::<HashSet<_>>();
    let shared = left.intersection(&right).count();

    2.0 * shared as f64 / (left.len() + right.len()) as f64
}

/// Resolves free text against a closed catalog without ever inventing entries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matcher {
    threshold: f64,
}

impl Default for Matcher {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
        }
    }
}

impl Matcher {
    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn find_best_match<'a, T>(
        &self,
        query: &str,
        catalog: &'a [T],
        name_of: impl Fn(&'a T) -> &'a str,
    ) -> Option<Match<'a, T>> {
        self.find_best_match_any(query, catalog, |item| [name_of(item)])
    }

    /// Like [`Matcher::find_best_match`], scoring each entry by the best of
    /// several names (a unit's singular and plural, for instance).
    ///
    /// Exact case-insensitive equality on any name wins immediately. Ties
    /// between approximate candidates go to the shortest name, then to
    /// catalog order.
    pub fn find_best_match_any<'a, T, I>(
        &self,
        query: &str,
        catalog: &'a [T],
        names_of: impl Fn(&'a T) -> I,
    ) -> Option<Match<'a, T>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let query = normalize(query);
        if query.is_empty() || catalog.is_empty() {
            return None;
        }

        let scored = catalog
            .iter()
            .map(|item| {
                let names = names_of(item)
                    .into_iter()
                    .map(normalize)
                    .collect::<Vec<_>>();
                (item, names)
            })
            .collect::<Vec<_>>();

        if let Some((item, _)) = scored
            .iter()
            .find(|(_, names)| names.iter().any(|name| *name == query))
        {
            return Some(Match {
                item: *item,
                score: 1.0,
            });
        }

        let mut best: Option<(&'a T, f64, usize)> = None;
        for (item, names) in &scored {
            let Some((score, len)) = names
                .iter()
                .map(|name| (similarity(&query, name), name.chars().count()))
                .reduce(|acc, next| if next.0 > acc.0 { next } else { acc })
            else {
                continue;
            };

            let better = match best {
                None => true,
                Some((_, best_score, best_len)) => {
                    score > best_score || (score == best_score && len < best_len)
                }
            };
            if better {
                best = Some((*item, score, len));
            }
        }

        let (item, score, _) = best?;
        if score < self.threshold {
            tracing::debug!(
                query = query.as_str(),
                score,
                "best candidate below acceptance threshold"
            );
            return None;
        }

        Some(Match { item, score })
    }
}

/// [`Matcher::find_best_match`] with the default acceptance threshold.
pub fn find_best_match<'a, T>(
    query: &str,
    catalog: &'a [T],
    name_of: impl Fn(&'a T) -> &'a str,
) -> Option<Match<'a, T>> {
    Matcher::default().find_best_match(query, catalog, name_of)
}
