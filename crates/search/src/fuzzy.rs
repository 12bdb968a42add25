use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Matcher, Utf32String};
use review_record::Field;
use serde::Serialize;

use crate::config::{SearchConfig, SearchKey};
use crate::error::Result;

/// A ranked hit: position in the searched corpus plus similarity in 0..=1
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldMatch {
    pub index: usize,
    pub score: f32,
}

/// Fuzzy search over fields using nucleo-matcher
pub struct FuzzySearch {
    matcher: Matcher,
    config: SearchConfig,
}

impl FuzzySearch {
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            matcher: Matcher::new(nucleo_matcher::Config::DEFAULT),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Rank fields against `query`.
    ///
    /// A blank query returns the first `limit` fields in corpus order with
    /// score 1.0. Otherwise each configured key gets two similarities: the
    /// subsequence score normalized against the query matched with itself,
    /// and a per-word edit-distance score that tolerates typos such as
    /// transposed letters. The best of these wins, and fields below
    /// `1 - threshold` are dropped. Equal scores keep corpus order.
    pub fn search(&mut self, fields: &[Field], query: &str) -> Vec<FieldMatch> {
        let query = query.trim();
        let limit = self.config.limit;

        if query.is_empty() {
            return (0..fields.len().min(limit))
                .map(|index| FieldMatch { index, score: 1.0 })
                .collect();
        }

        let pattern = Pattern::new(
            query,
            CaseMatching::Smart,
            Normalization::Smart,
            AtomKind::Fuzzy,
        );
        let ideal = {
            let haystack = Utf32String::from(query);
            pattern
                .score(haystack.slice(..), &mut self.matcher)
                .filter(|score| *score > 0)
                .unwrap_or(1)
        };
        let query_words = words(query);
        let min_similarity = 1.0 - self.config.threshold;
        let search_keys = &self.config.keys;
        let matcher = &mut self.matcher;

        let mut scored: Vec<(usize, f64)> = fields
            .iter()
            .enumerate()
            .filter_map(|(index, field)| {
                let similarity = search_keys
                    .iter()
                    .map(|key| {
                        let text = match key {
                            SearchKey::Label => field.label.as_str(),
                            SearchKey::Key => field.key.as_str(),
                        };
                        let haystack = Utf32String::from(text);
                        let subsequence = pattern
                            .score(haystack.slice(..), matcher)
                            .map_or(0.0, |score| (f64::from(score) / f64::from(ideal)).min(1.0));
                        subsequence.max(typo_similarity(&query_words, text))
                    })
                    .fold(0.0, f64::max);

                (similarity > 0.0 && similarity >= min_similarity).then_some((index, similarity))
            })
            .collect();

        // Stable sort: ties stay in corpus order
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(limit);

        log::debug!(
            "Fuzzy search '{query}' matched {} of {} fields",
            scored.len(),
            fields.len()
        );

        scored
            .into_iter()
            .map(|(index, similarity)| FieldMatch {
                index,
                score: similarity as f32,
            })
            .collect()
    }
}

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Mean over query words of the closest Damerau-Levenshtein match among the
/// words of `text`, in 0..=1
fn typo_similarity(query_words: &[String], text: &str) -> f64 {
    let text_words = words(text);
    if query_words.is_empty() || text_words.is_empty() {
        return 0.0;
    }
    let total: f64 = query_words
        .iter()
        .map(|query_word| {
            text_words
                .iter()
                .map(|word| strsim::normalized_damerau_levenshtein(query_word, word))
                .fold(0.0, f64::max)
        })
        .sum();
    total / query_words.len() as f64
}

/// One-shot search returning the matched fields in rank order
pub fn search<'a>(fields: &'a [Field], query: &str, config: &SearchConfig) -> Result<Vec<&'a Field>> {
    let mut engine = FuzzySearch::new(config.clone())?;
    Ok(engine
        .search(fields, query)
        .into_iter()
        .map(|hit| &fields[hit.index])
        .collect())
}
