//! Placeholder relevance scoring and simulated embeddings.
//!
//! Not a retrieval model: a substring match lifts a document into the
//! upper score band, and a random component spreads scores within a band.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::Rng;

use vectool_types::{Document, SearchResult};

/// Lower bound of the band for documents containing the query.
pub(crate) const MATCH_FLOOR: f64 = 0.8;
/// Lower bound of the band for all other documents.
pub(crate) const BASE_FLOOR: f64 = 0.5;

/// Scores every document and returns the best `limit`, highest first.
///
/// Matching documents land in `[0.8, 1.0]`, the rest in `[0.5, 0.8)`.
pub(crate) fn rank<'a>(
    documents: impl Iterator<Item = &'a Document>,
    query: &str,
    limit: usize,
) -> Vec<SearchResult> {
    let needle = query.to_lowercase();
    let mut rng = rand::thread_rng();

    let mut results: Vec<SearchResult> = documents
        .map(|doc| {
            let score = if matches(doc, &needle) {
                rng.gen_range(MATCH_FLOOR..=1.0)
            } else {
                rng.gen_range(BASE_FLOOR..MATCH_FLOOR)
            };
            SearchResult {
                document: doc.clone(),
                score,
            }
        })
        .collect();

    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results.truncate(limit);
    results
}

fn matches(doc: &Document, needle: &str) -> bool {
    !needle.is_empty()
        && (doc.text.to_lowercase().contains(needle) || doc.content.to_lowercase().contains(needle))
}

/// Deterministic pseudo-embedding of `text`: hashed bag of words,
/// L2-normalised. Identical text always yields the identical vector.
pub(crate) fn simulate_embedding(text: &str, dimensions: usize) -> Vec<f32> {
    let mut vector = vec![0f32; dimensions];
    if dimensions == 0 {
        return vector;
    }
    for token in text.split_whitespace() {
        let mut hasher = DefaultHasher::new();
        token.to_lowercase().hash(&mut hasher);
        let h = hasher.finish();
        let slot = (h % dimensions as u64) as usize;
        let sign = if h & (1 << 63) == 0 { 1.0 } else { -1.0 };
        vector[slot] += sign;
    }
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        vector.iter_mut().for_each(|v| *v /= norm);
    }
    vector
}
