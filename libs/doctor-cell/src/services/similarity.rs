// libs/doctor-cell/src/services/similarity.rs
//
// Pluggable string-similarity scoring. Every caller applies its own cutoff
// on its own scale: the symptom matcher works on 0-1, the booking engine on
// 0-100 (score * 100).

/// Scores how alike two strings are, on a 0.0..=1.0 scale.
pub trait SimilarityScorer: Send + Sync {
    fn score(&self, a: &str, b: &str) -> f64;
}

/// Normalized Levenshtein similarity. Tolerates the typo-and-variant noise
/// of free-typed doctor names and symptom keywords.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditDistanceScorer;

impl SimilarityScorer for EditDistanceScorer {
    fn score(&self, a: &str, b: &str) -> f64 {
        strsim::normalized_levenshtein(a, b)
    }
}

/// Best-scoring candidate at or above `cutoff`, or None. Ties keep the
/// earliest candidate.
pub fn best_match<'a, I>(
    scorer: &dyn SimilarityScorer,
    query: &str,
    candidates: I,
    cutoff: f64,
) -> Option<(&'a str, f64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, f64)> = None;
    for candidate in candidates {
        let score = scorer.score(query, candidate);
        if score >= cutoff && best.map(|(_, s)| score > s).unwrap_or(true) {
            best = Some((candidate, score));
        }
    }
    best
}
