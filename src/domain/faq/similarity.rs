//! Cosine similarity and stable argmax over cached FAQ embeddings.

/// Cosine similarity between two vectors.
///
/// Returns 0.0 when either vector has zero magnitude or lengths differ;
/// similarity against a degenerate embedding should never select it.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += f64::from(*x) * f64::from(*y);
        norm_a += f64::from(*x) * f64::from(*x);
        norm_b += f64::from(*y) * f64::from(*y);
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Index and similarity of the closest embedding to `query`.
///
/// Stable argmax: on an exact similarity tie the earliest entry in load
/// order wins. Returns `None` for an empty candidate set.
pub fn best_match(query: &[f32], candidates: &[Vec<f32>]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        let score = cosine_similarity(query, candidate);
        match best {
            // Strictly greater keeps the first entry on ties.
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((index, score)),
        }
    }
    best
}
