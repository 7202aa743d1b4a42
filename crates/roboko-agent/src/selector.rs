//! Score-weighted sampling.
//!
//! Scores are squared, normalized, and sampled by walking the cumulative
//! distribution with one uniform draw. Squaring sharpens preference for the
//! strongest options while leaving weak ones reachable.

use rand::Rng;

use crate::candidate::Candidate;

/// Pick one candidate.
///
/// A single candidate is returned without consuming randomness. When every
/// weight is zero the first candidate is returned. Non-finite or negative
/// scores weigh nothing.
pub fn select<'c, R: Rng>(candidates: &'c [Candidate], rng: &mut R) -> Option<&'c Candidate> {
    if let [only] = candidates {
        return Some(only);
    }

    let weights: Vec<f64> = candidates.iter().map(|c| weight(c.score)).collect();
    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return candidates.first();
    }

    let mut draw: f64 = rng.random::<f64>();
    for (candidate, w) in candidates.iter().zip(&weights) {
        draw -= w / total;
        if draw <= 0.0 {
            return Some(candidate);
        }
    }
    // Rounding can leave a sliver above zero after the last subtraction.
    candidates.last()
}

fn weight(score: f64) -> f64 {
    if score.is_finite() && score > 0.0 { score * score } else { 0.0 }
}
