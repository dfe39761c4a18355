//! Cosine similarity between the profile vector and each listing vector.

use crate::vectorizer::SparseVector;

/// Cosine similarity of two vectors in the same space.
///
/// A zero vector on either side scores 0.0.
pub fn cosine(a: &SparseVector, b: &SparseVector) -> f64 {
    if a.is_zero() || b.is_zero() {
        return 0.0;
    }
    a.dot(b) / (a.norm() * b.norm())
}

/// Similarity of `query` against every candidate, in candidate order.
pub fn cosine_all(query: &SparseVector, candidates: &[SparseVector]) -> Vec<f64> {
    candidates.iter().map(|c| cosine(query, c)).collect()
}

/// Per-column products `a[i] * b[i]` over the columns both vectors share,
/// largest first. Ties keep column order.
pub fn contributions(a: &SparseVector, b: &SparseVector) -> Vec<(usize, f64)> {
    let mut shared: Vec<(usize, f64)> = Vec::new();
    let (mut rest_a, mut rest_b) = (a.entries(), b.entries());
    while let (Some(&(ai, av)), Some(&(bi, bv))) = (rest_a.first(), rest_b.first()) {
        if ai < bi {
            rest_a = &rest_a[1..];
        } else if bi < ai {
            rest_b = &rest_b[1..];
        } else {
            shared.push((ai, av * bv));
            rest_a = &rest_a[1..];
            rest_b = &rest_b[1..];
        }
    }
    shared.sort_by(|x, y| y.1.total_cmp(&x.1));
    shared
}
