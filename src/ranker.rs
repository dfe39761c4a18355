//! Final scoring and top-N selection.
//!
//! Combines the stretched similarity with the rule bonus into a final
//! score, converts it into a batch-relative relevance percentage, and
//! keeps the best listings.

use serde::Serialize;

use crate::bonus::BonusBreakdown;
use crate::model::JobListing;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Per-listing signals produced by the earlier pipeline stages.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingSignals {
    /// Raw cosine similarity against the profile.
    pub cosine: f64,
    /// Min-max normalised and log-stretched similarity.
    pub similarity: f64,
    pub bonus: BonusBreakdown,
    /// Terms the listing shares with the profile, strongest first.
    pub shared_terms: Vec<String>,
}

/// A listing annotated with its scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredListing {
    pub listing: JobListing,
    pub cosine: f64,
    pub similarity: f64,
    pub bonus: u32,
    pub final_score: f64,
    /// Min-max rescaling of `final_score` over the current batch, 0-100.
    pub relevance_percent: f64,
    pub matched: BonusBreakdown,
    pub shared_terms: Vec<String>,
}

// ---------------------------------------------------------------------------
// Scoring functions
// ---------------------------------------------------------------------------

/// Rank listings and keep the first `top_n`.
///
/// `final_score = similarity + bonus`. Relevance is computed over the whole
/// batch before truncation. Sorting is stable and descending by final
/// score, so equal scores keep their input order.
pub fn rank_listings(
    listings: &[JobListing],
    signals: &[ListingSignals],
    top_n: usize,
    epsilon: f64,
) -> Vec<ScoredListing> {
    let finals: Vec<f64> = signals
        .iter()
        .map(|s| final_score(s.similarity, s.bonus.points))
        .collect();
    let relevance = relevance_percent(&finals, epsilon);

    let mut scored: Vec<ScoredListing> = listings
        .iter()
        .zip(signals)
        .zip(finals.iter().zip(relevance))
        .map(|((listing, s), (&final_score, relevance_percent))| ScoredListing {
            listing: listing.clone(),
            cosine: s.cosine,
            similarity: s.similarity,
            bonus: s.bonus.points,
            final_score,
            relevance_percent,
            matched: s.bonus.clone(),
            shared_terms: s.shared_terms.clone(),
        })
        .collect();

    scored.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));
    scored.truncate(top_n);
    scored
}

pub fn final_score(similarity: f64, bonus: u32) -> f64 {
    similarity + f64::from(bonus)
}

/// `(x - min) / (max - min + epsilon) * 100` for every value.
pub fn relevance_percent(finals: &[f64], epsilon: f64) -> Vec<f64> {
    crate::scaling::min_max(finals, epsilon)
        .into_iter()
        .map(|v| v * 100.0)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn listing(id: u64) -> JobListing {
        JobListing {
            id,
            company: format!("Company {id}"),
            position: String::new(),
            location: String::new(),
            education: String::new(),
            description: String::new(),
            skills: String::new(),
            image: String::new(),
            status: "open".into(),
        }
    }

    fn signals(similarity: f64, bonus: u32) -> ListingSignals {
        ListingSignals {
            cosine: 0.0,
            similarity,
            bonus: BonusBreakdown {
                points: bonus,
                ..BonusBreakdown::default()
            },
            shared_terms: Vec::new(),
        }
    }

    #[test]
    fn final_score_adds_bonus() {
        assert_eq!(final_score(50.5, 13), 63.5);
    }

    #[test]
    fn sorts_descending_and_truncates() {
        let listings: Vec<_> = (1..=8).map(listing).collect();
        let sig: Vec<_> = [10.0, 80.0, 30.0, 5.0, 60.0, 0.0, 45.0, 20.0]
            .iter()
            .map(|&s| signals(s, 0))
            .collect();
        let ranked = rank_listings(&listings, &sig, 6, EPS);

        assert_eq!(ranked.len(), 6);
        let ids: Vec<u64> = ranked.iter().map(|r| r.listing.id).collect();
        assert_eq!(ids, vec![2, 5, 7, 3, 8, 1]);
        assert!(ranked
            .windows(2)
            .all(|w| w[0].final_score >= w[1].final_score));
    }

    #[test]
    fn ties_keep_input_order() {
        let listings: Vec<_> = (1..=3).map(listing).collect();
        let sig = vec![signals(10.0, 0), signals(10.0, 0), signals(10.0, 0)];
        let ranked = rank_listings(&listings, &sig, 6, EPS);
        let ids: Vec<u64> = ranked.iter().map(|r| r.listing.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn relevance_spans_zero_to_hundred() {
        let listings: Vec<_> = (1..=3).map(listing).collect();
        let sig = vec![signals(0.0, 3), signals(100.0, 10), signals(40.0, 0)];
        let ranked = rank_listings(&listings, &sig, 6, EPS);

        assert!((ranked[0].relevance_percent - 100.0).abs() < 1e-6);
        assert_eq!(ranked[2].relevance_percent, 0.0);
        assert!(ranked
            .iter()
            .all(|r| (0.0..=100.0).contains(&r.relevance_percent)));
    }

    #[test]
    fn relevance_is_computed_before_truncation() {
        let listings: Vec<_> = (1..=3).map(listing).collect();
        let sig = vec![signals(100.0, 0), signals(50.0, 0), signals(0.0, 0)];
        let ranked = rank_listings(&listings, &sig, 2, EPS);
        assert_eq!(ranked.len(), 2);
        assert!((ranked[1].relevance_percent - 50.0).abs() < 1e-6);
    }

    #[test]
    fn flat_scores_give_zero_relevance() {
        let relevance = relevance_percent(&[12.0, 12.0], EPS);
        assert_eq!(relevance, vec![0.0, 0.0]);
    }

    #[test]
    fn empty_input() {
        let ranked = rank_listings(&[], &[], 6, EPS);
        assert!(ranked.is_empty());
    }
}
