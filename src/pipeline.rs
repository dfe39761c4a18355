//! End-to-end recommendation pipeline.
//!
//! [`rank`] is the pure core: profile and listings in, scored listings
//! out. [`recommend`] wraps it with the store lookups and the
//! not-found / no-listings outcomes.

use serde::Serialize;
use tracing::{debug, info};

use crate::bonus::BonusEngine;
use crate::config::Config;
use crate::error::{JobRankError, Result};
use crate::features::{compose_listing, compose_profile};
use crate::model::{CandidateProfile, JobListing};
use crate::ranker::{self, ListingSignals, ScoredListing};
use crate::scaling;
use crate::similarity;
use crate::store::{ListingStore, ProfileStore};
use crate::vectorizer::{SparseVector, TfidfVectorizer, VectorSpace};

/// Number of shared terms kept per listing for explanations.
const SHARED_TERMS_KEPT: usize = 3;

/// Result of one recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub user_id: u64,
    /// Number of open listings that were scored.
    pub total_considered: usize,
    /// Number of listings returned (at most `top_n`).
    pub total_returned: usize,
    /// Keyword matcher used for bonuses.
    pub matcher: String,
    pub items: Vec<ScoredListing>,
}

/// Score every listing against `profile` and return the best `top_n`,
/// best first.
pub fn rank(
    profile: &CandidateProfile,
    listings: &[JobListing],
    config: &Config,
) -> Result<Vec<ScoredListing>> {
    rank_with_engine(
        profile,
        listings,
        config,
        &BonusEngine::new(profile, &config.bonus),
    )
}

fn rank_with_engine(
    profile: &CandidateProfile,
    listings: &[JobListing],
    config: &Config,
    bonus: &BonusEngine,
) -> Result<Vec<ScoredListing>> {
    if listings.is_empty() {
        return Err(JobRankError::NoListingsAvailable);
    }

    let profile_text = compose_profile(profile, &config.fields);
    let listing_texts: Vec<String> = listings
        .iter()
        .map(|l| compose_listing(l, &config.fields))
        .collect();

    let mut documents = Vec::with_capacity(listings.len() + 1);
    documents.push(profile_text);
    documents.extend(listing_texts.iter().cloned());

    let (space, vectors) = TfidfVectorizer::new(&config.vectorizer).fit_transform(&documents)?;
    let (profile_vector, listing_vectors) = match vectors.split_first() {
        Some(parts) => parts,
        None => return Err(JobRankError::DegenerateVocabulary),
    };

    let cosines = similarity::cosine_all(profile_vector, listing_vectors);
    let similarities = scaling::rescale(&cosines, config.epsilon, &config.scaling);

    let signals: Vec<ListingSignals> = cosines
        .iter()
        .zip(&similarities)
        .zip(listing_texts.iter().zip(listing_vectors))
        .map(|((&cosine, &similarity), (text, vector))| ListingSignals {
            cosine,
            similarity,
            bonus: bonus.score(text),
            shared_terms: shared_terms(&space, profile_vector, vector),
        })
        .collect();

    debug!(
        user_id = profile.user_id,
        listings = listings.len(),
        vocabulary = space.len(),
        "scored listings"
    );

    Ok(ranker::rank_listings(
        listings,
        &signals,
        config.top_n,
        config.epsilon,
    ))
}

/// Strongest terms behind the cosine between `profile` and `listing`.
fn shared_terms(space: &VectorSpace, profile: &SparseVector, listing: &SparseVector) -> Vec<String> {
    similarity::contributions(profile, listing)
        .into_iter()
        .filter_map(|(index, _)| space.term(index).map(str::to_string))
        .take(SHARED_TERMS_KEPT)
        .collect()
}

/// Look up the profile and open listings, then rank.
///
/// Returns [`JobRankError::ProfileNotFound`] or
/// [`JobRankError::NoListingsAvailable`] without ranking anything when the
/// stores come back empty. Store failures abort the call.
pub fn recommend(
    user_id: u64,
    profiles: &dyn ProfileStore,
    listings: &dyn ListingStore,
    config: &Config,
) -> Result<Recommendation> {
    let profile = profiles
        .get(user_id)?
        .ok_or(JobRankError::ProfileNotFound { user_id })?;

    let open = listings.list_open()?;
    if open.is_empty() {
        return Err(JobRankError::NoListingsAvailable);
    }

    let engine = BonusEngine::new(&profile, &config.bonus);
    let items = rank_with_engine(&profile, &open, config, &engine)?;

    info!(
        user_id,
        considered = open.len(),
        returned = items.len(),
        "recommendation ready"
    );

    Ok(Recommendation {
        user_id,
        total_considered: open.len(),
        total_returned: items.len(),
        matcher: engine.matcher_name().to_string(),
        items,
    })
}
