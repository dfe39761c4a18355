//! Rule-based bonus points for explicit keyword overlap.
//!
//! A listing earns `field_points` when the candidate's desired field shows
//! up in its composed text, and `skill_points` for every candidate skill
//! that shows up. Repeated skills in the profile are counted each time.
//!
//! A blank term is contained in every text, so a profile without a
//! desired field, or with an empty skill entry such as the one after a
//! trailing comma, earns those points on every listing. Setting
//! `bonus.skip_blank_terms` turns that off.
//!
//! Containment is decided by a [`KeywordMatcher`]. The default
//! [`SubstringMatcher`] does plain substring search, which is crude: a
//! skill "art" matches a listing mentioning "party". [`WholeWordMatcher`]
//! avoids that and can be selected in config.

use serde::Serialize;

use crate::config::{BonusConfig, MatcherKind};
use crate::model::CandidateProfile;
use crate::normalize::normalize_text;

// ---------------------------------------------------------------------------
// Trait (extensibility point)
// ---------------------------------------------------------------------------

/// Decides whether a term is present in a composed text.
pub trait KeywordMatcher: Send + Sync {
    fn matches(&self, text: &str, term: &str) -> bool;

    /// Short identifier shown in explanations.
    fn name(&self) -> &str;
}

/// Plain substring containment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl KeywordMatcher for SubstringMatcher {
    fn matches(&self, text: &str, term: &str) -> bool {
        text.contains(term)
    }

    fn name(&self) -> &str {
        "substring"
    }
}

/// Matches the normalised term only on token boundaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct WholeWordMatcher;

impl KeywordMatcher for WholeWordMatcher {
    fn matches(&self, text: &str, term: &str) -> bool {
        let term = normalize_text(term);
        if term.is_empty() {
            return false;
        }
        format!(" {text} ").contains(&format!(" {term} "))
    }

    fn name(&self) -> &str {
        "whole-word"
    }
}

/// Build the matcher selected in config.
pub fn matcher_for(kind: MatcherKind) -> Box<dyn KeywordMatcher> {
    match kind {
        MatcherKind::Substring => Box::new(SubstringMatcher),
        MatcherKind::WholeWord => Box::new(WholeWordMatcher),
    }
}

// ---------------------------------------------------------------------------
// Bonus engine
// ---------------------------------------------------------------------------

/// Bonus awarded to one listing, with the terms that earned it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BonusBreakdown {
    pub points: u32,
    pub field_matched: bool,
    pub matched_skills: Vec<String>,
}

/// Scores listings against one candidate's desired field and skills.
pub struct BonusEngine {
    field_term: String,
    skill_terms: Vec<String>,
    field_points: u32,
    skill_points: u32,
    skip_blank_terms: bool,
    matcher: Box<dyn KeywordMatcher>,
}

impl BonusEngine {
    pub fn new(profile: &CandidateProfile, config: &BonusConfig) -> Self {
        Self::with_matcher(profile, config, matcher_for(config.matcher))
    }

    pub fn with_matcher(
        profile: &CandidateProfile,
        config: &BonusConfig,
        matcher: Box<dyn KeywordMatcher>,
    ) -> Self {
        Self {
            field_term: normalize_text(&profile.desired_field),
            skill_terms: profile.skill_terms(),
            field_points: config.field_points,
            skill_points: config.skill_points,
            skip_blank_terms: config.skip_blank_terms,
            matcher,
        }
    }

    pub fn matcher_name(&self) -> &str {
        self.matcher.name()
    }

    /// Score one listing's composed text.
    pub fn score(&self, composed: &str) -> BonusBreakdown {
        let mut breakdown = BonusBreakdown::default();

        if self.eligible(&self.field_term) && self.matcher.matches(composed, &self.field_term) {
            breakdown.field_matched = true;
            breakdown.points += self.field_points;
        }

        for skill in &self.skill_terms {
            if self.eligible(skill) && self.matcher.matches(composed, skill) {
                breakdown.points += self.skill_points;
                breakdown.matched_skills.push(skill.clone());
            }
        }

        breakdown
    }

    fn eligible(&self, term: &str) -> bool {
        !(self.skip_blank_terms && term.is_empty())
    }
}
