//! Weighted text composition.
//!
//! Each entity becomes one normalised text blob in which a field's
//! influence is controlled by how many times it is repeated. Profile and
//! listing blobs are built from paired fields (title, education, detail,
//! skills) so that both land in the same term space.

use crate::config::FieldWeights;
use crate::model::{CandidateProfile, JobListing};
use crate::normalize::normalize_text;

/// Compose the profile blob: desired field, education track, latest
/// certification, skills.
pub fn compose_profile(profile: &CandidateProfile, weights: &FieldWeights) -> String {
    compose(&[
        (profile.desired_field.as_str(), weights.desired_field),
        (profile.education_track.as_str(), weights.education_track),
        (
            profile.latest_certification.as_str(),
            weights.latest_certification,
        ),
        (profile.skills.as_str(), weights.skills),
    ])
}

/// Compose a listing blob: position, required education, description,
/// required skills.
pub fn compose_listing(listing: &JobListing, weights: &FieldWeights) -> String {
    compose(&[
        (listing.position.as_str(), weights.position),
        (listing.education.as_str(), weights.education),
        (listing.description.as_str(), weights.description),
        (listing.skills.as_str(), weights.listing_skills),
    ])
}

fn compose(fields: &[(&str, usize)]) -> String {
    let mut raw = String::new();
    for &(value, times) in fields {
        for _ in 0..times {
            raw.push_str(value);
            raw.push(' ');
        }
    }
    normalize_text(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> CandidateProfile {
        CandidateProfile {
            user_id: 1,
            desired_field: "Data Analyst".into(),
            education_track: "IPA".into(),
            latest_certification: "".into(),
            skills: "SQL, Excel".into(),
        }
    }

    fn listing() -> JobListing {
        JobListing {
            id: 1,
            company: "Acme".into(),
            position: "Analyst".into(),
            location: "Jakarta".into(),
            education: "S1".into(),
            description: "Build reports.".into(),
            skills: "SQL".into(),
            image: "".into(),
            status: "open".into(),
        }
    }

    #[test]
    fn profile_repeats_by_weight() {
        let text = compose_profile(&profile(), &FieldWeights::default());
        assert_eq!(text.matches("data analyst").count(), 3);
        assert_eq!(text.matches("sql excel").count(), 5);
        assert_eq!(text.matches("ipa").count(), 1);
        assert!(!text.contains("  "));
    }

    #[test]
    fn listing_repeats_skills_five_times() {
        let text = compose_listing(&listing(), &FieldWeights::default());
        assert_eq!(
            text,
            "analyst s1 build reports sql sql sql sql sql"
        );
    }

    #[test]
    fn zero_weight_omits_field() {
        let weights = FieldWeights {
            skills: 0,
            ..FieldWeights::default()
        };
        let text = compose_profile(&profile(), &weights);
        assert!(!text.contains("sql"));
    }

    #[test]
    fn blank_fields_compose_to_empty() {
        let blank = CandidateProfile {
            user_id: 2,
            desired_field: String::new(),
            education_track: String::new(),
            latest_certification: String::new(),
            skills: String::new(),
        };
        assert_eq!(compose_profile(&blank, &FieldWeights::default()), "");
    }
}
