//! Candidate and listing types.
//!
//! Store implementations hand back `*Record` types whose text fields may be
//! missing; the `From` conversions coerce every missing value to an empty
//! string so nothing downstream has to deal with `None`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Domain types
// ---------------------------------------------------------------------------

/// The profile being matched against the open listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateProfile {
    pub user_id: u64,
    pub desired_field: String,
    pub education_track: String,
    pub latest_certification: String,
    /// Comma-separated skill list as entered by the candidate.
    pub skills: String,
}

/// An open job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobListing {
    pub id: u64,
    pub company: String,
    pub position: String,
    pub location: String,
    pub education: String,
    pub description: String,
    pub skills: String,
    pub image: String,
    pub status: String,
}

// ---------------------------------------------------------------------------
// Store boundary records
// ---------------------------------------------------------------------------

/// Profile row as read from a store. Legacy column names are accepted as
/// aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub user_id: u64,
    #[serde(default, deserialize_with = "text_field", alias = "bidang_pekerjaan")]
    pub desired_field: Option<String>,
    #[serde(default, deserialize_with = "text_field", alias = "jurusan_sekolah")]
    pub education_track: Option<String>,
    #[serde(default, deserialize_with = "text_field", alias = "sertifikasi_terakhir")]
    pub latest_certification: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub skills: Option<String>,
}

/// Listing row as read from a store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub id: u64,
    #[serde(default, deserialize_with = "text_field", alias = "nama_perusahaan")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "text_field", alias = "posisi")]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "text_field", alias = "lokasi")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "text_field", alias = "pendidikan")]
    pub education: Option<String>,
    #[serde(default, deserialize_with = "text_field", alias = "deskripsi")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub skills: Option<String>,
    #[serde(default, deserialize_with = "text_field", alias = "gambar")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub status: Option<String>,
}

/// Accept strings, numbers and booleans for text columns; numbers and
/// booleans are stringified, `null` stays missing.
fn text_field<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

impl From<ProfileRecord> for CandidateProfile {
    fn from(record: ProfileRecord) -> Self {
        Self {
            user_id: record.user_id,
            desired_field: record.desired_field.unwrap_or_default(),
            education_track: record.education_track.unwrap_or_default(),
            latest_certification: record.latest_certification.unwrap_or_default(),
            skills: record.skills.unwrap_or_default(),
        }
    }
}

impl From<ListingRecord> for JobListing {
    fn from(record: ListingRecord) -> Self {
        Self {
            id: record.id,
            company: record.company.unwrap_or_default(),
            position: record.position.unwrap_or_default(),
            location: record.location.unwrap_or_default(),
            education: record.education.unwrap_or_default(),
            description: record.description.unwrap_or_default(),
            skills: record.skills.unwrap_or_default(),
            image: record.image.unwrap_or_default(),
            status: record.status.unwrap_or_default(),
        }
    }
}

impl CandidateProfile {
    /// Split the skill list on commas, trimming and lowercasing each entry.
    ///
    /// Repeated and blank entries are kept, so `""` yields one blank term
    /// and `"a,"` yields `["a", ""]`.
    pub fn skill_terms(&self) -> Vec<String> {
        self.skills
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .collect()
    }
}

impl JobListing {
    /// Whether this listing's status equals the open-status marker.
    pub fn is_open(&self, open_status: &str) -> bool {
        self.status == open_status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_profile_fields_become_empty() {
        let profile = CandidateProfile::from(ProfileRecord {
            user_id: 7,
            desired_field: Some("Chef".into()),
            ..Default::default()
        });
        assert_eq!(profile.desired_field, "Chef");
        assert_eq!(profile.education_track, "");
        assert_eq!(profile.latest_certification, "");
        assert_eq!(profile.skills, "");
    }

    #[test]
    fn legacy_column_names_deserialize() {
        let record: ListingRecord = serde_json::from_str(
            r#"{"id": 3, "nama_perusahaan": "Acme", "posisi": "Baker", "deskripsi": null, "status": "open"}"#,
        )
        .unwrap();
        let listing = JobListing::from(record);
        assert_eq!(listing.company, "Acme");
        assert_eq!(listing.position, "Baker");
        assert_eq!(listing.description, "");
        assert!(listing.is_open("open"));
    }

    #[test]
    fn open_status_must_match_exactly() {
        let listing = |status: &str| {
            JobListing::from(ListingRecord {
                id: 1,
                status: Some(status.into()),
                ..Default::default()
            })
        };
        assert!(listing("buka").is_open("buka"));
        assert!(!listing(" buka").is_open("buka"));
        assert!(!listing("Buka").is_open("buka"));
        assert!(!listing("").is_open("buka"));
    }

    #[test]
    fn non_string_values_are_stringified() {
        let record: ListingRecord =
            serde_json::from_str(r#"{"id": 4, "pendidikan": 12, "skills": true}"#).unwrap();
        assert_eq!(record.education.as_deref(), Some("12"));
        assert_eq!(record.skills.as_deref(), Some("true"));
        assert_eq!(record.status, None);
    }

    #[test]
    fn skill_terms_keep_duplicates_and_blanks() {
        let profile = CandidateProfile::from(ProfileRecord {
            user_id: 1,
            skills: Some(" Python, SQL,,python ".into()),
            ..Default::default()
        });
        assert_eq!(profile.skill_terms(), vec!["python", "sql", "", "python"]);

        let blank = CandidateProfile::from(ProfileRecord {
            user_id: 2,
            ..Default::default()
        });
        assert_eq!(blank.skill_terms(), vec![""]);
    }
}
