//! Response projection and output formatting.
//!
//! A [`Recommendation`] (or an informational outcome such as an unknown
//! user) is turned into an [`ApiResponse`], which carries the external
//! JSON field names, and then rendered as JSON, Markdown or plain text and
//! written to a file or stdout.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{JobRankError, Result};
use crate::pipeline::Recommendation;
use crate::ranker::ScoredListing;

pub const USER_NOT_FOUND: &str = "user not found";
pub const NO_LISTINGS: &str = "no listings available";

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Controls where and how output is written.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    pub format: Format,
    /// If true, write to stdout instead of a file.
    pub stdout: bool,
    /// File path to write to (ignored when `stdout` is true).
    pub out: Option<PathBuf>,
}

/// Supported output formats.
///
/// Mirrors [`crate::cli::OutputFormat`] but decoupled from clap so that
/// library code can use it without pulling in CLI dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Markdown,
    Plain,
}

/// Body returned to the caller of a recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiResponse {
    Ranked(RankedResponse),
    Message(MessageResponse),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResponse {
    pub user_id: u64,
    pub total_loker_ditemukan: usize,
    pub total_rekomendasi: usize,
    pub rekomendasi: Vec<ListingProjection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// One recommended listing as exposed on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingProjection {
    pub id: u64,
    pub nama_perusahaan: String,
    pub posisi: String,
    pub lokasi: String,
    pub pendidikan: String,
    pub gambar: String,
    pub deskripsi: String,
    pub skills: String,
    pub similarity: f64,
    pub bonus: u32,
    pub final_score: f64,
    pub relevansi_persen: f64,
}

impl From<&ScoredListing> for ListingProjection {
    fn from(item: &ScoredListing) -> Self {
        let l = &item.listing;
        Self {
            id: l.id,
            nama_perusahaan: l.company.clone(),
            posisi: l.position.clone(),
            lokasi: l.location.clone(),
            pendidikan: l.education.clone(),
            gambar: l.image.clone(),
            deskripsi: l.description.clone(),
            skills: l.skills.clone(),
            similarity: item.similarity,
            bonus: item.bonus,
            final_score: item.final_score,
            relevansi_persen: item.relevance_percent,
        }
    }
}

impl From<&Recommendation> for RankedResponse {
    fn from(rec: &Recommendation) -> Self {
        Self {
            user_id: rec.user_id,
            total_loker_ditemukan: rec.total_considered,
            total_rekomendasi: rec.total_returned,
            rekomendasi: rec.items.iter().map(ListingProjection::from).collect(),
        }
    }
}

impl ApiResponse {
    fn message(text: &str) -> Self {
        Self::Message(MessageResponse {
            message: text.to_string(),
        })
    }
}

/// Message shown to the caller for an informational outcome.
pub fn informational_message(err: &JobRankError) -> Option<&'static str> {
    if !err.is_informational() {
        return None;
    }
    Some(match err {
        JobRankError::ProfileNotFound { .. } => USER_NOT_FOUND,
        _ => NO_LISTINGS,
    })
}

/// Map a pipeline outcome to a response. Informational outcomes become
/// messages; every other error is passed through.
pub fn respond(outcome: Result<Recommendation>) -> Result<ApiResponse> {
    match outcome {
        Ok(rec) => Ok(ApiResponse::Ranked(RankedResponse::from(&rec))),
        Err(e) => match informational_message(&e) {
            Some(text) => Ok(ApiResponse::message(text)),
            None => Err(e),
        },
    }
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Render a response to a string in the given format.
pub fn format_response(response: &ApiResponse, format: Format) -> Result<String> {
    match format {
        Format::Json => format_json(response),
        Format::Markdown => Ok(format_markdown(response)),
        Format::Plain => Ok(format_plain(response)),
    }
}

fn format_json(response: &ApiResponse) -> Result<String> {
    let mut json = serde_json::to_string_pretty(response).map_err(|e| {
        JobRankError::data_with_source("failed to serialize response as JSON", e)
    })?;
    json.push('\n');
    Ok(json)
}

/// Markdown: one heading per listing with its score line.
fn format_markdown(response: &ApiResponse) -> String {
    let ranked = match response {
        ApiResponse::Ranked(r) => r,
        ApiResponse::Message(m) => return format!("> {}\n", m.message),
    };

    let mut out = String::new();
    out.push_str(&format!("# Recommendations for user {}\n\n", ranked.user_id));
    out.push_str(&format!(
        "> {} of {} open listing{}\n\n",
        ranked.total_rekomendasi,
        ranked.total_loker_ditemukan,
        if ranked.total_loker_ditemukan == 1 { "" } else { "s" },
    ));

    for (rank, item) in ranked.rekomendasi.iter().enumerate() {
        out.push_str(&format!("## {}. {}", rank + 1, item.posisi));
        if !item.nama_perusahaan.is_empty() {
            out.push_str(&format!(" at {}", item.nama_perusahaan));
        }
        out.push('\n');
        out.push_str(&format!(
            "*relevance {:.1}%, final {:.2} (similarity {:.2} + bonus {})*\n\n",
            item.relevansi_persen, item.final_score, item.similarity, item.bonus
        ));
        if !item.lokasi.is_empty() {
            out.push_str(&format!("- location: {}\n", item.lokasi));
        }
        if !item.pendidikan.is_empty() {
            out.push_str(&format!("- education: {}\n", item.pendidikan));
        }
        if !item.skills.is_empty() {
            out.push_str(&format!("- skills: {}\n", item.skills));
        }
        if !item.deskripsi.is_empty() {
            out.push_str(&format!("\n{}\n", item.deskripsi));
        }
        out.push('\n');
    }

    out
}

/// Plain text: one tab-separated line per listing.
fn format_plain(response: &ApiResponse) -> String {
    let ranked = match response {
        ApiResponse::Ranked(r) => r,
        ApiResponse::Message(m) => return format!("{}\n", m.message),
    };

    let mut out = format!(
        "user {}: {} of {} listings\n",
        ranked.user_id, ranked.total_rekomendasi, ranked.total_loker_ditemukan
    );
    for item in &ranked.rekomendasi {
        out.push_str(&format!(
            "{:>6.1}%\t{:>8.2}\t{}\t{}\t{}\n",
            item.relevansi_persen, item.final_score, item.id, item.posisi, item.nama_perusahaan
        ));
    }
    out
}

// ---------------------------------------------------------------------------
// Output writing
// ---------------------------------------------------------------------------

/// Write a formatted string to the appropriate destination.
///
/// Writes to stdout when `options.stdout` is set or no file is given;
/// otherwise writes to `options.out`, creating parent directories.
pub fn write_output(content: &str, options: &FormatOptions) -> Result<()> {
    match (&options.out, options.stdout) {
        (Some(path), false) => write_to_file(content, path),
        _ => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .map_err(|e| JobRankError::io("writing to stdout", e))
        }
    }
}

/// Write content to a file, creating parent directories if needed.
fn write_to_file(content: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            JobRankError::io(format!("creating directory '{}'", parent.display()), e)
        })?;
    }
    std::fs::write(path, content)
        .map_err(|e| JobRankError::io(format!("writing output to '{}'", path.display()), e))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonus::BonusBreakdown;
    use crate::model::JobListing;

    fn sample_recommendation() -> Recommendation {
        let listing = JobListing {
            id: 10,
            company: "Acme".into(),
            position: "Software Engineer".into(),
            location: "Bandung".into(),
            education: "SMK".into(),
            description: "Build APIs".into(),
            skills: "Python, Django".into(),
            image: "acme.png".into(),
            status: "open".into(),
        };
        Recommendation {
            user_id: 7,
            total_considered: 4,
            total_returned: 1,
            matcher: "substring".into(),
            items: vec![ScoredListing {
                listing,
                cosine: 0.42,
                similarity: 230.25,
                bonus: 13,
                final_score: 243.25,
                relevance_percent: 100.0,
                matched: BonusBreakdown::default(),
                shared_terms: vec!["python".into()],
            }],
        }
    }

    #[test]
    fn json_uses_wire_field_names() {
        let response = respond(Ok(sample_recommendation())).unwrap();
        let json = format_json(&response).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["user_id"], 7);
        assert_eq!(parsed["total_loker_ditemukan"], 4);
        assert_eq!(parsed["total_rekomendasi"], 1);
        let item = &parsed["rekomendasi"][0];
        assert_eq!(item["id"], 10);
        assert_eq!(item["nama_perusahaan"], "Acme");
        assert_eq!(item["posisi"], "Software Engineer");
        assert_eq!(item["gambar"], "acme.png");
        assert_eq!(item["bonus"], 13);
        assert_eq!(item["relevansi_persen"], 100.0);
        assert!(item.get("status").is_none());
    }

    #[test]
    fn not_found_becomes_message() {
        let response = respond(Err(JobRankError::ProfileNotFound { user_id: 3 })).unwrap();
        let json = format_json(&response).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["message"], USER_NOT_FOUND);
    }

    #[test]
    fn no_listings_becomes_message() {
        let response = respond(Err(JobRankError::NoListingsAvailable)).unwrap();
        assert_eq!(
            response,
            ApiResponse::Message(MessageResponse {
                message: NO_LISTINGS.into()
            })
        );
    }

    #[test]
    fn other_errors_pass_through() {
        let err = respond(Err(JobRankError::DegenerateVocabulary)).unwrap_err();
        assert!(matches!(err, JobRankError::DegenerateVocabulary));
    }

    #[test]
    fn markdown_lists_positions() {
        let response = respond(Ok(sample_recommendation())).unwrap();
        let md = format_markdown(&response);
        assert!(md.contains("# Recommendations for user 7"));
        assert!(md.contains("## 1. Software Engineer at Acme"));
        assert!(md.contains("relevance 100.0%"));
        assert!(md.contains("> 1 of 4 open listings"));
    }

    #[test]
    fn plain_has_one_line_per_listing() {
        let response = respond(Ok(sample_recommendation())).unwrap();
        let plain = format_plain(&response);
        assert_eq!(plain.lines().count(), 2);
        assert!(plain.contains("Software Engineer"));
    }

    #[test]
    fn write_to_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("dir").join("out.json");
        write_to_file("{}", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }
}
