//! Handler for the `jobrank explain` command.
//!
//! Runs the same pipeline as `recommend` and prints a human-readable
//! breakdown of each selected listing: raw cosine and the terms behind it,
//! stretched similarity, which bonus rules fired, final score and
//! relevance.

use std::path::PathBuf;

use colored::Colorize;

use crate::config::Config;
use crate::error::Result;
use crate::output;
use crate::pipeline::{self, Recommendation};
use crate::ranker::ScoredListing;

// ---------------------------------------------------------------------------
// Public interface
// ---------------------------------------------------------------------------

/// All inputs needed to run the explain command.
#[derive(Debug)]
pub struct ExplainCommandOptions {
    pub user_id: u64,
    /// Limit to top N entries.
    pub top: Option<usize>,
    /// Print the weights and constants in effect.
    pub show_weights: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Path to config file.
    pub config_path: Option<PathBuf>,
    /// Dataset override.
    pub data: Option<PathBuf>,
}

/// Run the explain command.
pub fn run(options: ExplainCommandOptions) -> Result<()> {
    let config = super::load_config(options.config_path.as_deref(), options.data.clone(), options.top)?;

    if options.show_weights {
        print_weights(&config);
    }

    let store = super::open_store(&config)?;
    let rec = match pipeline::recommend(options.user_id, &store, &store, &config) {
        Ok(rec) => rec,
        Err(e) => match output::informational_message(&e) {
            Some(message) => {
                println!("{}", message.dimmed());
                return Ok(());
            }
            None => return Err(e),
        },
    };

    for (rank, item) in rec.items.iter().enumerate() {
        for line in explain_item(rank + 1, item) {
            println!("{line}");
        }
    }

    if !options.quiet {
        println!();
        println!("{}", summary_line(&rec));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Lines describing one scored listing.
fn explain_item(rank: usize, item: &ScoredListing) -> Vec<String> {
    let l = &item.listing;
    let mut title = format!("{rank}. {}", l.position);
    if !l.company.is_empty() {
        title.push_str(&format!(" at {}", l.company));
    }

    let mut lines = vec![
        format!(
            "  {} (#{}, {:.1}% relevance)",
            title.bold(),
            l.id,
            item.relevance_percent
        ),
        format!(
            "    cosine {:.4} -> similarity {:.2}, + bonus {} = {:.2}",
            item.cosine, item.similarity, item.bonus, item.final_score
        ),
    ];

    if !item.shared_terms.is_empty() {
        lines.push(format!(
            "    shared terms: {}",
            item.shared_terms.join(", ").dimmed()
        ));
    }

    let mut reasons = Vec::new();
    if item.matched.field_matched {
        reasons.push("desired field".to_string());
    }
    reasons.extend(item.matched.matched_skills.iter().map(|s| {
        if s.is_empty() {
            "blank skill entry".to_string()
        } else {
            format!("skill '{s}'")
        }
    }));
    if reasons.is_empty() {
        lines.push(format!("    {}", "no keyword bonus".dimmed()));
    } else {
        lines.push(format!("    bonus from: {}", reasons.join(", ").dimmed()));
    }

    lines
}

fn summary_line(rec: &Recommendation) -> String {
    format!(
        "{} {} of {} open listing{} shown for user {} ({} matching)",
        "summary:".green().bold(),
        rec.total_returned,
        rec.total_considered,
        if rec.total_considered == 1 { "" } else { "s" },
        rec.user_id,
        rec.matcher,
    )
}

/// Print the weighting policy and scoring constants.
fn print_weights(config: &Config) {
    let f = &config.fields;
    println!("{}", "Field weights (profile):".bold());
    println!("  desired field:        {}", f.desired_field);
    println!("  education track:      {}", f.education_track);
    println!("  latest certification: {}", f.latest_certification);
    println!("  skills:               {}", f.skills);
    println!("{}", "Field weights (listing):".bold());
    println!("  position:             {}", f.position);
    println!("  education:            {}", f.education);
    println!("  description:          {}", f.description);
    println!("  skills:               {}", f.listing_skills);
    println!("{}", "Scoring:".bold());
    println!(
        "  ngrams:               {}..={}",
        config.vectorizer.ngram_min, config.vectorizer.ngram_max
    );
    println!(
        "  stretch:              ln(1 + x * {}) * {}",
        config.scaling.stretch, config.scaling.multiplier
    );
    println!("  field bonus:          {}", config.bonus.field_points);
    println!("  skill bonus:          {}", config.bonus.skill_points);
    println!("  top n:                {}", config.top_n);
    println!();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonus::BonusBreakdown;
    use crate::model::JobListing;

    fn item(matched: BonusBreakdown) -> ScoredListing {
        ScoredListing {
            listing: JobListing {
                id: 3,
                company: "Roti Enak".into(),
                position: "Baker".into(),
                location: String::new(),
                education: String::new(),
                description: String::new(),
                skills: "Baking".into(),
                image: String::new(),
                status: "open".into(),
            },
            cosine: 0.5,
            similarity: 120.0,
            bonus: matched.points,
            final_score: 120.0 + f64::from(matched.points),
            relevance_percent: 100.0,
            matched,
            shared_terms: vec!["baking".into(), "baker".into()],
        }
    }

    #[test]
    fn explains_bonus_sources() {
        colored::control::set_override(false);
        let lines = explain_item(
            1,
            &item(BonusBreakdown {
                points: 13,
                field_matched: true,
                matched_skills: vec!["baking".into()],
            }),
        );
        assert!(lines[0].contains("1. Baker at Roti Enak"));
        assert!(lines[1].contains("+ bonus 13 = 133.00"));
        assert_eq!(lines[2], "    shared terms: baking, baker");
        assert!(lines[3].contains("desired field"));
        assert!(lines[3].contains("skill 'baking'"));
    }

    #[test]
    fn explains_missing_bonus() {
        colored::control::set_override(false);
        let lines = explain_item(2, &item(BonusBreakdown::default()));
        assert!(lines[3].contains("no keyword bonus"));
    }

    #[test]
    fn names_blank_skill_entries() {
        colored::control::set_override(false);
        let lines = explain_item(
            1,
            &item(BonusBreakdown {
                points: 3,
                field_matched: false,
                matched_skills: vec![String::new()],
            }),
        );
        assert!(lines[3].contains("blank skill entry"));
    }
}
