use std::path::PathBuf;

use crate::config::{Config, ConfigBuilder};
use crate::error::{JobRankError, Result};
use crate::model::{ListingRecord, ProfileRecord};
use crate::store::Dataset;

/// Options for the `init` command.
pub struct InitOptions {
    pub root: PathBuf,
    pub config_path: Option<PathBuf>,
    pub force: bool,
    pub with_sample: bool,
}

/// Result of a successful `init` operation.
#[derive(Debug)]
pub struct InitResult {
    pub config_path: PathBuf,
    pub sample_path: Option<PathBuf>,
}

/// Run the init command: write a default config and, optionally, a sample
/// dataset that the config points at.
pub fn run(options: InitOptions) -> Result<InitResult> {
    if !options.root.exists() {
        return Err(JobRankError::validation(
            "root",
            format!("directory '{}' does not exist", options.root.display()),
        ));
    }
    if !options.root.is_dir() {
        return Err(JobRankError::validation(
            "root",
            format!("'{}' is not a directory", options.root.display()),
        ));
    }

    let config_path = options
        .config_path
        .unwrap_or_else(|| options.root.join("jobrank.toml"));

    if config_path.exists() && !options.force {
        return Err(JobRankError::config(format!(
            "config already exists at '{}' (use --force to overwrite)",
            config_path.display()
        )));
    }

    let mut sample_path = None;
    let config = if options.with_sample {
        let path = options.root.join("jobrank-sample.json");
        if path.exists() && !options.force {
            return Err(JobRankError::config(format!(
                "sample dataset already exists at '{}' (use --force to overwrite)",
                path.display()
            )));
        }
        sample_dataset().save(&path)?;
        sample_path = Some(path.clone());
        ConfigBuilder::new().with_data(path).build()?
    } else {
        Config::default()
    };
    config.save(&config_path)?;

    Ok(InitResult {
        config_path,
        sample_path,
    })
}

/// A small dataset that exercises every scoring rule.
pub fn sample_dataset() -> Dataset {
    let listing = |id: u64, company: &str, position: &str, description: &str, skills: &str, status: &str| {
        ListingRecord {
            id,
            company: Some(company.into()),
            position: Some(position.into()),
            location: Some("Jakarta".into()),
            education: Some("SMK".into()),
            description: Some(description.into()),
            skills: Some(skills.into()),
            image: Some(format!("loker-{id}.png")),
            status: Some(status.into()),
        }
    };

    Dataset {
        profiles: vec![
            ProfileRecord {
                user_id: 1,
                desired_field: Some("Software Engineer".into()),
                education_track: Some("Rekayasa Perangkat Lunak".into()),
                latest_certification: Some("Oracle SQL Associate".into()),
                skills: Some("Python, SQL, Git".into()),
            },
            ProfileRecord {
                user_id: 2,
                desired_field: Some("Barista".into()),
                education_track: None,
                latest_certification: None,
                skills: Some("Espresso, Customer service".into()),
            },
        ],
        listings: vec![
            listing(1, "Nusantara Tech", "Software Engineer", "Build internal services.", "Python, Django, Git", "open"),
            listing(2, "Data Prima", "Data Analyst", "Own weekly reporting.", "SQL, Excel", "open"),
            listing(3, "Roti Enak", "Baker", "Early morning shifts.", "Baking", "open"),
            listing(4, "Kopi Kita", "Barista", "Serve espresso drinks.", "Espresso, Customer service", "open"),
            listing(5, "Cloud Nine", "DevOps Engineer", "Run CI and deployments.", "Git, Linux, Docker", "open"),
            listing(6, "Nusantara Tech", "QA Engineer", "Automate regression tests.", "Python, Selenium", "open"),
            listing(7, "Old Corp", "Software Engineer", "Position filled.", "Python", "closed"),
            listing(8, "Toko Baju", "Cashier", "Front desk and payments.", "Cash handling", "open"),
        ],
    }
}
