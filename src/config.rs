use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{JobRankError, Result};

/// Top-level configuration for jobrank.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Number of listings returned per recommendation.
    pub top_n: usize,
    /// Listing status that marks a posting as open. Compared exactly, with
    /// no trimming or case folding.
    pub open_status: String,
    /// Guard added to min-max denominators.
    pub epsilon: f64,
    pub fields: FieldWeights,
    pub scaling: ScalingConfig,
    pub bonus: BonusConfig,
    pub vectorizer: VectorizerConfig,
    pub store: StoreConfig,
}

/// Repetition counts used when composing the weighted text blobs.
///
/// The profile side and the listing side are paired by meaning: job
/// title, education, free-text detail, skills.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldWeights {
    pub desired_field: usize,
    pub education_track: usize,
    pub latest_certification: usize,
    pub skills: usize,
    pub position: usize,
    pub education: usize,
    pub description: usize,
    pub listing_skills: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScalingConfig {
    /// Multiplier applied to the min-max value before `ln(1 + x)`.
    pub stretch: f64,
    /// Final display multiplier.
    pub multiplier: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BonusConfig {
    pub field_points: u32,
    pub skill_points: u32,
    pub matcher: MatcherKind,
    /// Skip blank terms instead of scoring them. A blank term is contained
    /// in every text, so with this off a missing desired field or an empty
    /// skill entry earns points on every listing.
    pub skip_blank_terms: bool,
}

/// Keyword containment policy used by the bonus rules.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MatcherKind {
    Substring,
    WholeWord,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VectorizerConfig {
    pub ngram_min: usize,
    pub ngram_max: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Dataset file backing the profile and listing stores.
    pub data: Option<PathBuf>,
    pub max_attempts: u32,
    pub retry_backoff_ms: u64,
}

// --- Defaults ---

impl Default for Config {
    fn default() -> Self {
        Self {
            top_n: 6,
            open_status: "open".into(),
            epsilon: 1e-9,
            fields: FieldWeights::default(),
            scaling: ScalingConfig::default(),
            bonus: BonusConfig::default(),
            vectorizer: VectorizerConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            desired_field: 3,
            education_track: 1,
            latest_certification: 1,
            skills: 5,
            position: 1,
            education: 1,
            description: 1,
            listing_skills: 5,
        }
    }
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self {
            stretch: 9.0,
            multiplier: 100.0,
        }
    }
}

impl Default for BonusConfig {
    fn default() -> Self {
        Self {
            field_points: 10,
            skill_points: 3,
            matcher: MatcherKind::Substring,
            skip_blank_terms: false,
        }
    }
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            ngram_min: 1,
            ngram_max: 2,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data: None,
            max_attempts: 3,
            retry_backoff_ms: 100,
        }
    }
}

// --- Config methods ---

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            JobRankError::io(format!("reading config from '{}'", path.display()), e)
        })?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| JobRankError::config_with_source("failed to parse config", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let content = toml::to_string_pretty(self)
            .map_err(|e| JobRankError::config_with_source("failed to serialize config", e))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                JobRankError::io(
                    format!("creating config directory '{}'", parent.display()),
                    e,
                )
            })?;
        }
        std::fs::write(path, content).map_err(|e| {
            JobRankError::io(format!("writing config to '{}'", path.display()), e)
        })
    }

    /// Validate config values.
    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(JobRankError::validation("top_n", "must be greater than 0"));
        }
        if self.epsilon.is_nan() || self.epsilon <= 0.0 {
            return Err(JobRankError::validation("epsilon", "must be positive"));
        }
        if self.open_status.trim().is_empty() {
            return Err(JobRankError::validation("open_status", "must not be empty"));
        }
        let s = &self.scaling;
        if s.stretch.is_nan() || s.stretch <= 0.0 || s.multiplier.is_nan() || s.multiplier <= 0.0 {
            return Err(JobRankError::validation(
                "scaling",
                "stretch and multiplier must be positive",
            ));
        }
        let v = &self.vectorizer;
        if v.ngram_min == 0 || v.ngram_min > v.ngram_max {
            return Err(JobRankError::validation(
                "vectorizer",
                "ngram range must satisfy 1 <= ngram_min <= ngram_max",
            ));
        }
        if self.store.max_attempts == 0 {
            return Err(JobRankError::validation(
                "store.max_attempts",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Builder for constructing Config with selective overrides.
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Start from an already loaded config.
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.config.top_n = top_n;
        self
    }

    pub fn with_data(mut self, data: PathBuf) -> Self {
        self.config.store.data = Some(data);
        self
    }

    pub fn with_matcher(mut self, matcher: MatcherKind) -> Self {
        self.config.bonus.matcher = matcher;
        self
    }

    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Discover the config file using standard search order:
/// 1. Explicit path (if provided)
/// 2. ./jobrank.toml
/// 3. ~/.jobrank.toml
/// 4. XDG config dir
pub fn find_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = explicit {
        if p.exists() {
            return Some(p.to_path_buf());
        }
        return None;
    }

    let local = PathBuf::from("jobrank.toml");
    if local.exists() {
        return Some(local);
    }

    if let Some(home) = dirs_home() {
        let home_config = home.join(".jobrank.toml");
        if home_config.exists() {
            return Some(home_config);
        }
    }

    if let Some(proj_dirs) = ProjectDirs::from("", "", "jobrank") {
        let xdg = proj_dirs.config_dir().join("jobrank.toml");
        if xdg.exists() {
            return Some(xdg);
        }
    }

    None
}

/// Load the discovered config, or defaults when none exists.
pub fn load_or_default(explicit: Option<&Path>) -> Result<Config> {
    if let Some(p) = explicit {
        if !p.exists() {
            return Err(JobRankError::config(format!(
                "config file '{}' does not exist",
                p.display()
            )));
        }
    }
    match find_config_file(explicit) {
        Some(p) => Config::load(&p),
        None => Ok(Config::default()),
    }
}

fn dirs_home() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf())
}
