//! Explainable ranking of open job listings against a candidate profile.
//!
//! The pipeline composes a weighted text blob per entity, fits a TF-IDF
//! space over the request's documents, scores cosine similarity, rescales
//! it for display, adds keyword bonuses and keeps the top listings. See
//! [`pipeline::recommend`] for the entry point.

pub mod bonus;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod features;
pub mod model;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod ranker;
pub mod scaling;
pub mod similarity;
pub mod store;
pub mod vectorizer;
