//! Candidate scoring and diversity-aware selection for Aperture recommendations.
//!
//! A pass builds a genre profile from the user's recent watches, scores the
//! candidate pool, greedily selects a diverse top-K and assigns ranks:
//!
//! ```
//! use aperture_rec::{recommend, PipelineConfig};
//!
//! let rows = recommend(&PipelineConfig::default(), Vec::new(), &[]).unwrap();
//! assert!(rows.is_empty());
//! ```

pub mod config;
pub mod error;
pub mod ranking;
pub mod scoring;
pub mod user;

pub use config::{PipelineConfig, PipelineLimits};
pub use error::{ConfigError, InputError, RecommendError, SelectionError};
pub use ranking::{assign_ranks, RankedRecommendation};
pub use scoring::{
    Candidate, DiversityConfig, DiversitySelector, PipelineOutput, RecommendationPipeline,
    ScoreWeights, ScoredCandidate, SelectionResult, WeightedScorer,
};
pub use user::{GenrePreferenceProfile, WatchedItem};

/// Runs one full pass and returns persistence-ready rows.
pub fn recommend(
    config: &PipelineConfig,
    candidates: Vec<Candidate>,
    watched: &[WatchedItem],
) -> Result<Vec<RankedRecommendation>, RecommendError> {
    let pipeline = RecommendationPipeline::new(config.clone())?;
    let output = pipeline.run(candidates, watched)?;
    Ok(output.recommendations())
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.*}", digits, value)
}

pub fn format_percent(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}
