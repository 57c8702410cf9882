use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::error::{ConfigError, InputError, RecommendError};
use crate::ranking::{assign_ranks, RankedRecommendation};
use crate::scoring::{DiversitySelector, SelectionResult, WeightedScorer};
use crate::user::{GenrePreferenceProfile, WatchedItem};

/// One item competing for a recommendation slot, as handed over by the fetcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub community_rating: Option<f64>,
    pub similarity: f64,
    #[serde(default)]
    pub network: Option<String>,
}

impl Candidate {
    pub fn new(id: impl Into<String>, genres: &[&str], community_rating: Option<f64>, similarity: f64) -> Self {
        Self {
            id: id.into(),
            title: None,
            genres: genres.iter().map(|genre| genre.to_string()).collect(),
            community_rating,
            similarity,
            network: None,
        }
    }

    pub fn with_network(mut self, network: impl Into<String>) -> Self {
        self.network = Some(network.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if self.id.trim().is_empty() {
            return Err(InputError::EmptyId);
        }
        if !self.similarity.is_finite() || !(0.0..=1.0).contains(&self.similarity) {
            return Err(InputError::InvalidSimilarity {
                id: self.id.clone(),
                value: self.similarity,
            });
        }
        if let Some(rating) = self.community_rating {
            if !rating.is_finite() {
                return Err(InputError::InvalidRating {
                    id: self.id.clone(),
                    value: rating,
                });
            }
        }
        Ok(())
    }
}

/// A candidate with its sub-scores fixed at scoring time.
///
/// Fields are read-only so nothing downstream can rewrite `final_score`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    candidate: Candidate,
    novelty: f64,
    rating_score: f64,
    preference_bonus: f64,
    final_score: f64,
}

impl ScoredCandidate {
    pub(crate) fn new(
        candidate: Candidate,
        novelty: f64,
        rating_score: f64,
        preference_bonus: f64,
        final_score: f64,
    ) -> Self {
        Self {
            candidate,
            novelty,
            rating_score,
            preference_bonus,
            final_score,
        }
    }

    pub fn candidate(&self) -> &Candidate {
        &self.candidate
    }

    pub fn id(&self) -> &str {
        &self.candidate.id
    }

    pub fn genres(&self) -> &[String] {
        &self.candidate.genres
    }

    pub fn network(&self) -> Option<&str> {
        self.candidate.network.as_deref()
    }

    pub fn similarity(&self) -> f64 {
        self.candidate.similarity
    }

    pub fn novelty(&self) -> f64 {
        self.novelty
    }

    pub fn rating_score(&self) -> f64 {
        self.rating_score
    }

    pub fn preference_bonus(&self) -> f64 {
        self.preference_bonus
    }

    pub fn final_score(&self) -> f64 {
        self.final_score
    }
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub profile: GenrePreferenceProfile,
    pub scored: Vec<ScoredCandidate>,
    pub selection: SelectionResult,
}

impl PipelineOutput {
    pub fn recommendations(&self) -> Vec<RankedRecommendation> {
        assign_ranks(&self.selection)
    }
}

/// Profile, score, select and rank one user's candidate pool.
#[derive(Debug, Clone)]
pub struct RecommendationPipeline {
    config: PipelineConfig,
    scorer: WeightedScorer,
    selector: DiversitySelector,
}

impl RecommendationPipeline {
    pub fn new(config: PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            scorer: WeightedScorer::new(config.weights.clone()),
            selector: DiversitySelector::new(config.diversity.clone()),
            config,
        })
    }

    pub fn run(
        &self,
        candidates: Vec<Candidate>,
        watched: &[WatchedItem],
    ) -> Result<PipelineOutput, RecommendError> {
        validate_pool(&candidates)?;

        let mut candidates = candidates;
        let max_candidates = self.config.limits.max_candidates;
        if candidates.len() > max_candidates {
            debug!(
                pool = candidates.len(),
                max_candidates, "truncating candidate pool"
            );
            candidates.truncate(max_candidates);
        }
        let pool_size = candidates.len();

        let profile =
            GenrePreferenceProfile::from_history(watched, self.config.limits.recent_watch_limit);
        debug!(
            window = profile.window_len(),
            genres = profile.genre_preference().len(),
            "built genre preference profile"
        );

        let scored = self.scorer.score(candidates, &profile);
        let selection = self
            .selector
            .select(&scored, self.config.limits.selected_count)?;

        info!(
            pool = pool_size,
            selected = selection.len(),
            top_score = scored.first().map(|c| c.final_score()).unwrap_or(0.0),
            "recommendation pass complete"
        );

        Ok(PipelineOutput {
            profile,
            scored,
            selection,
        })
    }
}

fn validate_pool(candidates: &[Candidate]) -> Result<(), InputError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(candidates.len());
    for candidate in candidates {
        candidate.validate()?;
        if !seen.insert(candidate.id.as_str()) {
            return Err(InputError::DuplicateId(candidate.id.clone()));
        }
    }
    Ok(())
}
