use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::scoring::{Candidate, GenreSplit, NoveltyScorer, RatingScorer, ScoredCandidate};
use crate::user::GenrePreferenceProfile;

pub const PREFERENCE_BONUS_SCALE: f64 = 0.3;
pub const PREFERENCE_BONUS_CAP: f64 = 0.15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub similarity: f64,
    pub novelty: f64,
    pub rating: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            similarity: 0.5,
            novelty: 0.2,
            rating: 0.2,
        }
    }
}

impl ScoreWeights {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("weights.similarity", self.similarity),
            ("weights.novelty", self.novelty),
            ("weights.rating", self.rating),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct WeightedScorer {
    weights: ScoreWeights,
    novelty_scorer: NoveltyScorer,
    rating_scorer: RatingScorer,
}

impl WeightedScorer {
    pub fn new(weights: ScoreWeights) -> Self {
        Self {
            weights,
            novelty_scorer: NoveltyScorer::new(),
            rating_scorer: RatingScorer::new(),
        }
    }

    /// Scores one candidate against the profile.
    pub fn score_one(&self, candidate: Candidate, profile: &GenrePreferenceProfile) -> ScoredCandidate {
        let split = GenreSplit::new(&candidate.genres, profile);
        let novelty = self.novelty_scorer.score(&split);
        let rating_score = self.rating_scorer.score(candidate.community_rating);
        let preference_bonus = preference_bonus(&split);

        let final_score = candidate.similarity * self.weights.similarity
            + novelty * self.weights.novelty
            + rating_score * self.weights.rating
            + preference_bonus;

        ScoredCandidate::new(candidate, novelty, rating_score, preference_bonus, final_score)
    }

    /// Scores every candidate and returns them best first.
    ///
    /// Equal scores fall back to ascending id so the order is total.
    pub fn score(
        &self,
        candidates: Vec<Candidate>,
        profile: &GenrePreferenceProfile,
    ) -> Vec<ScoredCandidate> {
        let mut scored: Vec<ScoredCandidate> = candidates
            .into_iter()
            .map(|candidate| self.score_one(candidate, profile))
            .collect();

        scored.sort_by(|a, b| {
            b.final_score()
                .total_cmp(&a.final_score())
                .then_with(|| a.id().cmp(b.id()))
        });

        scored
    }
}

fn preference_bonus(split: &GenreSplit) -> f64 {
    (split.known_preference_sum * PREFERENCE_BONUS_SCALE).min(PREFERENCE_BONUS_CAP)
}
