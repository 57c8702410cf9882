use serde::{Deserialize, Serialize};

use crate::scoring::SelectionResult;

/// Row handed to the recommendations table and the explanation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRecommendation {
    pub candidate_id: String,
    pub title: Option<String>,
    pub rank: usize,
    pub final_score: f64,
    pub similarity: f64,
    pub novelty: f64,
    pub rating_score: f64,
    pub preference_bonus: f64,
    pub diversity_boost: f64,
    pub step_score: f64,
    pub genres: Vec<String>,
}

/// 1-based ranks in selection order, with every sub-score attached.
pub fn assign_ranks(selection: &SelectionResult) -> Vec<RankedRecommendation> {
    selection
        .selected
        .iter()
        .enumerate()
        .map(|(position, item)| {
            let scored = &item.scored;
            RankedRecommendation {
                candidate_id: scored.id().to_string(),
                title: scored.candidate().title.clone(),
                rank: position + 1,
                final_score: scored.final_score(),
                similarity: scored.similarity(),
                novelty: scored.novelty(),
                rating_score: scored.rating_score(),
                preference_bonus: scored.preference_bonus(),
                diversity_boost: item.diversity_boost,
                step_score: item.step_score,
                genres: scored.genres().to_vec(),
            }
        })
        .collect()
}
