/// Score given to candidates without a community rating.
pub const UNRATED_SCORE: f64 = 0.5;

/// Maps a 0-10 community rating onto [0, 1].
///
/// Ratings of 8 and up are rewarded steeply, ratings under 6 are punished
/// steeply, and the 6-8 band ramps linearly between them.
#[derive(Debug, Clone, Default)]
pub struct RatingScorer;

impl RatingScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, community_rating: Option<f64>) -> f64 {
        let Some(rating) = community_rating else {
            return UNRATED_SCORE;
        };

        let score = if rating >= 8.0 {
            0.8 + (rating - 8.0) * 0.1
        } else if rating >= 7.0 {
            0.6 + (rating - 7.0) * 0.2
        } else if rating >= 6.0 {
            0.4 + (rating - 6.0) * 0.2
        } else {
            rating / 15.0
        };

        score.clamp(0.0, 1.0)
    }
}
