use std::collections::BTreeSet;

use crate::user::GenrePreferenceProfile;

pub const FAMILIAR_NOVELTY: f64 = 0.4;
pub const UNFAMILIAR_NOVELTY: f64 = 0.3;
pub const NOVELTY_RATIO_CEILING: f64 = 0.7;

/// A candidate's unique genres split against the user's genre profile.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreSplit {
    pub total: usize,
    pub novel: usize,
    pub known_preference_sum: f64,
}

impl GenreSplit {
    pub fn new(genres: &[String], profile: &GenrePreferenceProfile) -> Self {
        let unique: BTreeSet<&str> = genres.iter().map(String::as_str).collect();

        let mut novel = 0usize;
        let mut known_preference_sum = 0.0;
        for genre in &unique {
            let preference = profile.preference(genre);
            if preference > 0.0 {
                known_preference_sum += preference;
            } else {
                novel += 1;
            }
        }

        Self {
            total: unique.len(),
            novel,
            known_preference_sum,
        }
    }

    /// Share of genres the user has not watched recently; 0 with no genres.
    pub fn novelty_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.novel as f64 / self.total as f64
        }
    }
}

/// Rewards partial genre novelty, penalizes mostly-unfamiliar candidates.
#[derive(Debug, Clone, Default)]
pub struct NoveltyScorer;

impl NoveltyScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, split: &GenreSplit) -> f64 {
        novelty_from_ratio(split.novelty_ratio())
    }
}

pub fn novelty_from_ratio(ratio: f64) -> f64 {
    if ratio >= NOVELTY_RATIO_CEILING {
        UNFAMILIAR_NOVELTY
    } else if ratio > 0.0 {
        0.5 + ratio * 0.5
    } else {
        FAMILIAR_NOVELTY
    }
}
