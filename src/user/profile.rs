use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Hard cap on how many recent watches feed the genre profile.
pub const PROFILE_WINDOW_CAP: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchedItem {
    pub id: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub watched_at: Option<String>,
}

impl WatchedItem {
    pub fn new(id: impl Into<String>, genres: &[&str]) -> Self {
        Self {
            id: id.into(),
            genres: genres.iter().map(|genre| genre.to_string()).collect(),
            watched_at: None,
        }
    }
}

/// Normalized genre distribution over a user's most recent watches.
///
/// Built once per scoring pass and dropped afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenrePreferenceProfile {
    genre_frequency: BTreeMap<String, usize>,
    genre_preference: BTreeMap<String, f64>,
    total_occurrences: usize,
    window_len: usize,
}

impl GenrePreferenceProfile {
    /// Builds the profile from a recency-ordered window (most recent first).
    ///
    /// Only the first `min(recent_watch_limit, PROFILE_WINDOW_CAP)` entries
    /// are considered.
    pub fn from_history(watched: &[WatchedItem], recent_watch_limit: usize) -> Self {
        let window_len = watched
            .len()
            .min(recent_watch_limit)
            .min(PROFILE_WINDOW_CAP);

        let mut genre_frequency: BTreeMap<String, usize> = BTreeMap::new();
        let mut total_occurrences = 0usize;

        for item in &watched[..window_len] {
            for genre in &item.genres {
                *genre_frequency.entry(genre.clone()).or_insert(0) += 1;
                total_occurrences += 1;
            }
        }

        let genre_preference = if total_occurrences == 0 {
            BTreeMap::new()
        } else {
            genre_frequency
                .iter()
                .map(|(genre, count)| (genre.clone(), *count as f64 / total_occurrences as f64))
                .collect()
        };

        Self {
            genre_frequency,
            genre_preference,
            total_occurrences,
            window_len,
        }
    }

    pub fn preference(&self, genre: &str) -> f64 {
        self.genre_preference.get(genre).copied().unwrap_or(0.0)
    }

    pub fn is_known(&self, genre: &str) -> bool {
        self.preference(genre) > 0.0
    }

    pub fn frequency(&self, genre: &str) -> usize {
        self.genre_frequency.get(genre).copied().unwrap_or(0)
    }

    pub fn genre_frequency(&self) -> &BTreeMap<String, usize> {
        &self.genre_frequency
    }

    pub fn genre_preference(&self) -> &BTreeMap<String, f64> {
        &self.genre_preference
    }

    pub fn total_occurrences(&self) -> usize {
        self.total_occurrences
    }

    pub fn window_len(&self) -> usize {
        self.window_len
    }

    pub fn is_empty(&self) -> bool {
        self.genre_preference.is_empty()
    }

    /// Genres ordered by preference, strongest first.
    pub fn top_genres(&self, limit: usize) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self
            .genre_preference
            .iter()
            .map(|(genre, preference)| (genre.as_str(), *preference))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(limit);
        ranked
    }
}
