use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::error::{ConfigError, SelectionError};
use crate::scoring::ScoredCandidate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiversityConfig {
    pub weight: f64,
    pub use_network_diversity: bool,
}

impl Default for DiversityConfig {
    fn default() -> Self {
        Self {
            weight: 0.3,
            use_network_diversity: false,
        }
    }
}

impl DiversityConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.weight.is_finite() || !(0.0..=1.0).contains(&self.weight) {
            return Err(ConfigError::InvalidWeight {
                name: "diversity.weight",
                value: self.weight,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedCandidate {
    pub scored: ScoredCandidate,
    pub diversity_boost: f64,
    pub step_score: f64,
    pub rank: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectionResult {
    pub selected: Vec<SelectedCandidate>,
    pub selected_ranks: BTreeMap<String, usize>,
}

impl SelectionResult {
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn rank_of(&self, id: &str) -> Option<usize> {
        self.selected_ranks.get(id).copied()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.selected.iter().map(|item| item.scored.id()).collect()
    }
}

/// Genre and network counts over the items picked so far.
#[derive(Debug, Default)]
struct SelectedMix {
    len: usize,
    genres: HashMap<String, usize>,
    networks: HashMap<String, usize>,
}

impl SelectedMix {
    fn add(&mut self, candidate: &ScoredCandidate) {
        self.len += 1;
        let unique: BTreeSet<&str> = candidate.genres().iter().map(String::as_str).collect();
        for genre in unique {
            *self.genres.entry(genre.to_string()).or_insert(0) += 1;
        }
        if let Some(network) = candidate.network() {
            *self.networks.entry(network.to_string()).or_insert(0) += 1;
        }
    }
}

/// Greedy top-K selection that re-evaluates redundancy after every pick.
#[derive(Debug, Clone)]
pub struct DiversitySelector {
    config: DiversityConfig,
}

impl DiversitySelector {
    pub(crate) fn new(config: DiversityConfig) -> Self {
        Self { config }
    }

    pub fn try_new(config: DiversityConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Diversity boost in [-1, 1] for `candidate` against the current picks.
    fn diversity_boost(&self, candidate: &ScoredCandidate, mix: &SelectedMix) -> f64 {
        if mix.len == 0 {
            return 0.0;
        }
        let selected_len = mix.len as f64;

        let unique: BTreeSet<&str> = candidate.genres().iter().map(String::as_str).collect();
        let genre_term = if unique.is_empty() {
            None
        } else {
            let mut unrepresented = 0usize;
            let mut saturation = 0.0;
            for genre in &unique {
                match mix.genres.get(*genre) {
                    Some(count) => saturation += *count as f64 / selected_len,
                    None => unrepresented += 1,
                }
            }
            let total = unique.len() as f64;
            Some(unrepresented as f64 / total - saturation / total)
        };

        let network_term = if self.config.use_network_diversity && !mix.networks.is_empty() {
            candidate.network().map(|network| match mix.networks.get(network) {
                Some(count) => -(*count as f64 / selected_len),
                None => 1.0,
            })
        } else {
            None
        };

        match (genre_term, network_term) {
            (Some(genre), Some(network)) => (genre + network) / 2.0,
            (Some(genre), None) => genre,
            (None, Some(network)) => network,
            (None, None) => 0.0,
        }
    }

    /// Picks up to `count` candidates from a pool already sorted by score.
    ///
    /// `final_score` is only read. Boosts are recomputed at every step
    /// against the items picked so far. On equal step scores the earlier
    /// pool entry wins.
    pub fn select(
        &self,
        candidates: &[ScoredCandidate],
        count: usize,
    ) -> Result<SelectionResult, SelectionError> {
        if count == 0 {
            return Err(SelectionError::InvalidCount);
        }

        let mut seen: HashSet<&str> = HashSet::with_capacity(candidates.len());
        for candidate in candidates {
            if !seen.insert(candidate.id()) {
                return Err(SelectionError::DuplicateId(candidate.id().to_string()));
            }
        }

        let weight = self.config.weight;
        let mut remaining: Vec<usize> = (0..candidates.len()).collect();
        let mut mix = SelectedMix::default();
        let mut result = SelectionResult::default();

        while result.selected.len() < count && !remaining.is_empty() {
            let mut best: Option<(usize, f64, f64)> = None;

            for (slot, &index) in remaining.iter().enumerate() {
                let candidate = &candidates[index];
                let boost = self.diversity_boost(candidate, &mix);
                let step_score = candidate.final_score() * (1.0 - weight) + boost * weight;

                let better = match best {
                    Some((_, _, best_score)) => step_score > best_score,
                    None => true,
                };
                if better {
                    best = Some((slot, boost, step_score));
                }
            }

            let Some((slot, diversity_boost, step_score)) = best else {
                break;
            };

            let index = remaining.remove(slot);
            let picked = &candidates[index];
            mix.add(picked);

            let rank = result.selected.len() + 1;
            result.selected_ranks.insert(picked.id().to_string(), rank);
            result.selected.push(SelectedCandidate {
                scored: picked.clone(),
                diversity_boost,
                step_score,
                rank,
            });
        }

        Ok(result)
    }
}
