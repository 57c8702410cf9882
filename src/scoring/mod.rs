pub mod diversity;
pub mod novelty;
pub mod pipeline;
pub mod rating;
pub mod weighted;

pub use diversity::{DiversityConfig, DiversitySelector, SelectedCandidate, SelectionResult};
pub use novelty::{GenreSplit, NoveltyScorer};
pub use pipeline::{Candidate, PipelineOutput, RecommendationPipeline, ScoredCandidate};
pub use rating::RatingScorer;
pub use weighted::{ScoreWeights, WeightedScorer};
