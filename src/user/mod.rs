pub mod profile;
pub mod synthetic;

pub use profile::{GenrePreferenceProfile, WatchedItem, PROFILE_WINDOW_CAP};
pub use synthetic::{generate_synthetic_candidates, generate_synthetic_history};
