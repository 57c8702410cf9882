use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::scoring::Candidate;
use crate::user::profile::WatchedItem;

const GENRES: [&str; 12] = [
    "Action",
    "Adventure",
    "Animation",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Fantasy",
    "Horror",
    "Romance",
    "Science Fiction",
    "Thriller",
];

const NETWORKS: [&str; 6] = ["HBO", "Netflix", "BBC", "AMC", "FX", "Apple TV+"];

/// Recency-ordered watch history that leans towards a few favourite genres.
pub fn generate_synthetic_history(len: usize, seed: u64) -> Vec<WatchedItem> {
    let mut rng = StdRng::seed_from_u64(seed);
    let favourites = pick_genres(&mut rng, 3);

    (0..len)
        .map(|idx| {
            let primary = if rng.gen::<f64>() < 0.75 {
                favourites[rng.gen_range(0..favourites.len())]
            } else {
                GENRES[rng.gen_range(0..GENRES.len())]
            };
            let mut genres = vec![primary.to_string()];
            if rng.gen::<f64>() < 0.4 {
                let secondary = GENRES[rng.gen_range(0..GENRES.len())];
                if secondary != primary {
                    genres.push(secondary.to_string());
                }
            }
            WatchedItem {
                id: format!("watched_{}", idx),
                genres,
                watched_at: None,
            }
        })
        .collect()
}

/// Candidate pool with random genres, ratings, similarities and networks.
pub fn generate_synthetic_candidates(len: usize, seed: u64) -> Vec<Candidate> {
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));

    (0..len)
        .map(|idx| {
            let genre_count = rng.gen_range(0..=3);
            let genres = pick_genres(&mut rng, genre_count)
                .into_iter()
                .map(str::to_string)
                .collect();
            let community_rating = if rng.gen::<f64>() < 0.1 {
                None
            } else {
                Some((rng.gen_range(3.0..9.5_f64) * 10.0).round() / 10.0)
            };
            let network = if rng.gen::<f64>() < 0.5 {
                Some(NETWORKS[rng.gen_range(0..NETWORKS.len())].to_string())
            } else {
                None
            };
            Candidate {
                id: format!("candidate_{}", idx),
                title: Some(format!("Title {}", idx)),
                genres,
                community_rating,
                similarity: rng.gen_range(0.2..0.95),
                network,
            }
        })
        .collect()
}

fn pick_genres(rng: &mut StdRng, count: usize) -> Vec<&'static str> {
    GENRES.choose_multiple(rng, count).copied().collect()
}
