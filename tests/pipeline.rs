use aperture_rec::user::{generate_synthetic_candidates, generate_synthetic_history};
use aperture_rec::{
    recommend, Candidate, ConfigError, InputError, PipelineConfig, RecommendError,
    RecommendationPipeline, WatchedItem,
};

fn history() -> Vec<WatchedItem> {
    let mut history = Vec::new();
    for idx in 0..20 {
        history.push(WatchedItem::new(format!("action_{}", idx), &["Action"]));
    }
    for idx in 0..10 {
        history.push(WatchedItem::new(format!("drama_{}", idx), &["Drama"]));
    }
    history
}

fn config_with_count(count: usize) -> PipelineConfig {
    let mut config = PipelineConfig::default();
    config.limits.selected_count = count;
    config
}

#[test]
fn pipeline_returns_ranked_rows_with_sub_scores() {
    let candidates = vec![
        Candidate::new("action", &["Action"], Some(8.5), 0.9).with_title("Heat"),
        Candidate::new("horror_action", &["Horror", "Action"], Some(7.0), 0.8),
        Candidate::new("documentary", &["Documentary"], None, 0.4),
    ];

    let rows = recommend(&config_with_count(5), candidates, &history()).unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].candidate_id, "action");
    assert_eq!(rows[0].title.as_deref(), Some("Heat"));
    assert_eq!(rows[0].rank, 1);
    assert!((rows[0].novelty - 0.4).abs() < 1e-9);
    assert!((rows[0].rating_score - 0.85).abs() < 1e-9);
    assert!((rows[0].preference_bonus - 0.15).abs() < 1e-9);

    let horror = rows.iter().find(|row| row.candidate_id == "horror_action").unwrap();
    assert!((horror.novelty - 0.75).abs() < 1e-9);

    let ranks: Vec<usize> = rows.iter().map(|row| row.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
}

#[test]
fn pipeline_selects_configured_count() {
    let pipeline = RecommendationPipeline::new(config_with_count(10)).unwrap();

    let output = pipeline
        .run(generate_synthetic_candidates(100, 1), &generate_synthetic_history(40, 1))
        .unwrap();

    assert_eq!(output.selection.len(), 10);
    assert_eq!(output.scored.len(), 100);
    assert_eq!(output.recommendations().len(), 10);
    assert!(output.profile.window_len() <= 30);
}

#[test]
fn pipeline_truncates_to_max_candidates() {
    let mut config = config_with_count(5);
    config.limits.max_candidates = 2;
    let pipeline = RecommendationPipeline::new(config).unwrap();

    let output = pipeline
        .run(
            vec![
                Candidate::new("first", &["Drama"], None, 0.1),
                Candidate::new("second", &["Drama"], None, 0.2),
                Candidate::new("third", &["Drama"], None, 0.9),
            ],
            &[],
        )
        .unwrap();

    assert_eq!(output.scored.len(), 2);
    assert!(output.selection.rank_of("third").is_none());
}

#[test]
fn pipeline_handles_empty_pool() {
    let rows = recommend(&PipelineConfig::default(), Vec::new(), &history()).unwrap();

    assert!(rows.is_empty());
}

#[test]
fn pipeline_is_deterministic() {
    let config = config_with_count(25);
    let watched = generate_synthetic_history(40, 99);

    let first = recommend(&config, generate_synthetic_candidates(200, 99), &watched).unwrap();
    let second = recommend(&config, generate_synthetic_candidates(200, 99), &watched).unwrap();

    assert_eq!(first, second);
}

#[test]
fn pipeline_rejects_out_of_range_similarity() {
    let err = recommend(
        &PipelineConfig::default(),
        vec![Candidate::new("bad", &["Drama"], None, 1.5)],
        &[],
    )
    .unwrap_err();

    assert!(matches!(
        err,
        RecommendError::Input(InputError::InvalidSimilarity { .. })
    ));
}

#[test]
fn pipeline_rejects_nan_rating_and_empty_id() {
    let nan_rating = recommend(
        &PipelineConfig::default(),
        vec![Candidate::new("nan", &["Drama"], Some(f64::NAN), 0.5)],
        &[],
    )
    .unwrap_err();
    assert!(matches!(
        nan_rating,
        RecommendError::Input(InputError::InvalidRating { .. })
    ));

    let empty_id = recommend(
        &PipelineConfig::default(),
        vec![Candidate::new("  ", &["Drama"], None, 0.5)],
        &[],
    )
    .unwrap_err();
    assert!(matches!(empty_id, RecommendError::Input(InputError::EmptyId)));
}

#[test]
fn pipeline_rejects_duplicate_ids() {
    let err = recommend(
        &PipelineConfig::default(),
        vec![
            Candidate::new("dup", &["Drama"], None, 0.5),
            Candidate::new("dup", &["Action"], None, 0.4),
        ],
        &[],
    )
    .unwrap_err();

    assert!(matches!(
        err,
        RecommendError::Input(InputError::DuplicateId(ref id)) if id == "dup"
    ));
}

#[test]
fn pipeline_rejects_invalid_config() {
    let mut negative = PipelineConfig::default();
    negative.weights.novelty = -0.1;
    assert!(matches!(
        RecommendationPipeline::new(negative),
        Err(ConfigError::InvalidWeight { name: "weights.novelty", .. })
    ));

    assert!(matches!(
        RecommendationPipeline::new(config_with_count(0)),
        Err(ConfigError::InvalidCount { name: "limits.selected_count" })
    ));

    let mut diversity = PipelineConfig::default();
    diversity.diversity.weight = 1.2;
    assert!(RecommendationPipeline::new(diversity).is_err());
}

#[test]
fn candidates_deserialize_with_missing_optional_fields() {
    let payload = r#"[
        {"id": "a", "similarity": 0.7},
        {"id": "b", "genres": ["Drama"], "community_rating": 7.4, "similarity": 0.6, "network": "BBC"}
    ]"#;

    let candidates: Vec<Candidate> = serde_json::from_str(payload).unwrap();

    assert!(candidates[0].genres.is_empty());
    assert!(candidates[0].community_rating.is_none());
    assert_eq!(candidates[1].network.as_deref(), Some("BBC"));

    let rows = recommend(&PipelineConfig::default(), candidates, &[]).unwrap();
    assert_eq!(rows.len(), 2);
}

#[test]
fn ranked_rows_serialize_for_persistence() {
    let rows = recommend(
        &PipelineConfig::default(),
        vec![Candidate::new("a", &["Drama"], Some(7.0), 0.5)],
        &[],
    )
    .unwrap();

    let value = serde_json::to_value(&rows).unwrap();

    assert_eq!(value[0]["candidate_id"], "a");
    assert_eq!(value[0]["rank"], 1);
    assert!(value[0]["diversity_boost"].is_number());
}
