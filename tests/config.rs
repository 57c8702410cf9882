use std::env;
use std::path::PathBuf;

use aperture_rec::{ConfigError, PipelineConfig};

const ENV_KEYS: [&str; 9] = [
    "APERTURE_CONFIG_PATH",
    "APERTURE_SIMILARITY_WEIGHT",
    "APERTURE_NOVELTY_WEIGHT",
    "APERTURE_RATING_WEIGHT",
    "APERTURE_DIVERSITY_WEIGHT",
    "APERTURE_NETWORK_DIVERSITY",
    "APERTURE_SELECTED_COUNT",
    "APERTURE_MAX_CANDIDATES",
    "APERTURE_RECENT_WATCH_LIMIT",
];

fn clear_env() {
    for key in ENV_KEYS {
        env::remove_var(key);
    }
}

#[test]
fn default_config_is_valid() {
    let config = PipelineConfig::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.weights.similarity, 0.5);
    assert_eq!(config.diversity.weight, 0.3);
    assert_eq!(config.limits.selected_count, 50);
}

#[test]
fn config_round_trips_through_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("recommender.toml");

    let mut config = PipelineConfig::default();
    config.weights.rating = 0.35;
    config.diversity.use_network_diversity = true;
    config.limits.selected_count = 12;
    config.write(&path).unwrap();

    let loaded = PipelineConfig::read(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn partial_toml_falls_back_to_section_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.toml");
    std::fs::write(&path, "[diversity]\nweight = 0.6\n").unwrap();

    let loaded = PipelineConfig::read(&path).unwrap();

    assert_eq!(loaded.diversity.weight, 0.6);
    assert!(!loaded.diversity.use_network_diversity);
    assert_eq!(loaded.weights, PipelineConfig::default().weights);
    assert_eq!(loaded.limits, PipelineConfig::default().limits);
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[weights\nsimilarity = ").unwrap();

    assert!(matches!(PipelineConfig::read(&path), Err(ConfigError::Parse(_))));
}

#[test]
fn missing_explicit_path_is_not_found() {
    let path = PathBuf::from("/nonexistent/aperture/recommender.toml");

    assert!(matches!(
        PipelineConfig::load(Some(path)),
        Err(ConfigError::NotFound(_))
    ));
}

#[test]
fn validation_rejects_bad_values_without_clamping() {
    let mut config = PipelineConfig::default();
    config.weights.similarity = -1.0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidWeight { name: "weights.similarity", .. })
    ));

    let mut config = PipelineConfig::default();
    config.weights.rating = f64::INFINITY;
    assert!(config.validate().is_err());

    let mut config = PipelineConfig::default();
    config.limits.recent_watch_limit = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidCount { name: "limits.recent_watch_limit" })
    ));
}

// Env vars are process-wide, so every load() that reads them lives here.
#[test]
fn load_applies_file_then_env_overrides() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recommender.toml");
    std::fs::write(&path, "[weights]\nsimilarity = 0.7\n\n[limits]\nselected_count = 20\n").unwrap();

    let (config, resolved) = PipelineConfig::load(Some(path.clone())).unwrap();
    assert_eq!(resolved, Some(path.clone()));
    assert_eq!(config.weights.similarity, 0.7);
    assert_eq!(config.limits.selected_count, 20);

    env::set_var("APERTURE_DIVERSITY_WEIGHT", "0.55");
    env::set_var("APERTURE_SELECTED_COUNT", "8");
    env::set_var("APERTURE_NETWORK_DIVERSITY", "true");
    let (config, _) = PipelineConfig::load(Some(path.clone())).unwrap();
    assert_eq!(config.diversity.weight, 0.55);
    assert_eq!(config.limits.selected_count, 8);
    assert!(config.diversity.use_network_diversity);
    assert_eq!(config.weights.similarity, 0.7);

    env::set_var("APERTURE_SELECTED_COUNT", "many");
    assert!(matches!(
        PipelineConfig::load(Some(path.clone())),
        Err(ConfigError::InvalidEnv { ref key, .. }) if key == "APERTURE_SELECTED_COUNT"
    ));

    env::set_var("APERTURE_SELECTED_COUNT", "8");
    env::set_var("APERTURE_DIVERSITY_WEIGHT", "1.5");
    assert!(matches!(
        PipelineConfig::load(Some(path.clone())),
        Err(ConfigError::InvalidWeight { name: "diversity.weight", .. })
    ));

    clear_env();
    env::set_var("APERTURE_CONFIG_PATH", &path);
    let (config, resolved) = PipelineConfig::load(None).unwrap();
    assert_eq!(resolved, Some(path.clone()));
    assert_eq!(config.weights.similarity, 0.7);

    let typo = dir.path().join("missing").join("recommender.toml");
    env::set_var("APERTURE_CONFIG_PATH", &typo);
    assert!(matches!(
        PipelineConfig::load(None),
        Err(ConfigError::NotFound(ref missing)) if *missing == typo
    ));

    clear_env();
}
