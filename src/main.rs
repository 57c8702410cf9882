use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use aperture_rec::user::{generate_synthetic_candidates, generate_synthetic_history};
use aperture_rec::{
    format_float, format_percent, Candidate, PipelineConfig, PipelineOutput,
    RecommendationPipeline, WatchedItem,
};

#[derive(Parser)]
#[command(name = "aperture-rec", about = "Aperture recommendation scoring and selection")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Score and select from a candidate pool stored as JSON.
    Recommend(RecommendArgs),
    /// Run a pass over seeded synthetic data.
    Simulate(SimulateArgs),
    /// Write the default configuration file.
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug, Clone, Default)]
struct ConfigArgs {
    #[arg(long)]
    config: Option<PathBuf>,
    /// Use default weights when the config cannot be loaded.
    #[arg(long)]
    fallback_defaults: bool,
    #[arg(long)]
    count: Option<usize>,
    #[arg(long)]
    diversity_weight: Option<f64>,
    #[arg(long)]
    network_diversity: bool,
}

#[derive(Args, Debug, Clone, Default)]
struct OutputArgs {
    /// Print ranked rows as JSON instead of a table.
    #[arg(long)]
    json: bool,
    #[arg(long)]
    details: bool,
}

#[derive(Args, Debug, Clone)]
struct RecommendArgs {
    #[arg(long)]
    candidates: PathBuf,
    #[arg(long)]
    history: Option<PathBuf>,
    #[command(flatten)]
    config: ConfigArgs,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug, Clone)]
struct SimulateArgs {
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value_t = 200)]
    pool: usize,
    #[arg(long, default_value_t = 40)]
    history: usize,
    #[command(flatten)]
    config: ConfigArgs,
    #[command(flatten)]
    output: OutputArgs,
}

impl Default for SimulateArgs {
    fn default() -> Self {
        Self {
            seed: 42,
            pool: 200,
            history: 40,
            config: ConfigArgs::default(),
            output: OutputArgs::default(),
        }
    }
}

#[derive(Args, Debug, Clone)]
struct InitConfigArgs {
    #[arg(long, default_value = "config/recommender.toml")]
    path: PathBuf,
}

fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Simulate(SimulateArgs::default()));

    match command {
        Command::Recommend(args) => run_recommend(args),
        Command::Simulate(args) => run_simulate(args),
        Command::InitConfig(args) => run_init_config(args),
    }
}

fn run_recommend(args: RecommendArgs) -> Result<(), String> {
    let config = resolve_config(&args.config)?;
    let candidates: Vec<Candidate> = read_json(&args.candidates)?;
    let watched: Vec<WatchedItem> = match args.history.as_ref() {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };
    execute(config, candidates, &watched, &args.output)
}

fn run_simulate(args: SimulateArgs) -> Result<(), String> {
    let config = resolve_config(&args.config)?;
    let watched = generate_synthetic_history(args.history, args.seed);
    let candidates = generate_synthetic_candidates(args.pool, args.seed);
    info!(seed = args.seed, pool = candidates.len(), history = watched.len(), "generated synthetic data");
    execute(config, candidates, &watched, &args.output)
}

fn run_init_config(args: InitConfigArgs) -> Result<(), String> {
    PipelineConfig::default()
        .write(&args.path)
        .map_err(|err| err.to_string())?;
    println!("Wrote default config to {}", args.path.display());
    Ok(())
}

fn resolve_config(args: &ConfigArgs) -> Result<PipelineConfig, String> {
    let mut config = match PipelineConfig::load(args.config.clone()) {
        Ok((config, path)) => {
            if let Some(path) = path {
                info!(path = %path.display(), "loaded recommender config");
            }
            config
        }
        Err(err) if args.fallback_defaults => {
            warn!(error = %err, "config load failed, using defaults");
            PipelineConfig::default()
        }
        Err(err) => return Err(err.to_string()),
    };

    if let Some(count) = args.count {
        config.limits.selected_count = count;
    }
    if let Some(weight) = args.diversity_weight {
        config.diversity.weight = weight;
    }
    if args.network_diversity {
        config.diversity.use_network_diversity = true;
    }

    config.validate().map_err(|err| err.to_string())?;
    Ok(config)
}

fn execute(
    config: PipelineConfig,
    candidates: Vec<Candidate>,
    watched: &[WatchedItem],
    output_args: &OutputArgs,
) -> Result<(), String> {
    let pipeline = RecommendationPipeline::new(config).map_err(|err| err.to_string())?;
    let output = pipeline
        .run(candidates, watched)
        .map_err(|err| err.to_string())?;

    if output_args.json {
        let payload = serde_json::to_string_pretty(&output.recommendations())
            .map_err(|err| format!("failed to serialize recommendations: {}", err))?;
        println!("{}", payload);
        return Ok(());
    }

    print_report(&output, output_args.details);
    Ok(())
}

fn print_report(output: &PipelineOutput, details: bool) {
    let profile = &output.profile;
    println!(
        "Taste profile: {} recent watches, {} genre tags",
        profile.window_len(),
        profile.total_occurrences()
    );
    let top = profile
        .top_genres(5)
        .into_iter()
        .map(|(genre, share)| format!("{} {}", genre, format_percent(share)))
        .collect::<Vec<_>>();
    if !top.is_empty() {
        println!("Top genres: {}", top.join(" | "));
    }
    println!(
        "Selected {} of {} candidates\n",
        output.selection.len(),
        output.scored.len()
    );

    for row in output.recommendations() {
        let label = row.title.as_deref().unwrap_or(&row.candidate_id);
        println!(
            "{:>3}. {} [{}] score {}",
            row.rank,
            label,
            row.genres.join(", "),
            format_float(row.final_score, 3)
        );
        if details {
            println!(
                "     similarity {} | novelty {} | rating {} | preference {} | diversity {} | step {}",
                format_float(row.similarity, 2),
                format_float(row.novelty, 2),
                format_float(row.rating_score, 2),
                format_float(row.preference_bonus, 2),
                format_float(row.diversity_boost, 2),
                format_float(row.step_score, 3)
            );
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let data = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {}", path.display(), err))?;
    serde_json::from_str(&data).map_err(|err| format!("failed to parse {}: {}", path.display(), err))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
