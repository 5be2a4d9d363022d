use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use data_loader::{RatingsIndex, parse_content_catalog};
use pipeline::{CollaborativeBuildConfig, ContentBuildConfig, build_collaborative_index, build_content_index};
use recommender::{
    MergePolicy, Recommendation, RecommendationMode, RecommendationService, ServiceConfig, Weights,
};
use sources::{CollaborativeIndex, ContentIndex};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::info;

/// Cinephile - Hybrid Movie Recommender
#[derive(Parser)]
#[command(name = "cinephile")]
#[command(about = "Movie recommendations blending plot metadata with audience ratings", long_about = None)]
struct Cli {
    /// Directory holding content.bin and collaborative.bin
    #[arg(short, long, default_value = "artifacts", global = true)]
    artifacts_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the content similarity artifact from a JSON movie catalog
    BuildContent {
        /// JSON array of movies with overview, genres, keywords, cast and crew
        #[arg(long)]
        catalog: PathBuf,

        /// Vocabulary size of the count vectorizer
        #[arg(long, default_value = "5000")]
        max_features: usize,

        /// Leading cast members included per movie
        #[arg(long, default_value = "3")]
        top_cast: usize,

        /// Shortest token kept by the vectorizer
        #[arg(long, default_value = "2")]
        min_token_len: usize,

        /// Count English stop words instead of dropping them
        #[arg(long)]
        keep_stop_words: bool,
    },

    /// Build the collaborative similarity artifact from MovieLens ratings
    BuildCollab {
        /// Directory with movies.dat and ratings.dat
        #[arg(long, default_value = "data/ml-1m")]
        data_dir: PathBuf,

        /// Titles with fewer ratings are dropped
        #[arg(long, default_value = "50")]
        min_ratings: usize,

        /// Latent components kept by the SVD
        #[arg(long, default_value = "12")]
        components: usize,

        /// Seed of the SVD starting subspace
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Upper bound on SVD subspace iterations
        #[arg(long, default_value = "100")]
        power_iterations: usize,

        /// Relative eigenvalue change that stops the iteration
        #[arg(long, default_value = "1e-9")]
        tolerance: f64,
    },

    /// Get hybrid recommendations for a movie
    Recommend {
        /// Movie title as it appears in the content catalog
        #[arg(long)]
        title: String,

        /// Number of recommendations to return
        #[arg(long, default_value = "10")]
        limit: usize,

        /// Weight of the content score
        #[arg(long, default_value = "0.6")]
        content_weight: f32,

        /// Weight of the collaborative score
        #[arg(long, default_value = "0.4")]
        collab_weight: f32,

        /// How duplicate collaborative titles are merged
        #[arg(long, value_enum, default_value = "last-wins")]
        merge: MergeArg,

        /// Show the score breakdown for each recommendation
        #[arg(long)]
        explain: bool,

        /// Print the recommendations as JSON
        #[arg(long)]
        json: bool,
    },

    /// Nearest neighbors in a single similarity space
    Similar {
        #[arg(long)]
        title: String,

        #[arg(long, value_enum, default_value = "content")]
        space: Space,

        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Search for movies by title
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum MergeArg {
    LastWins,
    Average,
}

impl From<MergeArg> for MergePolicy {
    fn from(arg: MergeArg) -> Self {
        match arg {
            MergeArg::LastWins => MergePolicy::LastWins,
            MergeArg::Average => MergePolicy::Average,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Space {
    Content,
    Collaborative,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    info!("Starting cinephile (artifacts: {})", cli.artifacts_dir.display());
    let artifacts = ServiceConfig::from_artifacts_dir(&cli.artifacts_dir);

    // Dispatch to appropriate command handler
    match cli.command {
        command @ Commands::BuildContent { .. } => {
            let (catalog, config) = content_build(command)?;
            handle_build_content(&artifacts, &catalog, &config)?
        }
        command @ Commands::BuildCollab { .. } => {
            let (data_dir, config) = collaborative_build(command)?;
            handle_build_collab(&artifacts, &data_dir, &config)?
        }
        Commands::Recommend {
            title,
            limit,
            content_weight,
            collab_weight,
            merge,
            explain,
            json,
        } => {
            let weights = Weights::new(content_weight, collab_weight)?;
            let service = load_service(artifacts.with_merge_policy(merge.into()))?;
            handle_recommend(&service, &title, limit, weights, explain, json)?
        }
        Commands::Similar { title, space, limit } => handle_similar(&artifacts, &title, space, limit)?,
        Commands::Search { title, limit } => handle_search(&artifacts, &title, limit)?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => {
            let service = load_service(artifacts)?;
            handle_benchmark(service, requests, concurrent).await?
        }
    }

    Ok(())
}

/// Load both artifacts, printing how long it took
fn load_service(config: ServiceConfig) -> Result<RecommendationService> {
    println!("Loading artifacts from {}...", config.content_path.parent().unwrap_or(Path::new(".")).display());
    let start = Instant::now();
    let service = RecommendationService::load(config).context("Failed to load recommendation artifacts")?;
    println!("{} Loaded artifacts in {:?}", "✓".green(), start.elapsed());
    Ok(service)
}

/// Input path and build parameters of a 'build-content' command
fn content_build(command: Commands) -> Result<(PathBuf, ContentBuildConfig)> {
    match command {
        Commands::BuildContent {
            catalog,
            max_features,
            top_cast,
            min_token_len,
            keep_stop_words,
        } => {
            let config = ContentBuildConfig::default()
                .with_max_features(max_features)
                .with_top_cast(top_cast)
                .with_min_token_len(min_token_len)
                .with_stop_words_removed(!keep_stop_words);
            Ok((catalog, config))
        }
        _ => Err(anyhow!("not a build-content command")),
    }
}

/// Input directory and build parameters of a 'build-collab' command
fn collaborative_build(command: Commands) -> Result<(PathBuf, CollaborativeBuildConfig)> {
    match command {
        Commands::BuildCollab {
            data_dir,
            min_ratings,
            components,
            seed,
            power_iterations,
            tolerance,
        } => {
            let config = CollaborativeBuildConfig::default()
                .with_min_ratings_per_title(min_ratings)
                .with_components(components)
                .with_seed(seed)
                .with_power_iterations(power_iterations)
                .with_tolerance(tolerance);
            Ok((data_dir, config))
        }
        _ => Err(anyhow!("not a build-collab command")),
    }
}

/// Handle the 'build-content' command
fn handle_build_content(artifacts: &ServiceConfig, catalog: &Path, config: &ContentBuildConfig) -> Result<()> {
    let start = Instant::now();
    let movies = parse_content_catalog(catalog)
        .with_context(|| format!("Failed to read content catalog {}", catalog.display()))?;
    println!("Read {} movies from {}", movies.len(), catalog.display());

    let index = build_content_index(&movies, config).context("Failed to build content index")?;
    index
        .save(&artifacts.content_path)
        .context("Failed to save content index")?;

    println!(
        "{} Wrote {} ({} movies) in {:?}",
        "✓".green(),
        artifacts.content_path.display(),
        index.len(),
        start.elapsed()
    );
    Ok(())
}

/// Handle the 'build-collab' command
fn handle_build_collab(artifacts: &ServiceConfig, data_dir: &Path, config: &CollaborativeBuildConfig) -> Result<()> {
    let start = Instant::now();
    println!("Loading MovieLens dataset from {}...", data_dir.display());
    let ratings = RatingsIndex::load_from_files(data_dir).context("Failed to load MovieLens dataset")?;
    let (movies, rating_count) = ratings.counts();
    println!("{} Loaded {} movies and {} ratings", "✓".green(), movies, rating_count);

    let index = build_collaborative_index(ratings.titled_ratings(), config)
        .context("Failed to build collaborative index")?;
    index
        .save(&artifacts.collaborative_path)
        .context("Failed to save collaborative index")?;

    println!(
        "{} Wrote {} ({} titles) in {:?}",
        "✓".green(),
        artifacts.collaborative_path.display(),
        index.len(),
        start.elapsed()
    );
    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    service: &RecommendationService,
    title: &str,
    limit: usize,
    weights: Weights,
    explain: bool,
    json: bool,
) -> Result<()> {
    let recommendations = service.recommend(title, limit, weights)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
    } else {
        print_recommendations(title, &recommendations, explain);
    }
    Ok(())
}

/// Handle the 'similar' command
fn handle_similar(artifacts: &ServiceConfig, title: &str, space: Space, limit: usize) -> Result<()> {
    match space {
        Space::Content => {
            let index = ContentIndex::load(&artifacts.content_path).context("Failed to load content index")?;
            let neighbors = index.neighbors_of_title(title, limit)?;
            println!("{}", format!("Content neighbors of '{}':", title).bold().blue());
            for (rank, (row, score)) in neighbors.into_iter().enumerate() {
                let movie = index
                    .movie(row)
                    .ok_or_else(|| anyhow!("Content row {} out of range", row))?;
                println!("{}. {} - Similarity: {:.3}", (rank + 1).to_string().green(), movie.title, score);
            }
        }
        Space::Collaborative => {
            let index = CollaborativeIndex::load(&artifacts.collaborative_path)
                .context("Failed to load collaborative index")?;
            let neighbors = index.neighbors_of_title(title, limit)?;
            println!("{}", format!("Collaborative neighbors of '{}':", title).bold().blue());
            if neighbors.is_empty() {
                println!("  (no correlation signal)");
            }
            for (rank, (neighbor, score)) in neighbors.into_iter().enumerate() {
                println!("{}. {} - Correlation: {:.3}", (rank + 1).to_string().green(), neighbor, score);
            }
        }
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(artifacts: &ServiceConfig, title: &str, limit: usize) -> Result<()> {
    let index = ContentIndex::load(&artifacts.content_path).context("Failed to load content index")?;
    let rows = index.search(title, limit);

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if rows.is_empty() {
        println!("  (no matches)");
    }
    for row in rows {
        if let Some(movie) = index.movie(row) {
            println!("{}: {}", movie.movie_id, movie.title);
        }
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(service: RecommendationService, requests: usize, concurrent: usize) -> Result<()> {
    let movie_count = service.content().len();
    if movie_count == 0 {
        return Err(anyhow!("Content index is empty"));
    }

    // Random query titles drawn from the content catalog
    let titles: Vec<String> = (0..requests)
        .map(|_| service.content().movies()[rand::random_range(0..movie_count)].title.clone())
        .collect();

    let permits = Arc::new(Semaphore::new(concurrent.max(1)));
    let wall_clock = Instant::now();

    let mut handles = vec![];
    for title in titles {
        let service = service.clone();
        let permits = permits.clone();
        let handle = tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let start = Instant::now();
            tokio::task::spawn_blocking(move || service.recommend_default(&title))
                .await
                .context("Recommendation task panicked")??;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings: Vec<Duration> = vec![];
    for handle in handles {
        timings.push(handle.await??);
    }
    let total_time = wall_clock.elapsed();

    if timings.is_empty() {
        println!("No requests made");
        return Ok(());
    }

    let latency_sum: Duration = timings.iter().sum();
    let avg_latency = latency_sum / timings.len() as u32;
    timings.sort();
    let percentile = |p: f32| timings[((timings.len() as f32 * p) as usize).min(timings.len() - 1)];
    let throughput = timings.len() as f32 / total_time.as_secs_f32();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent)", timings.len(), concurrent.max(1));
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(title: &str, recommendations: &[Recommendation], explain: bool) {
    println!("{}", format!("Because you liked '{}':", title).bold().blue());
    if recommendations.first().map(|r| r.mode) == Some(RecommendationMode::ContentOnly) {
        println!("{}", "(no ratings match for this title, content similarity only)".yellow());
    }

    for (rank, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} - Score: {:.3}",
            (rank + 1).to_string().green(),
            rec.title,
            rec.score
        );
        if explain {
            println!("   Explanation: {}", rec.explanation());
        }
    }
}
