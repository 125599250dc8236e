use clap::{Args, Parser, Subcommand, ValueEnum};
use boardgame_recommender::core::{Suggestion, DEFAULT_SAMPLE};
use boardgame_recommender::{EngineConfig, Game, ProviderKind, RecommendationEngine, SearchRequest};

#[derive(Parser)]
#[command(name = "recommender-cli")]
#[command(about = "Board game recommender CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    overrides: Overrides,
}

/// Settings that win over the environment
#[derive(Args)]
struct Overrides {
    /// Catalog to query
    #[arg(short, long, global = true, env = "RECOMMENDER_PROVIDER")]
    provider: Option<ProviderArg>,

    /// BoardGameGeek XML API base URL
    #[arg(long, global = true, env = "BGG_BASE_URL")]
    bgg_url: Option<String>,

    /// Board Game Atlas API base URL
    #[arg(long, global = true, env = "ATLAS_BASE_URL")]
    atlas_url: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProviderArg {
    Bgg,
    Atlas,
}

impl From<ProviderArg> for ProviderKind {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Bgg => ProviderKind::Bgg,
            ProviderArg::Atlas => ProviderKind::Atlas,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend games for the given terms
    Recommend {
        /// Search terms (joined with spaces)
        terms: Vec<String>,

        /// Catalog entries to fetch before filtering
        #[arg(short, long, default_value = "30")]
        limit: usize,

        /// Number of people who want to play
        #[arg(long)]
        players: Option<u32>,

        /// Longest acceptable playing time in minutes
        #[arg(long)]
        max_time: Option<u32>,

        /// How many games to pick (0 for every match)
        #[arg(short, long, default_value_t = DEFAULT_SAMPLE)]
        sample: usize,

        /// Fixed seed for reproducible picks
        #[arg(long)]
        seed: Option<u64>,

        /// Print the JSON response instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Show one game by provider ID
    Show {
        /// Provider-assigned ID
        id: String,
    },

    /// Print the effective configuration
    ShowConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = apply_overrides(EngineConfig::from_env()?, &cli.overrides);
    config.validate()?;

    match cli.command {
        Commands::Recommend { terms, limit, players, max_time, sample, seed, json } => {
            let mut request = SearchRequest::new(terms.join(" "), limit);
            request.sample = (sample > 0).then_some(sample);
            request.desired_players = players;
            request.max_desired_time = max_time;

            let mut engine = RecommendationEngine::from_config(&config)?;
            if let Some(seed) = seed {
                engine = engine.with_seed(seed);
            }

            println!("🔍 Searching {} for: {}", config.provider, request.query_terms(&config.default_terms));
            let response = engine.recommend(&request).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
                return Ok(());
            }

            if response.is_empty() {
                println!("\n😕 No games matched. Try other terms.");
                return Ok(());
            }

            println!("\n🎉 {} game(s) for tonight:", response.games.len());
            for (i, game) in response.games.iter().enumerate() {
                print_game(i + 1, game);
            }
        }

        Commands::Show { id } => {
            let engine = RecommendationEngine::from_config(&config)?;
            match engine.game(&id).await? {
                Some(game) => print_game(1, &game),
                None => println!("❌ No game with id {}", id),
            }
        }

        Commands::ShowConfig => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn apply_overrides(mut config: EngineConfig, overrides: &Overrides) -> EngineConfig {
    if let Some(provider) = overrides.provider {
        config.provider = provider.into();
    }
    if let Some(url) = &overrides.bgg_url {
        config.bgg_base_url = url.clone();
    }
    if let Some(url) = &overrides.atlas_url {
        config.atlas_base_url = url.clone();
    }
    config
}

fn print_game(index: usize, game: &Game) {
    println!("\n   {}. {}", index, game.name);
    println!("      Players: {}-{}  {}", game.min_players, game.max_players, player_strip(game));
    println!("      Time: {} min", game.playing_time);
    println!("      Image: {}", game.thumbnail);
    println!("      {}", game.description);
}

/// One slot per player count 1..=10: ● best, ◐ recommended, ○ otherwise
fn player_strip(game: &Game) -> String {
    (1..=10)
        .map(|n| match game.players.suggestion_for(n) {
            Suggestion::Best => '●',
            Suggestion::Recommended => '◐',
            Suggestion::NotRecommended => '○',
        })
        .collect()
}
