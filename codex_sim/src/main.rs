use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use codex::{CardCatalog, CardId, ObjectiveCard, Points};
use codex_sim::{play_solitaire, Config, GameEnd, Recorder};
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Path to the card catalog JSON file
    catalog: PathBuf,

    /// How many games to play
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Ids of the objective cards to score, e.g. "91,97". Defaults to three random ones
    #[arg(short, long, value_delimiter = ',')]
    objectives: Vec<CardId>,

    /// The game ends as soon as a player has this many placement points
    #[arg(long, default_value_t = 20)]
    end_threshold: Points,

    /// Record a JSON report of each game into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Default)]
struct Summary {
    games: usize,
    total_points: u64,
    best: Points,
    ends: BTreeMap<&'static str, usize>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let catalog = CardCatalog::load(&args.catalog)?;
    info!(
        cards = catalog.len(),
        objectives = catalog.objectives().count(),
        "Loaded catalog"
    );

    let objectives: Vec<ObjectiveCard> = if args.objectives.is_empty() {
        catalog.objectives().cloned().choose_multiple(&mut rng, 3)
    } else {
        args.objectives
            .iter()
            .map(|&id| {
                catalog
                    .objective(id)
                    .cloned()
                    .with_context(|| format!("There is no objective card with id {}", id))
            })
            .collect::<anyhow::Result<_>>()?
    };
    info!(
        objectives = ?objectives.iter().map(|objective| objective.id).collect::<Vec<_>>(),
        "Scoring objectives"
    );

    let mut recorder = if let Some(dir_path) = args.record_games_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let config = Config {
        end_threshold: args.end_threshold,
        ..Config::default()
    };

    let mut summary = Summary::default();
    for game_idx in 0..args.num_games {
        let report = play_solitaire(&mut rng, &catalog, &objectives, &config)?;
        debug!(
            game_idx,
            total = report.total,
            cards_placed = report.cards_placed,
            "Finished game"
        );
        if let Some(rec) = &mut recorder {
            rec.write_game_report(&report)?;
        }

        summary.games += 1;
        summary.total_points += u64::from(report.total);
        summary.best = summary.best.max(report.total);
        let end = match report.end {
            GameEnd::ScoreReached => "score reached",
            GameEnd::CardsExhausted => "cards exhausted",
            GameEnd::NoLegalPlacement => "no legal placement",
        };
        *summary.ends.entry(end).or_default() += 1;
    }

    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &Summary) {
    if summary.games == 0 {
        eprintln!("No games played");
        return;
    }
    let average = summary.total_points as f32 / summary.games as f32;
    eprintln!(
        "End result after {} games:\n- {:.1} points on average\n- {} points at best",
        summary.games, average, summary.best
    );
    for (end, count) in &summary.ends {
        eprintln!("- {} ended by {}", count, end);
    }
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
