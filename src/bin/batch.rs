use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use model_2048::auto::{play_game, GameLimits, GameSummary, Policy};
use model_2048::engine::Value;
use model_2048::GameConfig;
use rayon::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "batch", about = "Play many 2048 games in parallel and report statistics")]
struct Args {
    /// Number of games to play
    #[arg(short = 'n', long, default_value_t = 100)]
    games: u64,
    /// Base seed; game i uses seed + i (random seeds if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Grid side length
    #[arg(long, default_value_t = 4)]
    dim: usize,
    /// Probability that a spawned tile is a 4
    #[arg(long, default_value_t = 0.1)]
    four_probability: f64,
    /// Move selection policy
    #[arg(long, value_enum, default_value_t = PolicyArg::Greedy)]
    policy: PolicyArg,
    /// Per-game: stop after this many moves
    #[arg(long)]
    steps: Option<u64>,
    /// Per-game: stop once the highest tile reaches this value
    #[arg(long)]
    stop_tile: Option<Value>,
    /// Worker threads (defaults to rayon's choice)
    #[arg(long)]
    threads: Option<usize>,
    /// Suppress the progress bar
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    Greedy,
    Random,
}

impl From<PolicyArg> for Policy {
    fn from(p: PolicyArg) -> Self {
        match p {
            PolicyArg::Greedy => Policy::Greedy,
            PolicyArg::Random => Policy::Random,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new().num_threads(n).build_global()?;
    }

    let base = GameConfig { dimension: args.dim, seed: None, four_probability: args.four_probability };
    base.validate()?;
    let policy = Policy::from(args.policy);
    let limits = GameLimits { max_moves: args.steps, target_tile: args.stop_tile };

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(args.games);
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} games ({eta})")?
                .progress_chars("=>-"),
        );
        pb.enable_steady_tick(Duration::from_millis(120));
        pb
    };

    let start = Instant::now();
    let summaries: Vec<GameSummary> = (0..args.games)
        .into_par_iter()
        .map(|i| {
            let cfg = GameConfig { seed: args.seed.map(|s| s.wrapping_add(i)), ..base.clone() };
            let summary = play_game(&cfg, policy, limits);
            pb.inc(1);
            summary
        })
        .collect::<Result<_, _>>()?;
    pb.finish_and_clear();

    let report = Report::from_summaries(&summaries);
    info!(games = summaries.len(), elapsed_s = start.elapsed().as_secs_f64(), "batch finished");
    report.print(start.elapsed());
    Ok(())
}

struct Report {
    games: usize,
    mean_score: f64,
    best: Option<GameSummary>,
    mean_moves: f64,
    max_tiles: BTreeMap<Value, usize>,
}

impl Report {
    fn from_summaries(summaries: &[GameSummary]) -> Self {
        let games = summaries.len();
        let denom = games.max(1) as f64;
        let mut max_tiles = BTreeMap::new();
        for s in summaries {
            *max_tiles.entry(s.max_tile).or_insert(0) += 1;
        }
        Report {
            games,
            mean_score: summaries.iter().map(|s| s.score as f64).sum::<f64>() / denom,
            mean_moves: summaries.iter().map(|s| s.moves as f64).sum::<f64>() / denom,
            best: summaries.iter().max_by_key(|s| s.score).cloned(),
            max_tiles,
        }
    }

    fn print(&self, elapsed: Duration) {
        let secs = elapsed.as_secs_f64().max(1e-6);
        println!("Games: {} | games/sec: {:.1}", self.games, self.games as f64 / secs);
        println!("Mean score: {:.1} | mean moves: {:.1}", self.mean_score, self.mean_moves);
        if let Some(best) = &self.best {
            println!("Best: score {} (max tile {}, seed {})", best.score, best.max_tile, best.seed);
        }
        for (tile, count) in self.max_tiles.iter().rev() {
            let pct = 100.0 * *count as f64 / self.games.max(1) as f64;
            println!("  max tile {:>6}: {:>5} ({:.1}%)", tile, count, pct);
        }
    }
}
