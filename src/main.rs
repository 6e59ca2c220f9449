use clap::Parser;
use model_2048::auto::Policy;
use model_2048::engine::Board;
use model_2048::GameConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Play a single game on the terminal, printing the board after every move.
#[derive(Debug, Parser)]
#[command(name = "model-2048", version, about = "Watch the 2048 auto-player")]
struct Args {
    /// RNG seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Grid side length
    #[arg(long, default_value_t = 4)]
    dim: usize,
    /// Play random directions instead of the greedy policy
    #[arg(long)]
    random: bool,
    /// Stop after this many moves
    #[arg(long)]
    steps: Option<u64>,
    /// Only print the final board
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let cfg = GameConfig { dimension: args.dim, seed: args.seed, ..GameConfig::default() };
    let policy = if args.random { Policy::Random } else { Policy::Greedy };

    let mut board = Board::with_config(&cfg)?;
    if !args.quiet {
        println!("{}", board.grid());
    }
    let mut move_count: u64 = 0;
    while board.can_move() {
        if args.steps.is_some_and(|cap| move_count >= cap) {
            break;
        }
        let outcome = match policy {
            Policy::Greedy => match board.auto_move() {
                Some(o) => o,
                None => break,
            },
            Policy::Random => board.random_move(),
        };
        if !outcome.changed {
            continue;
        }
        move_count += 1;
        if !args.quiet {
            println!("{} ({})", outcome.direction, board.score());
            println!("{}", board.grid());
        }
    }
    if args.quiet {
        println!("{}", board.grid());
    }
    info!(moves = move_count, score = board.score(), max_tile = board.max_tile(), "game over");
    println!("Moves made: {}, Score: {}, Max tile: {}", move_count, board.score(), board.max_tile());
    Ok(())
}
