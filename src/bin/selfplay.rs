use anyhow::Context;
use chemate::selfplay::{play_game, write_jsonl, GameResult, SelfPlayParams};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "chemate-selfplay", about = "Generate self-play games and write them as JSON lines")]
struct Args {
    #[arg(long, default_value_t = 10)]
    games: usize,
    #[arg(long, default_value_t = 200)]
    max_plies: usize,
    #[arg(long, default_value_t = 1)]
    threads: usize,
    #[arg(long, default_value_t = 2)]
    depth: u32,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value = "out/games.jsonl")]
    out: PathBuf,
    /// Pick uniformly random legal moves instead of searching
    #[arg(long, default_value_t = false)]
    random: bool,
    /// Disable evaluation jitter (games become identical)
    #[arg(long, default_value_t = false)]
    no_jitter: bool,
    /// Starting position
    #[arg(long)]
    fen: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let params = SelfPlayParams {
        games: a.games,
        max_plies: a.max_plies,
        depth: a.depth,
        threads: a.threads,
        use_engine: !a.random,
        jitter: !a.no_jitter,
        seed: a.seed,
        fen: a.fen,
    };
    eprintln!("Generating {} games (depth={}, threads={}, engine={})", a.games, a.depth, a.threads, !a.random);

    let pb = ProgressBar::new(params.games as u64);
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} games {msg} [{elapsed_precise}]")?);
    let mut games = Vec::with_capacity(params.games);
    for gi in 0..params.games {
        let game = play_game(&params, gi).with_context(|| format!("game {gi}"))?;
        pb.set_message(format!("{:?} in {} plies", game.result, game.moves.len()));
        games.push(game);
        pb.inc(1);
    }
    pb.finish();

    let count = |r: GameResult| games.iter().filter(|g| g.result == r).count();
    eprintln!(
        "white {} / black {} / draw {} / unfinished {}",
        count(GameResult::WhiteWins),
        count(GameResult::BlackWins),
        count(GameResult::Draw),
        count(GameResult::Unfinished)
    );

    if let Some(dir) = a.out.parent() {
        std::fs::create_dir_all(dir)?;
    }
    write_jsonl(&games, &a.out).with_context(|| format!("writing {}", a.out.display()))?;
    eprintln!("Wrote {} games to {}", games.len(), a.out.display());
    Ok(())
}
