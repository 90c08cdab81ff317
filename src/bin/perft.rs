use anyhow::Context;
use chemate::board::Board;
use chemate::perft::{divide, perft, perft_parallel};
use clap::Parser;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "perft", about = "Perft driver for chemate")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// FEN string or "startpos"
    #[arg(value_name = "FEN", default_value = "startpos")]
    fen: String,
    /// Number of threads for root-split
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
    /// Print the node count below every root move
    #[arg(long, default_value_t = false)]
    divide: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut base = if args.fen == "startpos" {
        Board::initial()
    } else {
        Board::from_fen(&args.fen).with_context(|| format!("invalid FEN '{}'", args.fen))?
    };

    if args.divide {
        let mut total = 0;
        for (m, n) in divide(&mut base, args.depth) {
            println!("{}: {}", m.to_uci(), n);
            total += n;
        }
        println!("nodes: {total}");
        return Ok(());
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build().context("thread pool")?;
    let (nodes, dt) = pool.install(|| {
        let t0 = Instant::now();
        let nodes = if args.threads <= 1 { perft(&mut base, args.depth) } else { perft_parallel(&base, args.depth) };
        (nodes, t0.elapsed().as_secs_f64())
    });

    if args.nps {
        println!("nodes: {nodes} elapsed: {:.3}s nps: {:.1}", dt, nodes as f64 / dt.max(f64::EPSILON));
    } else {
        println!("nodes: {nodes}");
    }
    Ok(())
}
