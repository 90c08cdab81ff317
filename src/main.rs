use anyhow::{bail, Context, Result};
use chemate::board::{Board, Color, FenExporter, MoveRequest, PlainExporter};
use chemate::search::{SearchParams, Searcher};
use chemate::selfplay::{play_game, SelfPlayParams};
use clap::Parser;
use serde_json::json;
use std::io::{self, BufRead, Write};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play or analyse chess against the chemate engine", long_about = None)]
struct Args {
    /// Operation mode: 'play' against the engine, 'analyse' one position, 'self' for engine vs engine
    #[arg(long, default_value = "play")]
    mode: String,

    /// Your color: 'w' for white, 'b' for black
    #[arg(long, default_value = "w")]
    color: String,

    /// Search depth in plies
    #[arg(long, default_value_t = 3)]
    depth: u32,

    /// Worker threads for root-parallel search
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Add bounded random noise to evaluations
    #[arg(long)]
    jitter: bool,

    /// Seed for the evaluation noise
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Starting FEN position
    #[arg(long)]
    fen: Option<String>,

    /// Print analysis as JSON
    #[arg(long)]
    json: bool,

    /// Ply cap for self play
    #[arg(long, default_value_t = 200)]
    max_plies: usize,
}

fn parse_color(color_str: &str) -> Result<Color> {
    match color_str.to_lowercase().as_str() {
        "w" | "white" => Ok(Color::White),
        "b" | "black" => Ok(Color::Black),
        _ => bail!("Invalid color: use 'w' or 'b'"),
    }
}

fn search_params(args: &Args) -> SearchParams {
    let mut p = SearchParams::default();
    p.depth = args.depth;
    p.threads = args.threads;
    p.jitter = args.jitter;
    p.seed = args.seed;
    p
}

fn load_board(args: &Args) -> Result<Board> {
    match &args.fen {
        Some(fen) => Board::from_fen(fen).with_context(|| format!("Invalid FEN string: {fen}")),
        None => Ok(Board::initial()),
    }
}

/// Reports mate or stalemate for the side to move; true when the game is over.
fn game_over(board: &mut Board) -> bool {
    let color = board.side_to_move();
    if board.test_for_mate(color) {
        println!("\nCheckmate! {} wins!", if color == Color::White { "Black" } else { "White" });
        true
    } else if board.test_for_stalemate(color) {
        println!("\nGame is a stalemate!");
        true
    } else {
        false
    }
}

fn analyse(args: &Args) -> Result<()> {
    let mut board = load_board(args)?;
    let mut searcher = Searcher::default();
    let start = Instant::now();
    let result = searcher.search_with_params(&mut board, search_params(args));
    let elapsed = start.elapsed();

    if args.json {
        let valid_moves: Vec<String> =
            board.legal_moves(board.side_to_move(), None).iter().map(|m| m.to_string()).collect();
        let out = json!({
            "board": board.export::<FenExporter>(),
            "balance": board.balance(),
            "move": result.best.map(|m| m.to_string()),
            "score": result.score_cp,
            "valid_moves": valid_moves,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print!("{}", board.export::<PlainExporter>());
    match result.best {
        Some(m) => println!("best move: {} score: {} cp", m, result.score_cp),
        None => println!("no legal moves, score: {} cp", result.score_cp),
    }
    println!("nodes: {} elapsed: {:.2}s", result.nodes, elapsed.as_secs_f32());
    Ok(())
}

fn play(args: &Args) -> Result<()> {
    let human_color = parse_color(&args.color)?;
    let mut board = load_board(args)?;
    let mut searcher = Searcher::default();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("\n{}'s turn", if board.side_to_move() == Color::White { "White" } else { "Black" });
        print!("{}", board);
        if game_over(&mut board) {
            break;
        }

        if board.side_to_move() == human_color {
            print!("Enter your move (e.g. e2e4, 'undo', 'quit'): ");
            io::stdout().flush()?;
            let Some(line) = lines.next() else { break };
            let input = line?;
            match input.trim() {
                "quit" | "exit" => break,
                "undo" => {
                    // take back the engine reply and the human move
                    board.rollback();
                    board.rollback();
                }
                text => match text.parse::<MoveRequest>() {
                    Ok(request) => {
                        if let Err(e) = board.try_move(request) {
                            println!("{e}");
                        }
                    }
                    Err(e) => println!("{e}"),
                },
            }
        } else {
            let start = Instant::now();
            let result = searcher.search_with_params(&mut board, search_params(args));
            let Some(m) = result.best else {
                println!("No legal moves available!");
                break;
            };
            println!(
                "Computer plays: {} (score {} cp, {} nodes, {:.2}s)",
                m,
                result.score_cp,
                result.nodes,
                start.elapsed().as_secs_f32()
            );
            board.make_move(m);
        }
    }
    Ok(())
}

fn self_play(args: &Args) -> Result<()> {
    let params = SelfPlayParams {
        games: 1,
        max_plies: args.max_plies,
        depth: args.depth,
        threads: args.threads,
        use_engine: true,
        jitter: args.jitter,
        seed: args.seed,
        fen: args.fen.clone(),
    };
    let game = play_game(&params, 0)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&game)?);
    } else {
        for (i, pair) in game.moves.chunks(2).enumerate() {
            println!("{:>3}. {}", i + 1, pair.join(" "));
        }
        println!("result: {:?}", game.result);
        println!("final: {}", game.final_fen);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.mode.as_str() {
        "play" | "p" | "h" => play(&args),
        "analyse" | "analyze" | "a" => analyse(&args),
        "self" | "s" => self_play(&args),
        other => bail!("Unknown mode '{other}': use play, analyse or self"),
    }
}
