//! Headless race runner with a simulated player.
//!
//! # Usage
//!
//! ```bash
//! # One game, 80% accurate player, verbose engine logs
//! RUST_LOG=debug cargo run --bin autoplay -- --seed 7 --accuracy 0.8
//!
//! # Ten games, best score kept in ./records
//! cargo run --release --bin autoplay -- --games 10 --store records --quiet
//! ```

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use log::info;

use math_race::{
    EngineEvent, FileStore, GameRng, GameResult, MemoryStore, Phase, RaceBuilder, RaceError,
    RoundEngine,
};

struct Options {
    seed: u64,
    games: u32,
    accuracy: f64,
    timeout_share: f64,
    store: Option<PathBuf>,
    quiet: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            seed: 42,
            games: 1,
            accuracy: 0.75,
            timeout_share: 0.3,
            store: None,
            quiet: false,
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.contains(&"--help".to_string()) || args.contains(&"-h".to_string()) {
        print_help();
        return;
    }

    let options = match parse_args(&args[1..]) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {message}");
            print_help();
            std::process::exit(2);
        }
    };

    if let Err(err) = run(&options) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("{flag} requires a value"))
        };
        match arg.as_str() {
            "--seed" | "-s" => {
                options.seed = value("--seed")?.parse().map_err(|e| format!("--seed: {e}"))?;
            }
            "--games" | "-g" => {
                options.games = value("--games")?.parse().map_err(|e| format!("--games: {e}"))?;
            }
            "--accuracy" | "-a" => {
                options.accuracy = value("--accuracy")?
                    .parse()
                    .map_err(|e| format!("--accuracy: {e}"))?;
                if !(0.0..=1.0).contains(&options.accuracy) {
                    return Err("--accuracy must be within 0..=1".to_string());
                }
            }
            "--timeouts" => {
                options.timeout_share = value("--timeouts")?
                    .parse()
                    .map_err(|e| format!("--timeouts: {e}"))?;
                if !(0.0..=1.0).contains(&options.timeout_share) {
                    return Err("--timeouts must be within 0..=1".to_string());
                }
            }
            "--store" => options.store = Some(PathBuf::from(value("--store")?)),
            "--quiet" | "-q" => options.quiet = true,
            other => return Err(format!("unknown argument {other}")),
        }
    }

    Ok(options)
}

fn run(options: &Options) -> Result<(), RaceError> {
    let builder = RaceBuilder::new().seed(options.seed);
    let mut engine = match &options.store {
        Some(dir) => builder.store(FileStore::in_dir(dir)).build()?,
        None => builder.store(MemoryStore::new()).build()?,
    };
    let mut player = GameRng::new(options.seed).for_context("player");

    println!("Best score: {}", engine.best_score());
    let mut wins = 0;

    for game in 1..=options.games {
        if game == 1 {
            engine.start_game()?;
        } else {
            engine.restart();
        }

        let result = play_game(&mut engine, &mut player, options);
        if result == GameResult::Win {
            wins += 1;
        }

        let summary = engine.history().summary();
        info!(
            "game {game}: {result:?}, {} rounds, {} correct, {} wrong, {} timeouts",
            summary.rounds, summary.correct, summary.incorrect, summary.timeouts
        );
        println!(
            "Game {game}: {result:?} with score {} ({:.0}% accuracy)",
            engine.state().score(),
            summary.accuracy() * 100.0
        );
    }

    println!("Won {wins}/{} games. Best score: {}", options.games, engine.best_score());
    Ok(())
}

fn play_game(engine: &mut RoundEngine, player: &mut GameRng, options: &Options) -> GameResult {
    loop {
        let phase = engine.run_until_input();
        render(engine, options.quiet);

        match phase {
            Phase::Win => return GameResult::Win,
            Phase::Lose => return GameResult::Lose,
            Phase::RoundActive => {}
            // Nothing left to fire; cannot happen with a running game.
            _ => return GameResult::Lose,
        }

        let (Some(problem), Some(shown)) = (engine.problem().copied(), engine.options().copied())
        else {
            return GameResult::Lose;
        };

        if player.gen_bool(options.accuracy) {
            think(engine, player);
            engine.submit_answer(problem.correct_answer);
        } else if player.gen_bool(options.timeout_share) {
            let limit = engine.config().round_seconds;
            engine.advance(Duration::from_secs(u64::from(limit)));
        } else {
            think(engine, player);
            let wrong: Vec<u32> = shown.iter().filter(|&v| v != problem.correct_answer).collect();
            if let Some(&pick) = player.choose(&wrong) {
                engine.submit_answer(pick);
            }
        }
    }
}

fn think(engine: &mut RoundEngine, player: &mut GameRng) {
    let limit = engine.config().round_seconds.saturating_sub(1).max(1);
    let seconds = player.gen_inclusive(0, limit - 1);
    engine.advance(Duration::from_secs(u64::from(seconds)));
}

fn render(engine: &mut RoundEngine, quiet: bool) {
    for event in engine.drain_events() {
        if quiet {
            continue;
        }
        let line = match event {
            EngineEvent::CountdownTick { remaining: 0 } => "GO!".to_string(),
            EngineEvent::CountdownTick { remaining } => format!("{remaining}..."),
            EngineEvent::ProblemPresented { operand_a, operand_b, operator } => {
                format!("What is {operand_a} {operator} {operand_b}?")
            }
            EngineEvent::OptionsPresented { values } => format!("  options {values:?}"),
            EngineEvent::TimerTick { .. } => continue,
            EngineEvent::AnswerResult { outcome, resolution, hint } => match hint {
                Some(hint) => format!("  {} Hint: {hint}", resolution.message(outcome)),
                None => format!("  {}", resolution.message(outcome)),
            },
            EngineEvent::ScoreChanged { score } => format!("  score {score}"),
            EngineEvent::CarMoved { position } => format!("  car at {:.0}%", position * 100.0),
            EngineEvent::LivesChanged { count } => {
                format!("  lives {}", "<3 ".repeat(count as usize))
            }
            EngineEvent::GameEnded { result, final_score } => {
                format!("{result:?}! Final score {final_score}")
            }
            EngineEvent::PlayTone { kind } => format!("  ({:.2} Hz)", kind.frequency_hz()),
            EngineEvent::UpdateBestScore { new_value } => format!("  New record: {new_value}"),
        };
        println!("{line}");
    }
}

fn print_help() {
    println!(
        r#"autoplay - run math races with a simulated player

USAGE:
    autoplay [OPTIONS]

OPTIONS:
    -s, --seed <N>         Game and player seed [default: 42]
    -g, --games <N>        Games to play back to back [default: 1]
    -a, --accuracy <P>     Chance the player answers correctly [default: 0.75]
        --timeouts <P>     Share of misses that are timeouts [default: 0.3]
        --store <DIR>      Keep the best score in DIR instead of memory
    -q, --quiet            Only print per-game summaries
    -h, --help             Print help"#
    );
}
