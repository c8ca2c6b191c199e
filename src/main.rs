//! Position analysis tool.
//!
//! `plum_arimaa [FILE [MOVE...]]` loads a diagram or compact position file
//! (the standard opening when no file is given, `-` for an empty board
//! awaiting setup), optionally plays one move on it, prints the position and
//! its setup moves, counts the distinct turns available, and estimates gold's
//! chances with seeded random step playouts.

use std::process::ExitCode;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use plum_arimaa::config::AnalysisConfig;
use plum_arimaa::engines::random_playout::random_step_game;
use plum_arimaa::errors::ArimaaError;
use plum_arimaa::game_state::arimaa_types::{Color, Position};
use plum_arimaa::game_state::zobrist::ZobristKeys;
use plum_arimaa::move_generation::terminal::terminal_state;
use plum_arimaa::move_generation::turn_apply::apply_move_str;
use plum_arimaa::move_generation::turn_generator::generate_turns_with_nodes;
use plum_arimaa::utils::diagram_generator::position_to_diagram;
use plum_arimaa::utils::diagram_parser::parse_position_file;
use plum_arimaa::utils::placement_notation::to_placement;
use plum_arimaa::utils::step_notation::{parse_move_tokens, MoveToken};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plum_arimaa=info".into()),
        )
        .init();

    let config = AnalysisConfig::from_env();
    let mut args = std::env::args().skip(1);
    let path = args.next();
    let move_text = args.collect::<Vec<_>>().join(" ");

    match run(&config, path.as_deref(), &move_text) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("analysis failed: {err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &AnalysisConfig, path: Option<&str>, move_text: &str) -> Result<(), ArimaaError> {
    let keys = ZobristKeys::shared(config.zobrist_seed);
    let (mut move_number, mut position) = match path {
        Some("-") => (1, Position::setup_start(keys)),
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            parse_position_file(&text, &keys)?
        }
        None => (1, Position::standard_opening(keys)),
    };

    if !move_text.trim().is_empty() {
        let is_setup = parse_move_tokens(move_text)?
            .iter()
            .any(|token| matches!(token, MoveToken::Placement { .. }));
        let checks = if is_setup {
            config.rules.setup_checks()
        } else {
            config.rules.move_checks()
        };
        position = apply_move_str(&position, move_text, checks)?;
        if position.side_to_move() == Color::Gold {
            move_number += 1;
        }
        tracing::debug!(move_text, "applied move");
    }
    tracing::info!(move_number, side = ?position.side_to_move(), "loaded position");

    println!("{}", position_to_diagram(move_number, &position));
    println!();
    let (gold, silver) = to_placement(position.board(), false);
    println!("{gold}");
    println!("{silver}");
    println!();

    if position.awaiting_setup() {
        println!("awaiting setup: {:?} to place pieces", position.side_to_move());
        return Ok(());
    }

    if let Some(end) = terminal_state(&position) {
        println!("game over: {:?} won by {:?}", end.winner, end.kind);
        return Ok(());
    }

    let start = Instant::now();
    let generated = generate_turns_with_nodes(&position);
    let generation_time = start.elapsed();
    println!(
        "{} unique turns, {} step nodes",
        generated.len(),
        generated.nodes
    );

    let start = Instant::now();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut gold_wins = 0u32;
    let mut undecided = 0u32;
    for _ in 0..config.playouts {
        let outcome = random_step_game(&position, &mut rng, config.playout_turn_limit);
        match outcome.termination {
            Some(end) if end.winner == Color::Gold => gold_wins += 1,
            Some(_) => {}
            None => undecided += 1,
        }
    }
    let playout_time = start.elapsed();

    if config.playouts > 0 {
        let percentage = f64::from(gold_wins) * 100.0 / f64::from(config.playouts);
        println!("Random step win percentage for gold is {percentage:.1}%");
    }
    if undecided > 0 {
        println!("{undecided} playouts hit the turn limit");
    }
    println!(
        "{:.2} seconds to generate turns, {:.2} seconds to play {} random games",
        generation_time.as_secs_f64(),
        playout_time.as_secs_f64(),
        config.playouts
    );

    Ok(())
}
