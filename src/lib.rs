//! Crate root module declarations for the Plum Arimaa rules engine.
//!
//! This file exposes the top-level subsystems (board and position state,
//! step primitives, step and turn generation, notation codecs, random play,
//! and configuration) so the analysis binary, tests, and benches can import
//! stable module paths.

pub mod config;
pub mod errors;

pub mod game_state {
    pub mod arimaa_rules;
    pub mod arimaa_types;
    pub mod board;
    pub mod position;
    pub mod zobrist;
}

pub mod moves {
    pub mod step_descriptions;
    pub mod step_masks;
}

pub mod move_generation {
    pub mod perft;
    pub mod step_apply;
    pub mod step_checks;
    pub mod step_generator;
    pub mod terminal;
    #[cfg(test)]
    pub mod test_positions;
    pub mod turn_apply;
    pub mod turn_generator;
}

pub mod engines {
    pub mod random_playout;
}

pub mod utils {
    pub mod algebraic;
    pub mod compact_notation;
    pub mod diagram_generator;
    pub mod diagram_parser;
    pub mod placement_notation;
    pub mod step_notation;
}
