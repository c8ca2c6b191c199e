use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use plum_arimaa::game_state::arimaa_rules::DEFAULT_ZOBRIST_SEED;
use plum_arimaa::game_state::arimaa_types::{Color, Position};
use plum_arimaa::game_state::zobrist::ZobristKeys;
use plum_arimaa::move_generation::turn_generator::generate_turns_with_nodes;
use plum_arimaa::utils::compact_notation::parse_compact;

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    /// Rank 8 first; `.` and `x` are empty squares.
    ranks: Option<[&'static str; 8]>,
    side: Color,
    steps_left: u8,
    expected_turns: usize,
    expected_nodes: Option<u64>,
}

const TRAP_RANKS: [&str; 8] = [
    "rrrrrc.r", "dhce.hMd", "..x..x..", "..C.mCr.", "....ED..", ".Hx..x.R", "D.....H.",
    "RRRRRRR.",
];

const CASES_QUICK: &[BenchCase] = &[BenchCase {
    name: "opening",
    ranks: None,
    side: Color::Gold,
    steps_left: 4,
    expected_turns: 3353,
    expected_nodes: Some(16440),
}];

const CASES_STANDARD: &[BenchCase] = &[
    BenchCase {
        name: "opening",
        ranks: None,
        side: Color::Gold,
        steps_left: 4,
        expected_turns: 3353,
        expected_nodes: Some(16440),
    },
    BenchCase {
        name: "trap_gold",
        ranks: Some(TRAP_RANKS),
        side: Color::Gold,
        steps_left: 4,
        expected_turns: 46370,
        expected_nodes: None,
    },
    BenchCase {
        name: "trap_silver",
        ranks: Some(TRAP_RANKS),
        side: Color::Silver,
        steps_left: 4,
        expected_turns: 3251,
        expected_nodes: None,
    },
    BenchCase {
        name: "trap_gold_two_steps",
        ranks: Some(TRAP_RANKS),
        side: Color::Gold,
        steps_left: 2,
        expected_turns: 457,
        expected_nodes: None,
    },
];

fn selected_cases() -> &'static [BenchCase] {
    match std::env::var("PLUM_BENCH_SUITE") {
        Ok(value) if value.eq_ignore_ascii_case("standard") => CASES_STANDARD,
        _ => CASES_QUICK,
    }
}

fn case_position(case: &BenchCase, keys: &Arc<ZobristKeys>) -> Position {
    match case.ranks {
        None => Position::standard_opening(Arc::clone(keys)),
        Some(ranks) => {
            let squares: String = ranks
                .concat()
                .chars()
                .map(|ch| if ch == '.' || ch == 'x' { ' ' } else { ch })
                .collect();
            parse_compact(case.side, case.steps_left, &format!("[{squares}]"), keys)
                .expect("benchmark board should parse")
        }
    }
}

fn bench_turn_generation(c: &mut Criterion) {
    let suite_name = match std::env::var("PLUM_BENCH_SUITE") {
        Ok(value) if value.eq_ignore_ascii_case("standard") => "standard",
        _ => "quick",
    };

    let mut group = c.benchmark_group(format!("turn_generation_{suite_name}"));
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    let keys = ZobristKeys::shared(DEFAULT_ZOBRIST_SEED);
    for case in selected_cases() {
        let position = case_position(case, &keys);

        // Correctness guard before benchmarking.
        let warmup = generate_turns_with_nodes(&position);
        assert_eq!(
            warmup.len(),
            case.expected_turns,
            "turn mismatch in warmup for {}",
            case.name
        );
        if let Some(nodes) = case.expected_nodes {
            assert_eq!(warmup.nodes, nodes, "node mismatch in warmup for {}", case.name);
        }

        group.throughput(Throughput::Elements(warmup.nodes));
        group.bench_with_input(
            BenchmarkId::from_parameter(case.name),
            &case.expected_turns,
            |b, expected| {
                b.iter(|| {
                    let generated = generate_turns_with_nodes(black_box(&position));
                    assert_eq!(generated.len(), *expected);
                    black_box(generated.nodes)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(turn_generation_benches, bench_turn_generation);
criterion_main!(turn_generation_benches);
