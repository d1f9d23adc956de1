//! `reversi_core::ai::random` の性能計測（1手選択）。

use core::hint::black_box;
use criterion::BatchSize;
use criterion::BenchmarkId;
use criterion::Criterion;
use reversi_core::ai::random::RandomMoveSelector;
use reversi_core::ai::types::MoveSelector as _;
use reversi_core::engine;

/// `cargo bench` の引数を取り込みつつ `Criterion` を生成する。
fn criterion_configured() -> Criterion {
    let base = Criterion::default();
    base.configure_from_args()
}

/// 指定手数だけ進めた対局を返す（途中で終局した場合はその時点で止める）。
fn game_after_plies(plies: u16) -> engine::game::TurnEngine {
    let mut game = engine::game::TurnEngine::new(engine::Side::Black, ());
    let mut agent = RandomMoveSelector::from_seed(u64::MIN);

    for _turn in u16::MIN..plies {
        let chosen = agent.select_move(game.legal_moves()).map(engine::Move::square);
        let Some(square) = chosen else {
            break;
        };
        if game.apply_move(square.column(), square.row()).is_err() {
            break;
        }
    }

    game
}

/// ベンチ用に代表局面の合法手をいくつか用意する。
fn move_samples() -> [Vec<engine::Move>; 3] {
    [0, 8, 24].map(|plies| game_after_plies(plies).legal_moves().to_vec())
}

/// `RandomMoveSelector::select_move` を計測する。
fn bench_select_move(criterion: &mut Criterion) {
    let samples = move_samples();
    let mut group = criterion.benchmark_group("ai/random/select_move");

    for (index, moves) in samples.iter().enumerate() {
        let bench_id = BenchmarkId::new("pos", index);
        group.bench_with_input(bench_id, moves, |bench, input| {
            bench.iter_batched(
                || RandomMoveSelector::from_seed(u64::MIN),
                |mut agent| black_box(agent.select_move(input).map(engine::Move::square)),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

/// ベンチマークのエントリーポイント。
fn main() {
    let mut criterion = criterion_configured();
    bench_select_move(&mut criterion);
    criterion.final_summary();
}
