use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use plum_minimax::checkers::checkers_board::CheckersBoard;
use plum_minimax::game::game_board::GameBoard;
use plum_minimax::othello::othello_board::OthelloBoard;
use plum_minimax::search::book::Book;
use plum_minimax::search::minimax::search_best_move;
use plum_minimax::search::perft::perft;

const CHECKERS_PERFT: &[u64] = &[7, 49, 302, 1469, 7361];
const OTHELLO_PERFT: &[u64] = &[4, 12, 56, 244, 1396];

fn bench_perft_for<B: GameBoard>(c: &mut Criterion, name: &str, expected_nodes: &[u64]) {
    let mut group = c.benchmark_group(format!("perft_{name}"));
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));
    group.sample_size(20);

    for (depth_idx, expected) in expected_nodes.iter().enumerate() {
        let depth = (depth_idx + 1) as u32;
        let mut board = B::new_game();

        // Correctness guard before benchmarking.
        let warmup = perft(&mut board, depth).expect("perft should run");
        assert_eq!(warmup, *expected, "node mismatch for {name} depth {depth}");

        group.throughput(Throughput::Elements(*expected));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, depth| {
            b.iter(|| black_box(perft(&mut board, black_box(*depth)).expect("perft runs")));
        });
    }

    group.finish();
}

fn bench_search_for<B: GameBoard>(c: &mut Criterion, name: &str, depths: &[u32]) {
    let mut group = c.benchmark_group(format!("minimax_{name}"));
    group.sample_size(10);

    for depth in depths {
        group.bench_with_input(BenchmarkId::new("no_book", depth), depth, |b, depth| {
            let mut board = B::new_game();
            b.iter(|| {
                let result = search_best_move(&mut board, *depth, None).expect("search runs");
                black_box(result.value)
            });
        });
        group.bench_with_input(BenchmarkId::new("fresh_book", depth), depth, |b, depth| {
            let mut board = B::new_game();
            b.iter(|| {
                let mut book = Book::default();
                let result =
                    search_best_move(&mut board, *depth, Some(&mut book)).expect("search runs");
                black_box(result.value)
            });
        });
    }

    group.finish();
}

fn bench_perft(c: &mut Criterion) {
    bench_perft_for::<CheckersBoard>(c, "checkers", CHECKERS_PERFT);
    bench_perft_for::<OthelloBoard>(c, "othello", OTHELLO_PERFT);
}

fn bench_search(c: &mut Criterion) {
    bench_search_for::<CheckersBoard>(c, "checkers", &[4, 6]);
    bench_search_for::<OthelloBoard>(c, "othello", &[4, 5]);
}

criterion_group!(minimax_benches, bench_perft, bench_search);
criterion_main!(minimax_benches);
