use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sapper_core::*;
use std::hint::black_box;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for level in Level::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(level.name()),
            &level.config(),
            |b, &config| {
                let mut generator = RandomBoardGenerator::new(0);
                b.iter(|| generator.generate(black_box(config)).unwrap());
            },
        );
    }

    let dense = GameConfig::new_unchecked((40, 20), 799);
    group.bench_function("dense", |b| {
        let mut generator = RandomBoardGenerator::new(0);
        b.iter(|| generator.generate(black_box(dense)).unwrap());
    });
    group.finish();
}

fn bench_cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("cascade");
    for level in Level::ALL {
        let (board, bombs) = RandomBoardGenerator::new(1)
            .generate(level.config())
            .unwrap();
        let Some((start, _)) = board.iter().find(|(_, cell)| cell.value.is_empty()) else {
            continue;
        };
        group.bench_function(level.name(), |b| {
            b.iter(|| {
                let mut store = CellStore::new(board.clone());
                RevealEngine::reveal(&mut store, &bombs, [black_box(start)])
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate, bench_cascade);
criterion_main!(benches);
