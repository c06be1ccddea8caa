//! Benchmarks for per-round generation and a full simulated game.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use math_race::{GameRng, OptionSet, Phase, Problem, RaceBuilder};

fn bench_problem(c: &mut Criterion) {
    let mut rng = GameRng::new(42);
    c.bench_function("problem_generate", |b| b.iter(|| black_box(Problem::generate(&mut rng))));
}

fn bench_options(c: &mut Criterion) {
    let mut rng = GameRng::new(42);
    let problem = Problem::generate(&mut rng);
    c.bench_function("options_generate", |b| {
        b.iter(|| black_box(OptionSet::generate(&problem, &mut rng, 1000)))
    });
}

fn bench_winning_game(c: &mut Criterion) {
    c.bench_function("winning_game", |b| {
        b.iter(|| {
            let mut engine = RaceBuilder::new().seed(7).build().unwrap();
            engine.start_game().unwrap();
            while engine.run_until_input() == Phase::RoundActive {
                let answer = engine.problem().unwrap().correct_answer;
                engine.submit_answer(answer);
            }
            black_box(engine.drain_events())
        })
    });
}

criterion_group!(benches, bench_problem, bench_options, bench_winning_game);
criterion_main!(benches);
