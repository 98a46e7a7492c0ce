use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::HashMap;
use fantabet_core::participant::Participant;
use fantabet_core::schedule::generate_schedule;
use fantabet_core::scoring::{score_many, score_prediction, Prediction, RealResult};
use fantabet_core::standings::{championship_standings, tournament_standings, PredictionRecord};

fn create_participants(n: usize) -> Vec<Participant> {
    (0..n)
        .map(|i| Participant::new(format!("user{}", i), format!("User {}", i)))
        .collect()
}

fn bench_score_prediction(c: &mut Criterion) {
    let prediction = Prediction { home: 2, away: 1 };
    let result = RealResult::played(3, 1);

    c.bench_function("score_prediction", |b| {
        b.iter(|| score_prediction(black_box(Some(&prediction)), black_box(&result)))
    });
}

fn bench_generate_schedule(c: &mut Criterion) {
    let even = create_participants(16);
    let odd = create_participants(15);

    c.bench_function("generate_schedule_16_players_38_rounds", |b| {
        b.iter(|| generate_schedule(black_box(&even), 38))
    });

    c.bench_function("generate_schedule_15_players_38_rounds", |b| {
        b.iter(|| generate_schedule(black_box(&odd), 38))
    });
}

fn bench_championship_standings(c: &mut Criterion) {
    let players = create_participants(16);
    let fixtures: Vec<_> = generate_schedule(&players, 38)
        .iter()
        .enumerate()
        .map(|(i, f)| f.with_score((i % 4) as u32, (i % 3) as u32))
        .collect();

    c.bench_function("championship_standings_16_players", |b| {
        b.iter(|| championship_standings(black_box(&fixtures)))
    });
}

fn bench_tournament_standings(c: &mut Criterion) {
    let members = create_participants(16);
    let mut results = HashMap::new();
    let mut predictions = Vec::new();

    for m in 0..380 {
        let match_id = format!("match{}", m);
        results.insert(match_id.clone(), RealResult::played((m % 4) as u32, (m % 3) as u32));
        for (i, member) in members.iter().enumerate() {
            let prediction = Prediction {
                home: ((m + i) % 5) as u32,
                away: ((m * i) % 4) as u32,
            };
            predictions.push(PredictionRecord::new(member.id.clone(), match_id.clone(), prediction));
        }
    }

    c.bench_function("tournament_standings_16_members_380_matches", |b| {
        b.iter(|| tournament_standings(black_box(&members), black_box(&predictions), black_box(&results)))
    });

    let pairs: Vec<_> = predictions
        .iter()
        .map(|p| (Some(p.prediction), results[&p.match_id]))
        .collect();

    c.bench_function("score_many_6080_pairs", |b| b.iter(|| score_many(black_box(&pairs))));
}

criterion_group!(
    benches,
    bench_score_prediction,
    bench_generate_schedule,
    bench_championship_standings,
    bench_tournament_standings,
);
criterion_main!(benches);
