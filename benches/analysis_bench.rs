//! Benchmarks for the analytical functions
//!
//! Run with: cargo bench

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use cycle_wellness::{CycleCalculator, MoodRecord, PatternAnalyzer, RecommendationGenerator};

const PHASES: [&str; 4] = ["Menstrual", "Follicular", "Ovulation", "Luteal"];
const MOODS: [&str; 6] = ["anxious", "calm", "sad", "energetic", "irritable", "tired"];
const SYMPTOMS: [&str; 5] = ["cramps", "fatigue", "headache", "bloating", "acne"];

fn create_test_records(count: usize) -> Vec<MoodRecord> {
    (0..count)
        .map(|i| MoodRecord {
            date: None,
            cycle_phase: Some(PHASES[i % PHASES.len()].to_string()),
            mood: Some(MOODS[i % MOODS.len()].to_string()),
            symptoms: vec![
                SYMPTOMS[i % SYMPTOMS.len()].to_string(),
                SYMPTOMS[(i / 2) % SYMPTOMS.len()].to_string(),
            ],
            notes: None,
        })
        .collect()
}

fn bench_pattern_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("pattern_analysis");
    let analyzer = PatternAnalyzer::new();

    for size in [30, 90, 365] {
        let records = create_test_records(size);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("analyze_{}", size), |b| {
            b.iter(|| analyzer.analyze(black_box(&records)))
        });
    }

    group.finish();
}

fn bench_recommendations(c: &mut Criterion) {
    let generator = RecommendationGenerator::new();

    c.bench_function("recommendations_luteal_anxious", |b| {
        b.iter(|| {
            generator.generate(
                black_box("Luteal"),
                black_box("anxious"),
                black_box(&["cramps", "fatigue", "headache"]),
            )
        })
    });
}

fn bench_cycle_phase(c: &mut Criterion) {
    let calculator = CycleCalculator::default();
    let today = NaiveDate::from_ymd_opt(2025, 11, 23).unwrap();

    c.bench_function("cycle_phase", |b| {
        b.iter(|| calculator.calculate_on(black_box("2025-11-18"), Some(28), today))
    });
}

criterion_group!(
    benches,
    bench_pattern_analysis,
    bench_recommendations,
    bench_cycle_phase
);
criterion_main!(benches);
