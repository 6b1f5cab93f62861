// Criterion benchmarks for the poem generator

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use random_poetry::core::{pattern_match, Corpus, Direction, PoemGenerator, PronouncingDictionary};
use random_poetry::models::{PoemForm, StressPattern};
use std::collections::BTreeMap;

const SYLLABLES: [&str; 6] = ["AE1 T", "EY1 L", "IY1", "OW1 N", "AY1 T", "UW1 N"];
const ONSETS: [&str; 8] = ["B", "K", "D", "F", "G", "M", "N", "S"];

/// Synthetic dictionary: unstressed function words plus stressed monosyllables
/// in a handful of rhyme classes
fn create_dictionary() -> PronouncingDictionary {
    let mut raw = String::from("the DH AH0\na AH0\nof AH0 V\n");
    for (i, rhyme) in SYLLABLES.iter().enumerate() {
        for (j, onset) in ONSETS.iter().enumerate() {
            raw.push_str(&format!("w{}x{} {} {}\n", i, j, onset, rhyme));
        }
    }
    PronouncingDictionary::parse(&raw)
}

fn create_text(words: usize) -> String {
    let unstressed = ["the", "a", "of"];
    (0..words)
        .map(|i| {
            if i % 2 == 0 {
                unstressed[i % 3].to_string()
            } else {
                format!("w{}x{}", (i * 7) % SYLLABLES.len(), (i * 3) % ONSETS.len())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn create_form(lines: &str, pattern: &str) -> PoemForm {
    PoemForm::new(
        "Bench",
        lines,
        BTreeMap::from([('A', StressPattern::parse(pattern).unwrap())]),
    )
}

fn bench_pattern_match(c: &mut Criterion) {
    let word = StressPattern::parse("0101").unwrap();
    let line = StressPattern::parse("0101010101").unwrap();

    c.bench_function("pattern_match_from_end", |b| {
        b.iter(|| pattern_match(black_box(&word), black_box(&line), Direction::FromEnd));
    });
}

fn bench_corpus_build(c: &mut Criterion) {
    let dictionary = create_dictionary();
    let mut group = c.benchmark_group("corpus_build");

    for words in [1_000, 10_000, 50_000].iter() {
        let text = create_text(*words);
        group.bench_with_input(BenchmarkId::new("build", words), words, |b, _| {
            b.iter(|| Corpus::build("bench", black_box(&text), &dictionary));
        });
    }

    group.finish();
}

fn bench_generation(c: &mut Criterion) {
    let dictionary = create_dictionary();
    let corpus = Corpus::build("bench", &create_text(20_000), &dictionary);
    let generator = PoemGenerator::default();

    let couplet = create_form("AA", "0101010101");
    let quatrain = create_form("AAAA", "01010101");

    c.bench_function("generate_heroic_couplet", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed += 1;
            generator.generate(black_box(&corpus), &couplet, seed)
        });
    });

    c.bench_function("generate_quatrain", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed += 1;
            generator.generate(black_box(&corpus), &quatrain, seed)
        });
    });
}

criterion_group!(
    benches,
    bench_pattern_match,
    bench_corpus_build,
    bench_generation
);

criterion_main!(benches);
