use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kaomo::bundled::bundled_entries;
use kaomo::{Catalog, Entry, Ranker};

/// Bundled entries plus synthetic user entries, roughly the size of a large
/// personal collection
fn setup_catalog() -> Catalog {
    let mut catalog = Catalog::from_entries(bundled_entries());
    let words = ["happy", "sad", "angry", "sleepy", "cat", "bear", "dance", "wave"];
    catalog.merge((0..5_000).map(|i| {
        Entry::new(
            format!("(user-{i})"),
            [words[i % words.len()], words[(i / 3) % words.len()]],
            if i % 2 == 0 { "Joy" } else { "Special" },
        )
    }));
    catalog
}

fn bench_search(c: &mut Criterion) {
    let catalog = setup_catalog();
    let ranker = Ranker::default();

    let queries = vec![
        ("empty", ""),
        ("short_2char", "ha"),
        ("medium_word", "happy"),
        ("fuzzy_typo", "hapy"),
        ("multi_word", "sleepy bear"),
        ("glyph_fragment", "^ω^"),
        ("filter_only", "cat:joy"),
        ("filter_and_residual", "cat:joy tag:happy dance"),
    ];

    let mut group = c.benchmark_group("search");
    group.sample_size(20);

    for (name, query) in queries {
        group.bench_function(name, |b| {
            b.iter(|| ranker.resolve(black_box(&catalog), black_box(query)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
