use divan::AllocProfiler;
use divan::{Bencher, black_box};
use ppdb::{TransformationDict, TransformationDictBuilder};

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

fn main() {
    divan::main();
}

const WORDS: [&str; 12] = [
    "o", "poder", "legislativo", "do", "estado", "casa", "grande", "de", "veto", "presidencial",
    "governo", "federal",
];

/// Deterministic rules of 1 to 5 tokens drawn from WORDS
fn synthetic_rules(n: usize) -> Vec<(Vec<&'static str>, Vec<&'static str>)> {
    (0..n)
        .map(|i| {
            let len = 1 + i % 5;
            let lhs = (0..len).map(|j| WORDS[(i * 7 + j * 3) % WORDS.len()]).collect();
            let rhs = vec![WORDS[(i * 5) % WORDS.len()]];
            (lhs, rhs)
        })
        .collect()
}

fn build(rules: &[(Vec<&str>, Vec<&str>)]) -> TransformationDict {
    let mut builder = TransformationDictBuilder::new();
    for (lhs, rhs) in rules {
        builder.insert(lhs, rhs);
    }
    builder.build()
}

#[divan::bench(args = [1_000, 10_000, 100_000])]
fn build_dict(bencher: Bencher, n: usize) {
    let rules = synthetic_rules(n);
    bencher.bench_local(|| black_box(build(black_box(&rules))));
}

#[divan::bench]
fn exact_lookup(bencher: Bencher) {
    let rules = synthetic_rules(10_000);
    let dict = build(&rules);
    bencher.bench_local(|| {
        for (lhs, _) in rules.iter().take(1_000) {
            black_box(dict.get_rhs(black_box(lhs)));
        }
    });
}

#[divan::bench]
fn partial_lookup(bencher: Bencher) {
    let rules = synthetic_rules(10_000);
    let dict = build(&rules);
    bencher.bench_local(|| {
        for word in WORDS {
            black_box(dict.find_partial_expression(black_box(&[word])));
        }
    });
}
