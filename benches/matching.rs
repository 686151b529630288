// benches/matching.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cvf_dl::matching::{assign, similarity, CandidatePool};
use cvf_dl::scrape::{AssetLink, SessionMap};

const WORDS: &[&str] = &[
    "deep", "learning", "stereo", "flow", "graph", "neural", "video", "3d", "pose",
    "segmentation", "robust", "efficient", "self", "supervised", "attention", "shape",
];

/// Deterministic pseudo-titles, a proceedings' worth of them.
fn titles(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            (0..5)
                .map(|k| WORDS[(i * 7 + k * 13 + i / 3) % WORDS.len()])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn fixtures(n: usize) -> (SessionMap, CandidatePool) {
    let ts = titles(n);
    let sessions: SessionMap = ts
        .chunks(40)
        .enumerate()
        .map(|(i, chunk)| (format!("Session_{i}"), chunk.to_vec()))
        .collect();

    let mut pool = CandidatePool::new();
    for (i, t) in ts.iter().enumerate() {
        let name = format!("Author{i}_{}_CVPR_2020_paper.pdf", t.replace(' ', "_"));
        let link = AssetLink::new(format!("http://h/papers/{name}")).expect("valid link");
        pool.push(t.clone(), link);
    }
    (sessions, pool)
}

fn bench_matching(c: &mut Criterion) {
    c.bench_function("similarity", |b| {
        b.iter(|| similarity(black_box("robust deep stereo matching"), black_box("deep stereo")))
    });

    let (sessions, pool) = fixtures(1400);
    c.bench_function("assign_1400", |b| {
        b.iter(|| {
            let mut pool = pool.clone();
            let out = assign(black_box(&sessions), &mut pool);
            black_box(out.len())
        })
    });
}

criterion_group!(benches, bench_matching);
criterion_main!(benches);
