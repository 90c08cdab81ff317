use chemate::board::Board;
use chemate::search::alphabeta::{SearchParams, Searcher};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_search(c: &mut Criterion) {
    let b = Board::initial();
    c.bench_function("search_depth_3_startpos", |ben| {
        ben.iter(|| {
            let mut board = black_box(&b).clone();
            let mut s = Searcher::default();
            let mut p = SearchParams::default();
            p.depth = 3;
            let r = s.search_with_params(&mut board, p);
            black_box(r.nodes)
        })
    });
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
