use criterion::{Criterion, black_box, criterion_group, criterion_main};
use cinesim_core::{Dataset, Item, MediaType, Recommender};

const ITEMS: usize = 2_000;
const DIM: usize = 384;

fn synthetic_dataset() -> Dataset {
    // Deterministic LCG so runs are comparable.
    let mut state: u64 = 0x5EED;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((state >> 33) as f32 / (1u64 << 31) as f32) - 0.5
    };

    (0..ITEMS)
        .map(|i| {
            let embedding: Vec<f32> = (0..DIM).map(|_| next()).collect();
            let genres = [(i % 19) as u32, (i % 7) as u32 + 100];
            let media_type = if i % 3 == 0 { MediaType::Tv } else { MediaType::Movie };
            Item::new(i.to_string(), format!("Title {i:05}"), media_type, genres, embedding)
        })
        .collect()
}

fn bench_recommend(c: &mut Criterion) {
    let dataset = synthetic_dataset();
    let direct = Recommender::default();
    let cached = Recommender::default().with_similarity_matrix(true);

    c.bench_function("recommend_query_row", |b| {
        b.iter(|| direct.recommend(&dataset, black_box("Title 01234"), 15).unwrap());
    });

    dataset.similarity_matrix().unwrap();
    c.bench_function("recommend_cached_matrix", |b| {
        b.iter(|| cached.recommend(&dataset, black_box("Title 01234"), 15).unwrap());
    });
}

criterion_group!(benches, bench_recommend);
criterion_main!(benches);
