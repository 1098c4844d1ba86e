use criterion::{Criterion, criterion_group, criterion_main};
use jsonwalk::{ScanTarget, json_prettify, json_scanf, json_walk};

fn sample_doc(members: usize) -> String {
    let body: String = (0..members)
        .map(|i| {
            format!(
                "{}\"k{}\":{{\"id\":{},\"name\":\"node\",\"ok\":{},\"tags\":[\"a\",\"b\"]}}",
                if i == 0 { "" } else { "," },
                i,
                i,
                i % 2 == 0
            )
        })
        .collect();
    format!("{{{body}}}")
}

fn bench_walk(c: &mut Criterion) {
    let doc = sample_doc(200);
    let mut group = c.benchmark_group("walk");
    group.bench_function("walk_200_objects", |b| {
        b.iter(|| {
            let mut count = 0usize;
            json_walk(std::hint::black_box(&doc), |_, _, _| count += 1).unwrap();
            std::hint::black_box(count)
        })
    });
    group.bench_function("prettify_200_objects", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(doc.len() * 2);
            json_prettify(std::hint::black_box(&doc), &mut out).unwrap();
            std::hint::black_box(out)
        })
    });
    group.bench_function("scanf_deep_key", |b| {
        b.iter(|| {
            let mut id = 0i64;
            json_scanf(
                std::hint::black_box(&doc),
                "{k199:{id:%d}}",
                &mut [ScanTarget::Int(&mut id)],
            );
            std::hint::black_box(id)
        })
    });
    group.finish();
}

criterion_group!(benches, bench_walk);
criterion_main!(benches);
