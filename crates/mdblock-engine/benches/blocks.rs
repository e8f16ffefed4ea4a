use criterion::{Criterion, criterion_group, criterion_main};
use mdblock_engine::{Document, all_blocks, detect_block};
mod common;

fn bench_all_blocks(c: &mut Criterion) {
    let mut group = c.benchmark_group("blocks");
    group.sample_size(10);

    let content = common::generate_markdown_content(100);
    let doc = Document::new(&content);
    group.bench_function("all_blocks", |b| {
        b.iter(|| {
            let blocks = all_blocks(std::hint::black_box(&doc));
            std::hint::black_box(blocks);
        });
    });

    let nested = common::generate_complex_markdown(20, 4);
    let doc = Document::new(&nested);
    group.bench_function("all_blocks_nested", |b| {
        b.iter(|| std::hint::black_box(all_blocks(&doc)));
    });

    group.finish();
}

fn bench_detect_block(c: &mut Criterion) {
    let content = common::generate_long_list(500, 4);
    let doc = Document::new(&content);
    let middle = doc.line_count() / 2;

    c.bench_function("detect_block_long_list", |b| {
        b.iter(|| std::hint::black_box(detect_block(&doc, std::hint::black_box(middle))));
    });
}

criterion_group!(benches, bench_all_blocks, bench_detect_block);
criterion_main!(benches);
