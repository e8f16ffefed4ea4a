use criterion::{Criterion, criterion_group, criterion_main};
use mdblock_engine::editing::{ListIntent, MoveOutcome, MoveTarget, move_block};
use mdblock_engine::{Document, detect_block};
mod common;

fn bench_move_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("moves");
    group.sample_size(10);

    let content = common::generate_markdown_content(50);
    let doc = Document::new(&content);
    let source = detect_block(&doc, 7).expect("list item in generated content");
    let target = doc.line_count() + 1;

    group.bench_function("move_list_to_end", |b| {
        b.iter(|| {
            let outcome = move_block(
                &doc,
                std::hint::black_box(&source),
                MoveTarget::Line(target),
                &ListIntent::default(),
            );
            std::hint::black_box(outcome)
        });
    });

    group.bench_function("move_apply_renumber", |b| {
        b.iter(|| {
            let outcome = move_block(&doc, &source, MoveTarget::Line(target), &ListIntent::default());
            if let Ok(MoveOutcome::Applied { edits, renumber, .. }) = outcome {
                let moved = doc.apply_edits(&edits).expect("move edits apply");
                let fix = renumber.run(&moved);
                std::hint::black_box(moved.apply_edits(&fix).expect("renumber edits apply"));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_move_block);
criterion_main!(benches);
