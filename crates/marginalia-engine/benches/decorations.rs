use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use marginalia_engine::{
    Document, EditorMode, ScanOptions, Selection, Span, ViewState, build, scan,
};
mod common;

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    group.sample_size(20);

    let content = common::generate_annotated_content(200);
    let doc = Document::from_text(&content);
    let options = ScanOptions::default();

    group.bench_function("whole_document", |b| {
        b.iter(|| {
            let markers = scan(&doc, Span::new(0, doc.len()), black_box(&options));
            black_box(markers);
        });
    });

    let screen = common::screen_ranges(&content, 50)[1];
    group.bench_function("one_screen", |b| {
        b.iter(|| {
            let markers = scan(&doc, black_box(screen), &options);
            black_box(markers);
        });
    });

    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    group.sample_size(20);

    let content = common::generate_annotated_content(200);
    let doc = Document::from_text(&content);
    let options = ScanOptions::default();
    let visible = common::screen_ranges(&content, 50);
    let selection = Selection::cursor(visible[1].start + 10);

    group.bench_function("two_screens", |b| {
        b.iter(|| {
            let view = ViewState {
                document: Some(&doc),
                visible_ranges: &visible,
                selection: Some(&selection),
                mode: EditorMode::LivePreview,
            };
            black_box(build(&view, &options, None));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_scan, bench_build);
criterion_main!(benches);
