//! Style compilation and notification dispatch benchmarks
//!
//! Covers the two hot paths: compiling a nested style tree to CSS text on
//! service init, and rendering plus fading a notification on the in-memory
//! host.

use std::rc::Rc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use toastr_core::{
    host::MemoryHost,
    style::{compile, flatten},
    toast::default_style,
    NotificationRequest, Severity, StyleRuleTree, ToastService,
};

/// Check if running in quick mode (for CI or quick tests)
fn is_quick_bench() -> bool {
    std::env::var("QUICK_BENCH").is_ok()
}

/// Build a tree with `blocks` root selectors, each carrying modifiers and a
/// nested child block
fn generated_tree(blocks: usize) -> StyleRuleTree {
    (0..blocks).fold(StyleRuleTree::new(), |tree, i| {
        let block = StyleRuleTree::new()
            .property("padding", format!("{}px", i % 24))
            .property("z-index", i as f64)
            .rule("&.-active", StyleRuleTree::new().property("opacity", 1))
            .rule("&:hover", StyleRuleTree::new().property("cursor", "pointer"))
            .rule(
                format!(".child-{i}"),
                StyleRuleTree::new()
                    .property("margin", "0 0 6px 0")
                    .rule("&.-error", StyleRuleTree::new().property("color", "#D5122B")),
            );
        tree.rule(format!(".block-{i}"), block)
    })
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("style_compile");
    if is_quick_bench() {
        group.sample_size(20);
        group.measurement_time(Duration::from_secs(2));
    }

    let default = default_style();
    group.bench_function("default_stylesheet", |b| {
        b.iter(|| compile(black_box(&default)).unwrap());
    });

    for &blocks in &[10, 100, 1000] {
        let tree = generated_tree(blocks);
        let css_len = compile(&tree).map(|css| css.len()).unwrap_or_default();
        group.throughput(Throughput::Bytes(css_len as u64));

        group.bench_with_input(BenchmarkId::new("flatten", blocks), &tree, |b, tree| {
            b.iter(|| flatten(black_box(tree)));
        });
        group.bench_with_input(BenchmarkId::new("compile", blocks), &tree, |b, tree| {
            b.iter(|| compile(black_box(tree)).unwrap());
        });
    }

    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("notification_dispatch");

    group.bench_function("show_and_fade", |b| {
        b.iter(|| {
            let host = Rc::new(MemoryHost::new());
            let service = ToastService::builder(Rc::clone(&host)).init().unwrap();
            for severity in Severity::ALL {
                service
                    .show_message(
                        NotificationRequest::new(severity)
                            .title("Title")
                            .message(black_box("Connection lost")),
                    )
                    .unwrap();
            }
            black_box(host.advance(Duration::from_secs(4)))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_compile, bench_dispatch);
criterion_main!(benches);
