use criterion::{black_box, criterion_group, criterion_main, Criterion};
use extension_item::{
    ActivityType, Attachment, ItemSource, Referrer, XExtensionItem,
};
use serde_json::json;
use url::Url;

fn populated_source(tag_count: usize) -> ItemSource {
    let mut source = ItemSource::new(
        json!("https://apple.com/featured"),
        vec![Attachment::new("https://apple.com/featured", "public.url")],
    )
    .expect("Failed to create item source");
    source.set_tags((0..tag_count).map(|i| format!("tag-{}", i)).collect());
    source.set_source_url(Some(
        Url::parse("https://example.com/post").expect("Invalid URL"),
    ));
    source.set_referrer(Some(Referrer::new("App", Some(12345), None)));
    source
}

fn resolve_value_benchmark(c: &mut Criterion) {
    let inputs = [
        ("resolve_value_few_tags", 4),
        ("resolve_value_many_tags", 1024),
    ];

    for (name, tag_count) in inputs.iter() {
        let source = populated_source(*tag_count);
        let activity = ActivityType::new("com.example.unknown.extension");
        let mut group = c.benchmark_group(name.to_string());

        group.bench_function("resolve_value", |b| {
            b.iter(|| source.resolve_value(black_box(&activity)));
        });

        group.bench_function("resolve_and_decode", |b| {
            b.iter(|| {
                let item = source.resolve_value(black_box(&activity));
                XExtensionItem::new(
                    item.as_extension_item()
                        .expect("resolve_value returned a placeholder"),
                )
            });
        });

        group.finish();
    }
}

fn rejecting_activity_benchmark(c: &mut Criterion) {
    let source = populated_source(4);
    c.bench_function("resolve_value_rejecting", |b| {
        b.iter(|| source.resolve_value(black_box(&ActivityType::PRINT)));
    });
}

criterion_group!(
    benches,
    resolve_value_benchmark,
    rejecting_activity_benchmark
);
criterion_main!(benches);
