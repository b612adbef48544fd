//! Rendering benchmarks for assistant replies
//!
//! Measures markdown rendering of answers of growing size, the cache hit
//! path used on every redraw, and code block extraction for copy.
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use unirag::markdown::{extract_code_blocks, render_markdown, MarkdownCache};
use unirag::models::Message;
use unirag::ui::message_lines;

/// A retrieval-style answer: a summary, sources, and a snippet per section.
fn generate_reply(sections: usize) -> String {
    let section = r#"
According to the **onboarding guide**, new accounts are provisioned with
the `standard` tier. See [the policy](https://docs.example.com/policy) for limits.

> Quotas reset on the first day of each month.

| Tier | Requests |
|------|----------|
| standard | 1000 |
| premium | 10000 |

```python
client = Client(tier="standard")
client.query("reset date")
```

1. Open the console
2. Pick the workspace
   - check the tier
"#;

    (0..sections)
        .map(|i| format!("## Answer part {}\n{}", i + 1, section))
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_render_uncached(c: &mut Criterion) {
    let mut group = c.benchmark_group("reply_render_uncached");

    for size in [1, 5, 20].iter() {
        let content = generate_reply(*size);
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_sections", size)),
            &content,
            |b, content| b.iter(|| black_box(render_markdown(black_box(content)))),
        );
    }

    group.finish();
}

/// Redraws hit the cache for every settled reply
fn bench_render_cached(c: &mut Criterion) {
    let mut group = c.benchmark_group("reply_render_cached");

    for size in [1, 5, 20].iter() {
        let content = generate_reply(*size);
        let mut cache = MarkdownCache::new();
        let _ = cache.render(&content);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_sections", size)),
            &content,
            |b, content| b.iter(|| black_box(cache.render(black_box(content)))),
        );
    }

    group.finish();
}

/// A long thread as laid out and wrapped by the conversation view
fn bench_conversation_lines(c: &mut Criterion) {
    let messages: Vec<Message> = (0..50)
        .flat_map(|i| {
            [
                Message::user(format!("Question {} about quotas?", i)),
                Message::assistant(generate_reply(2)),
            ]
        })
        .collect();

    c.bench_function("conversation_100_messages", |b| {
        let mut cache = MarkdownCache::new();
        b.iter(|| {
            for message in &messages {
                black_box(message_lines(message, &mut cache, 100));
            }
        });
    });
}

fn bench_extract_code_blocks(c: &mut Criterion) {
    let content = generate_reply(20);
    c.bench_function("extract_code_blocks_20_sections", |b| {
        b.iter(|| black_box(extract_code_blocks(black_box(&content))))
    });
}

criterion_group!(
    benches,
    bench_render_uncached,
    bench_render_cached,
    bench_conversation_lines,
    bench_extract_code_blocks,
);

criterion_main!(benches);
