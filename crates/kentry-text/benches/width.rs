use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kentry_text::{is_valid_kanji_text, to_full_width};

fn sample_text(repeat: usize) -> String {
    "ﾔﾏﾀﾞ ﾀﾛｳ 東京都千代田区1-2-3 ABCﾋﾞﾙ ¥1,000 ".repeat(repeat)
}

fn bench_width(c: &mut Criterion) {
    let text = sample_text(black_box(1_000));

    c.bench_function("to_full_width_1k", |b| {
        b.iter(|| to_full_width(black_box(&text)))
    });

    let widened = to_full_width(&text);
    c.bench_function("kanji_check_1k", |b| {
        b.iter(|| is_valid_kanji_text(black_box(widened.as_str())))
    });
}

criterion_group!(benches, bench_width);
criterion_main!(benches);
