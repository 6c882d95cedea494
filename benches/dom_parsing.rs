use bytesize::ByteSize;
use chisel_tree::{parse, to_text, JsonValue};
use criterion::{criterion_group, criterion_main, Criterion};
use pprof::criterion::{Output, PProfProfiler};

/// Build a document of `count` records, each with a handful of mixed fields
fn build_document(count: i32) -> String {
    let mut records = JsonValue::Null;
    for index in 0..count {
        let mut record = JsonValue::Null;
        record.set("id", JsonValue::from(index)).unwrap();
        record
            .set("name", JsonValue::from(format!("record {}", index)))
            .unwrap();
        record
            .set("score", JsonValue::from(index as f32 * 0.5))
            .unwrap();
        record.set("active", JsonValue::from(index % 2 == 0)).unwrap();
        let mut tags = JsonValue::Null;
        tags.push(JsonValue::from("alpha")).unwrap();
        tags.push(JsonValue::from("beta")).unwrap();
        record.set("tags", tags).unwrap();
        records.push(record).unwrap();
    }
    let mut doc = JsonValue::Null;
    doc.set("records", records).unwrap();
    to_text(&doc)
}

macro_rules! build_parse_benchmark {
    ($func : tt, $count : expr) => {
        fn $func(c: &mut Criterion) {
            let source = build_document($count);
            println!("{} document size: {}", stringify!($func), ByteSize(source.len() as u64));
            c.bench_function(concat!("parse of ", stringify!($func)), |b| {
                b.iter(|| parse(&source))
            });
        }
    };
}

build_parse_benchmark!(small_document, 10);
build_parse_benchmark!(medium_document, 1_000);
build_parse_benchmark!(large_document, 50_000);

criterion_group! {
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = small_document, medium_document, large_document
}
criterion_main!(benches);
