use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use epf_reader::app::services::epf_parser::coerce;
use epf_reader::{EpfParser, ReadOutcome};
use std::io::Cursor;

fn build_export(rows: usize) -> Vec<u8> {
    let mut content = String::from(
        "#export_date\x01artist_id\x01name\x01is_actual_artist\x02\n\
#primaryKey:artist_id\x02\n\
#dbTypes:BIGINT\x01INTEGER\x01VARCHAR(1000)\x01BOOLEAN\x02\n\
#exportMode:FULL\x02\n",
    );
    for id in 0..rows {
        content.push_str(&format!("1490173201020\x01{id}\x01Artist number {id}\x011\x02\n"));
    }
    content.push_str(&format!("#recordsWritten:{rows}\x02\n"));
    content.into_bytes()
}

fn bench_read_rows(c: &mut Criterion) {
    let content = build_export(10_000);

    let mut group = c.benchmark_group("read_rows");
    group.throughput(Throughput::Bytes(content.len() as u64));
    group.bench_function("stream_10k", |b| {
        b.iter(|| {
            let mut parser = EpfParser::new(Cursor::new(content.as_slice()));
            let mut count = 0;
            while let Ok(ReadOutcome::Row(row)) = parser.read() {
                black_box(&row);
                count += 1;
            }
            count
        })
    });
    group.finish();
}

fn bench_coerce(c: &mut Criterion) {
    c.bench_function("coerce_bigint", |b| {
        b.iter(|| coerce(black_box("1490173201020"), black_box("BIGINT")))
    });
    c.bench_function("coerce_varchar", |b| {
        b.iter(|| coerce(black_box("William Boyce"), black_box("VARCHAR(1000)")))
    });
}

criterion_group!(benches, bench_read_rows, bench_coerce);
criterion_main!(benches);
