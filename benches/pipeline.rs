use criterion::{black_box, criterion_group, criterion_main, Criterion};

use data_sweeper::export::convert;
use data_sweeper::ingestion::read_bytes;
use data_sweeper::processing::{clean, CleaningOptions};
use data_sweeper::types::FileFormat;

fn sample_csv(rows: usize) -> Vec<u8> {
    let mut out = String::from("id,name,score,region\n");
    for i in 0..rows {
        // Every 10th row repeats its predecessor; every 7th score is missing.
        let id = if i % 10 == 9 { i - 1 } else { i };
        let score = if id % 7 == 0 {
            String::new()
        } else {
            format!("{}.5", id % 100)
        };
        out.push_str(&format!("{id},user{id},{score},r{}\n", id % 4));
    }
    out.into_bytes()
}

fn bench_pipeline(c: &mut Criterion) {
    let input = sample_csv(10_000);

    c.bench_function("read_csv_10k", |b| {
        b.iter(|| read_bytes(black_box(&input), FileFormat::Csv, &[]))
    });

    let ds = match read_bytes(&input, FileFormat::Csv, &[]) {
        Ok(ds) => ds,
        Err(err) => panic!("sample input failed to parse: {err}"),
    };

    c.bench_function("clean_10k", |b| {
        b.iter(|| clean(black_box(&ds), &CleaningOptions::all()))
    });

    for target in [FileFormat::Csv, FileFormat::Excel, FileFormat::Docx] {
        c.bench_function(&format!("convert_10k_{}", target.extension()), |b| {
            b.iter(|| convert(black_box(&ds), target, "bench"))
        });
    }
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
