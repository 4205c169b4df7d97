//! Benchmarks for sheetpreview
//!
//! 取り込み（xlsx / CSV）とCSVエクスポートの処理時間を計測します。

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_xlsxwriter::Workbook;
use sheetpreview::{CellValue, CsvExporter, SpreadsheetIngester};

/// 指定行数のxlsxをメモリ上に生成
fn generate_xlsx(rows: u32) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for col in 0..5u16 {
        worksheet
            .write_string(0, col, format!("Column {}", col))
            .unwrap();
    }
    for row in 1..=rows {
        worksheet.write_string(row, 0, format!("B{:03}", row)).unwrap();
        worksheet.write_string(row, 1, "Klei, zandig").unwrap();
        worksheet.write_number(row, 2, f64::from(row) * 0.5).unwrap();
        worksheet.write_number(row, 3, 16.2).unwrap();
        worksheet.write_boolean(row, 4, row % 2 == 0).unwrap();
    }

    workbook.save_to_buffer().unwrap()
}

/// 指定行数のCSVテキストを生成
fn generate_csv(rows: u32) -> Vec<u8> {
    let mut text = String::from("Boring,Monster,Diepte,Grondsoort,Opmerking\n");
    for row in 1..=rows {
        text.push_str(&format!(
            "B{:03},M1,{},Klei,\"zegt \"\"nat\"\"\"\n",
            row,
            f64::from(row) * 0.5
        ));
    }
    text.into_bytes()
}

fn bench_ingest(c: &mut Criterion) {
    let ingester = SpreadsheetIngester;
    let mut group = c.benchmark_group("ingest");

    for rows in [100u32, 1_000, 10_000] {
        let xlsx = generate_xlsx(rows);
        group.bench_with_input(BenchmarkId::new("xlsx", rows), &xlsx, |b, bytes| {
            b.iter(|| ingester.ingest("bench.xlsx", black_box(bytes)).unwrap())
        });

        let csv = generate_csv(rows);
        group.bench_with_input(BenchmarkId::new("csv", rows), &csv, |b, bytes| {
            b.iter(|| ingester.ingest("bench.csv", black_box(bytes)).unwrap())
        });
    }

    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let headers = ["Boring", "Monster", "Diepte", "Grondsoort", "Actief"];
    let mut group = c.benchmark_group("export");

    for rows in [100usize, 1_000, 10_000] {
        let data: Vec<Vec<CellValue>> = (0..rows)
            .map(|i| {
                vec![
                    CellValue::from(format!("B{:03}", i)),
                    CellValue::from("M1"),
                    CellValue::from(i as f64 * 0.5),
                    CellValue::from("Klei \"vet\""),
                    CellValue::from(i % 2 == 0),
                ]
            })
            .collect();

        group.bench_with_input(BenchmarkId::new("to_csv", rows), &data, |b, data| {
            b.iter(|| CsvExporter::to_csv(&headers, black_box(data)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_ingest, bench_export);
criterion_main!(benches);
