//! Benchmarks for corpclean filtering throughput.
//!
//! Run with: cargo bench
//!
//! Rows are synthesized from a seeded RNG so runs are comparable.

use corpclean::xlsx::XlsxWorkbook;
use corpclean::{
    classify_text, deduplicate, filter_sentence, Difficulty, FilterOptions, SentenceRecord,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::io::Cursor;

const EN_WORDS: &[&str] = &[
    "I", "you", "go", "home", "the", "bus", "stop", "where", "is", "coffee", "please", "thank",
    "tomorrow", "meeting", "100%", "!!!", "안녕하세요",
];
const KO_WORDS: &[&str] = &[
    "나는", "집에", "가요", "버스", "정류장", "어디", "커피", "주세요", "감사합니다", "내일",
    "회의", "!!",
];

/// Generates `count` sentence pairs with a realistic mix of rejects.
fn synthetic_pairs(count: usize) -> Vec<(String, String)> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|_| {
            let en_len = rng.gen_range(0..40);
            let ko_len = rng.gen_range(0..12);
            let en: Vec<&str> = (0..en_len)
                .filter_map(|_| EN_WORDS.choose(&mut rng).copied())
                .collect();
            let ko: Vec<&str> = (0..ko_len)
                .filter_map(|_| KO_WORDS.choose(&mut rng).copied())
                .collect();
            (en.join(" "), ko.join(" "))
        })
        .collect()
}

const CONTENT_TYPES: &[u8] = br#"<Types><Override ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/></Types>"#;

/// Creates an in-memory workbook of spoken-schema rows.
fn create_test_xlsx(pairs: &[(String, String)]) -> Vec<u8> {
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    let mut buffer = Vec::new();
    let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(CONTENT_TYPES).unwrap();

    let mut sheet = String::from(
        r#"<worksheet><sheetData><row r="1"><c r="A1" t="inlineStr"><is><t>SID</t></is></c><c r="B1" t="inlineStr"><is><t>원문</t></is></c><c r="C1" t="inlineStr"><is><t>번역문</t></is></c></row>"#,
    );
    let mut strings = String::new();
    for (i, (en, ko)) in pairs.iter().enumerate() {
        let r = i + 2;
        sheet.push_str(&format!(
            r#"<row r="{r}"><c r="A{r}"><v>{r}</v></c><c r="B{r}" t="s"><v>{}</v></c><c r="C{r}" t="s"><v>{}</v></c></row>"#,
            i * 2,
            i * 2 + 1
        ));
        strings.push_str(&format!("<si><t>{}</t></si><si><t>{}</t></si>", ko, en));
    }
    sheet.push_str("</sheetData></worksheet>");

    zip.start_file("xl/worksheets/sheet1.xml", options).unwrap();
    zip.write_all(sheet.as_bytes()).unwrap();
    zip.start_file("xl/sharedStrings.xml", options).unwrap();
    let shared = format!("<sst>{}</sst>", strings);
    zip.write_all(shared.as_bytes()).unwrap();

    zip.finish().unwrap();
    buffer
}

/// Benchmark filter + classify over synthetic rows.
fn bench_filter_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_classify");
    let options = FilterOptions::default();

    for count in [1_000, 10_000, 100_000].iter() {
        let pairs = synthetic_pairs(*count);
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("rows", count), &pairs, |b, pairs| {
            b.iter(|| {
                let mut passed = 0usize;
                for (en, ko) in pairs {
                    if filter_sentence(black_box(en), black_box(ko), &options).passed {
                        black_box(classify_text(en));
                        passed += 1;
                    }
                }
                passed
            });
        });
    }

    group.finish();
}

/// Benchmark deduplication with roughly one duplicate in four.
fn bench_dedup(c: &mut Criterion) {
    let mut group = c.benchmark_group("dedup");

    for count in [10_000, 100_000].iter() {
        let records: Vec<SentenceRecord> = (0..*count)
            .filter_map(|i| {
                let en = format!("Sentence number {}", i % (count * 3 / 4));
                SentenceRecord::new(&en, "문장", Difficulty::Starter, "DAILY", "", "BENCH")
            })
            .collect();

        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("records", count), &records, |b, records| {
            b.iter(|| deduplicate(black_box(records.clone())).len());
        });
    }

    group.finish();
}

/// Benchmark streaming worksheet rows.
fn bench_xlsx_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("xlsx_rows");

    for count in [1_000, 10_000].iter() {
        let data = create_test_xlsx(&synthetic_pairs(*count));
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", count), &data, |b, data| {
            b.iter(|| {
                let mut workbook = XlsxWorkbook::from_bytes(black_box(data.clone())).unwrap();
                workbook.rows().unwrap().count()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_filter_classify, bench_dedup, bench_xlsx_rows);
criterion_main!(benches);
