//! Benchmarks for pdfharvest extraction performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks extract synthetic PDFs built in memory with lopdf.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lopdf::{dictionary, Document, Object, Stream};
use pdfharvest::parser::{to_native, LopdfBackend, RawImage};
use pdfharvest::{ImageStore, PdfExtractor};

/// Creates a PDF where every page has a line of text and one 64×64 RGB image.
fn create_test_pdf(page_count: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids: Vec<Object> = Vec::with_capacity(page_count);
    for i in 0..page_count {
        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => 64,
                "Height" => 64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
            },
            vec![(i % 256) as u8; 64 * 64 * 3],
        ));
        let text = format!(
            "q 64 0 0 64 72 600 cm /Im1 Do Q BT /F1 12 Tf 72 720 Td (Page {} benchmark content) Tj ET",
            i + 1
        );
        let content_id = doc.add_object(Stream::new(dictionary! {}, text.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
                "XObject" => dictionary! { "Im1" => image_id },
            },
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut data = Vec::new();
    doc.save_to(&mut data).unwrap();
    data
}

/// Benchmark PDF header sniffing.
fn bench_format_detection(c: &mut Criterion) {
    let pdf_data = create_test_pdf(1);
    let non_pdf_data = b"Not a PDF file at all, just random text content";

    c.bench_function("detect_valid_pdf", |b| {
        b.iter(|| pdfharvest::detect::sniff_bytes(black_box(&pdf_data)).unwrap());
    });

    c.bench_function("detect_non_pdf", |b| {
        b.iter(|| pdfharvest::detect::sniff_bytes(black_box(non_pdf_data)).is_err());
    });
}

/// Benchmark full extraction at various sizes.
fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");
    let tmp = tempfile::tempdir().unwrap();
    let store = ImageStore::new(tmp.path(), Default::default());
    let extractor = PdfExtractor::new();

    for page_count in [1, 5, 10].iter() {
        let data = create_test_pdf(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| {
                let backend = LopdfBackend::load_bytes(black_box(&data)).unwrap();
                store.clear().unwrap();
                extractor.extract_from(&backend, &store).unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark re-encoding raw RGB pixels as PNG.
fn bench_png_encoding(c: &mut Criterion) {
    let raw = RawImage {
        width: Some(256),
        height: Some(256),
        bits_per_component: Some(8),
        components: Some(3),
        decoded: Some(vec![0x7F; 256 * 256 * 3]),
        ..Default::default()
    };

    c.bench_function("png_256x256_rgb", |b| {
        b.iter(|| to_native(black_box(&raw)));
    });
}

criterion_group!(
    benches,
    bench_format_detection,
    bench_extraction,
    bench_png_encoding,
);
criterion_main!(benches);
