use std::time::Duration;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use library_system::{Book, Library, LibraryConfig, selection::select};

fn custom_criterion() -> Criterion {
    Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(1))
        .warm_up_time(Duration::from_secs(1))
}

fn catalog(size: i64) -> Vec<Book> {
    (0..size)
        .map(|id| {
            let copies = u32::try_from(id.rem_euclid(4)).unwrap_or_default();
            Book::new(id, format!("Title {id:05}"), "Bench", copies, id.rem_euclid(97))
        })
        .collect()
}

fn selection_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("Selection");

    for size in [10_i64, 100, 500] {
        let books = catalog(size);
        group.bench_with_input(BenchmarkId::new("select_half", size), &books, |b, books| {
            b.iter(|| select(books, books.len() / 2));
        });
    }

    group.finish();
}

fn catalog_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("Catalog");

    group.bench_function("insert_and_list_500", |b| {
        b.iter(|| {
            let mut library = Library::new(LibraryConfig::default());
            for book in catalog(500) {
                let _inserted = library.add_book(book).is_ok();
            }
            library.books_by_title().count()
        });
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = custom_criterion();
    targets = selection_bench, catalog_bench
}
criterion_main!(benches);
