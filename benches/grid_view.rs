use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use table_cli::data::datatable::{DataValue, Record, RowId};
use table_cli::data::table_state::TableState;
use table_cli::state::events::StoreAction;
use table_cli::state::store::Store;
use table_cli::ui::grid_view::GridView;

fn create_test_store(rows: usize) -> Store {
    let roles = [
        "Developer",
        "Designer",
        "Product Manager",
        "QA Engineer",
        "Data Analyst",
    ];

    let records = (0..rows)
        .map(|i| {
            Record::new(RowId::sequential(i))
                .with_field("name", format!("Person {}", (i * 7919) % rows))
                .with_field("email", format!("person{}@example.com", i))
                .with_field("age", DataValue::Integer(20 + (i % 45) as i64))
                .with_field("role", roles[i % roles.len()])
        })
        .collect();

    Store::new(TableState::with_rows(
        records,
        ["name", "email", "age", "role"]
            .iter()
            .map(|c| c.to_string())
            .collect(),
    ))
}

fn bench_sort(c: &mut Criterion) {
    let store = create_test_store(10_000);

    c.bench_function("sort 10k rows by name", |b| {
        b.iter(|| {
            let mut view = GridView::new(&store);
            black_box(view.page_rows(&store).len())
        })
    });
}

fn bench_filter(c: &mut Criterion) {
    let mut store = create_test_store(10_000);
    let mut view = GridView::new(&store);
    view.page_rows(&store);

    let mut toggle = false;
    c.bench_function("filter 10k sorted rows", |b| {
        b.iter(|| {
            toggle = !toggle;
            let search = if toggle { "manager" } else { "engineer" };
            view.set_search(&mut store, search);
            black_box(view.filtered_count(&store))
        })
    });
}

fn bench_memoised_page(c: &mut Criterion) {
    let store = create_test_store(10_000);
    let mut view = GridView::new(&store);
    view.page_rows(&store);

    c.bench_function("memoised page of 10k rows", |b| {
        b.iter(|| {
            view.set_page(black_box(3));
            black_box(view.page_rows(&store).len())
        })
    });
}

fn bench_delete_then_derive(c: &mut Criterion) {
    c.bench_function("delete and re-derive 2k rows", |b| {
        b.iter_batched(
            || {
                let store = create_test_store(2_000);
                let view = GridView::new(&store);
                (store, view)
            },
            |(mut store, mut view)| {
                store.dispatch(StoreAction::DeleteRow(RowId::new("1000")));
                black_box(view.page_rows(&store).len())
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_sort,
    bench_filter,
    bench_memoised_page,
    bench_delete_then_derive
);
criterion_main!(benches);
