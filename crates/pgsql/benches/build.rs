use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pgsql::{RowMap, SelectStatement, SqlStatement, from, insert, where_};

/// select * from t where (col0 = $1) and (col1 = $2) ...
fn select_with_predicates(n: usize) -> SelectStatement {
    (0..n).fold(from("t"), |stmt, i| {
        stmt.where_(format!("col{i} = ?"), [i as i64])
    })
}

fn bench_build_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("build/select");

    for n in [1, 5, 10, 50, 100] {
        let stmt = select_with_predicates(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &stmt, |b, stmt| {
            b.iter(|| black_box(stmt.build()));
        });
    }

    group.finish();
}

fn bench_clone_and_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("build/clone_and_apply");
    let scope = where_("tenant_id = ?", [1]);

    for n in [1, 10, 100] {
        let stmt = select_with_predicates(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &stmt, |b, stmt| {
            b.iter(|| black_box(stmt.clone().apply([&scope]).build()));
        });
    }

    group.finish();
}

fn bench_insert_row_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("build/insert_row_map");

    for n in [5, 20, 100] {
        let row: RowMap = (0..n).map(|i| (format!("col{i}"), i as i64)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &row, |b, row| {
            b.iter(|| black_box(insert("t").data(row).build()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_build_select,
    bench_clone_and_apply,
    bench_insert_row_map
);
criterion_main!(benches);
