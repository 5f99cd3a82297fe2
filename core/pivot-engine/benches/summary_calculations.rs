use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use engine::{build_groups, CellValue, ColumnSchema, Table};
use pivot_engine::build_summary;
use std::hint::black_box;

/// Synthetic export: chains of yearly projects linked by predecessor ids.
fn synthetic_export(projects: usize) -> Table {
    let schema = ColumnSchema::default();
    let mut table = Table::new([
        schema.project_id.as_str(),
        schema.sub_task_id.as_str(),
        schema.prev_project_ids.as_str(),
        schema.fiscal_year.as_str(),
        "title",
        "government_funding",
        "private_funding_subtotal",
        "total_funding",
    ]);

    for i in 0..projects {
        let lineage = i / 8;
        let year = 2015 + (i % 8) as i64;
        let prev = if i % 8 == 0 {
            CellValue::Empty
        } else {
            CellValue::from(format!("P{}", i - 1))
        };
        table.push_row(vec![
            CellValue::from(format!("P{}", i)),
            CellValue::from(format!("S{}-{}", lineage, i % 3)),
            prev,
            year.into(),
            CellValue::from(format!("Project {}", lineage)),
            (1000.0 + i as f64).into(),
            250.0.into(),
            (1250.0 + i as f64).into(),
        ]);
    }
    table
}

fn bench_linkage(c: &mut Criterion) {
    let schema = ColumnSchema::default();
    let mut group = c.benchmark_group("linkage/build_groups");
    for size in [1_000usize, 10_000] {
        let table = synthetic_export(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &table, |b, table| {
            b.iter(|| {
                let view = build_groups(black_box(table), &schema).expect("build groups");
                black_box(view.report.group_count);
            });
        });
    }
    group.finish();
}

fn bench_summary(c: &mut Criterion) {
    let schema = ColumnSchema::default();
    let mut group = c.benchmark_group("summary/build_summary");
    for size in [1_000usize, 10_000] {
        let table = synthetic_export(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &table, |b, table| {
            b.iter(|| {
                let view = build_summary(black_box(table), &schema).expect("build summary");
                black_box(view.table.len());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_linkage, bench_summary);
criterion_main!(benches);
