use std::sync::atomic::{AtomicI64, Ordering};

use criterion::{criterion_group, criterion_main, Criterion};
use dsrec::{DatasetStore, NewRecord};

const DEPARTMENTS: [&str; 4] = ["Engineering", "Marketing", "Sales", "HR"];

fn make_record(i: i64) -> NewRecord {
    NewRecord::new(i)
        .name(format!("Person{i}"))
        .age(20 + (i % 50) as i32)
        .department(DEPARTMENTS[(i as usize) % DEPARTMENTS.len()])
}

fn populated_store(rows: i64) -> DatasetStore {
    let store = DatasetStore::in_memory().unwrap();
    for i in 0..rows {
        store.insert_record("bench", &make_record(i)).unwrap();
    }
    store
}

fn bench_insert(c: &mut Criterion) {
    let store = DatasetStore::in_memory().unwrap();
    let next_id = AtomicI64::new(0);
    c.bench_function("insert_record", |b| {
        b.iter(|| {
            let id = next_id.fetch_add(1, Ordering::Relaxed);
            store.insert_record("bench", &make_record(id)).unwrap();
        })
    });
}

fn bench_queries(c: &mut Criterion) {
    let store = populated_store(1024);
    c.bench_function("sort_by_age_desc", |b| {
        b.iter(|| {
            let _ = store.sort_by("bench", "age", "desc").unwrap();
        })
    });
    c.bench_function("group_by_department", |b| {
        b.iter(|| {
            let _ = store.group_by("bench", "department").unwrap();
        })
    });
}

criterion_group!(records, bench_insert, bench_queries);
criterion_main!(records);
