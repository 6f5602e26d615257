//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use dsrec_core::record::NewRecord;

/// Fresh, empty temp directory unique to `name` and this process.
pub fn create_temp_db_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("dsrec-tests-{}-{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("Failed to create temp dir");
    dir
}

pub fn record(id: i64, name: &str, age: i32, department: &str) -> NewRecord {
    NewRecord::new(id).name(name).age(age).department(department)
}

/// The three employees used throughout: John 30 / Jane 25 (Engineering),
/// Alice 28 (Marketing).
pub fn sample_records() -> Vec<NewRecord> {
    vec![
        record(1, "John", 30, "Engineering"),
        record(2, "Jane", 25, "Engineering"),
        record(3, "Alice", 28, "Marketing"),
    ]
}

/// `n` records cycling through four departments and ages 20..=69.
pub fn generated_records(n: usize) -> Vec<NewRecord> {
    const DEPARTMENTS: [&str; 4] = ["Engineering", "Marketing", "Sales", "HR"];
    (0..n)
        .map(|i| {
            record(
                i as i64,
                &format!("Person{i}"),
                20 + (i % 50) as i32,
                DEPARTMENTS[i % DEPARTMENTS.len()],
            )
        })
        .collect()
}
