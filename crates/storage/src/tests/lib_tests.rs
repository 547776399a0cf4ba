use super::*;

fn date(raw: &str) -> NaiveDate {
    raw.parse().expect("date")
}

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn creates_database_file_when_missing() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("nested").join("footprint.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let storage = Storage::new(&database_url).await.expect("db");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );
}

#[tokio::test]
async fn stores_entries_rounded_to_two_decimals() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let first = storage
        .add_log_entry(date("2025-11-06"), "Test", 99.994)
        .await
        .expect("entry");
    let second = storage
        .add_log_entry(date("2025-11-07"), "Energy", 1.0)
        .await
        .expect("entry");
    assert!(second > first);

    let entries = storage.list_log_entries().await.expect("entries");
    assert_eq!(
        entries[0],
        LogEntry {
            date: date("2025-11-06"),
            category: "Test".to_string(),
            emission_kg: 99.99,
        }
    );
    assert_eq!(entries[1].category, "Energy");
}

#[tokio::test]
async fn rounds_from_exact_value_rather_than_scaled_float() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    for kg in [1.125, 0.855, 2.5 * 0.45] {
        storage
            .add_log_entry(date("2025-10-02"), "Energy", kg)
            .await
            .expect("entry");
    }
    let stored: Vec<f64> = storage
        .list_log_entries()
        .await
        .expect("entries")
        .into_iter()
        .map(|entry| entry.emission_kg)
        .collect();
    assert_eq!(stored, vec![1.12, 0.85, 1.12]);
}

#[tokio::test]
async fn summary_groups_by_month_and_category() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    for (day, category, kg) in [
        ("2025-10-01", "Transport", 17.0),
        ("2025-10-15", "Energy", 50.0),
        ("2025-11-01", "Transport", 8.5),
    ] {
        storage
            .add_log_entry(date(day), category, kg)
            .await
            .expect("entry");
    }

    let summary = storage.summary().await.expect("summary");
    assert!((summary.by_month["2025-10"] - 67.0).abs() < 1e-9);
    assert!((summary.by_month["2025-11"] - 8.5).abs() < 1e-9);
    assert!((summary.by_category["Transport"] - 25.5).abs() < 1e-9);
    assert!((summary.by_category["Energy"] - 50.0).abs() < 1e-9);
}

#[tokio::test]
async fn summary_of_empty_log_is_empty() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    assert!(storage.summary().await.expect("summary").is_empty());
}

#[test]
fn sqlite_path_ignores_memory_and_query_suffix() {
    assert_eq!(sqlite_path("sqlite::memory:"), None);
    assert_eq!(
        sqlite_path("sqlite://./data/log.db?mode=rwc"),
        Some(PathBuf::from("./data/log.db"))
    );
}
