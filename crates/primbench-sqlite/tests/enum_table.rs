use primbench_core::config::{SqliteConfig, SqliteEnumConfig};
use primbench_sqlite::{EnumTable, Status};

async fn table(rows: usize, batch_size: usize) -> EnumTable {
    EnumTable::create(&SqliteConfig::default(), &SqliteEnumConfig { rows, batch_size })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_counts_match_between_columns() {
    let table = table(900, 100).await;
    assert_eq!(table.rows(), 900);

    for status in Status::ALL {
        assert_eq!(table.count_by_int(status).await.unwrap(), 100, "{status}");
        assert_eq!(table.count_by_text(status).await.unwrap(), 100, "{status}");
        assert!(table.exists_by_int(status).await.unwrap());
    }
    table.close().await;
}

#[tokio::test]
async fn test_uneven_batches_insert_every_row() {
    // 1000 rows in batches of 333: last transaction holds the remainder
    let table = table(1000, 333).await;
    let mut total = 0;
    for status in Status::ALL {
        total += table.count_by_int(status).await.unwrap();
    }
    assert_eq!(total, 1000);
    // 1000 = 9 * 111 + 1, so only Active gets the extra row
    assert_eq!(table.count_by_text(Status::Active).await.unwrap(), 112);
    assert_eq!(table.count_by_text(Status::Unknown).await.unwrap(), 111);
}

#[tokio::test]
async fn test_missing_status() {
    let table = table(3, 0).await;
    assert!(table.exists_by_int(Status::Processing).await.unwrap());
    assert!(!table.exists_by_int(Status::Completed).await.unwrap());
    assert_eq!(table.count_by_text(Status::Completed).await.unwrap(), 0);
}

#[tokio::test]
async fn test_indexes_exist() {
    let table = table(9, 9).await;
    let names: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'index' AND tbl_name = 'test_enum' ORDER BY name",
    )
    .fetch_all(table.pool())
    .await
    .unwrap();
    assert_eq!(
        names,
        ["index_test_enum_on_value_int", "index_test_enum_on_value_text"]
    );
}
