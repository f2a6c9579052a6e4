use catalog_core::db::migrations::latest_version;
use catalog_core::db::open_db_in_memory;
use catalog_core::{
    Product, ProductRepository, RepoError, SqliteProductRepository, TransactionMode,
    TransactionScope,
};
use rusqlite::Connection;

fn pen() -> Product {
    Product::new("Pen", 1000, Some("Blue ink".to_string()), Some(50))
}

#[test]
fn save_assigns_id_and_find_roundtrips() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::try_new(&conn).unwrap();

    let saved = repo.save(&pen()).unwrap();
    let id = saved.id().unwrap();

    let loaded = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(loaded, saved);
    assert_eq!(loaded.name, "Pen");
    assert_eq!(loaded.description.as_deref(), Some("Blue ink"));
}

#[test]
fn save_keeps_null_optional_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::try_new(&conn).unwrap();

    let saved = repo.save(&Product::new("Ruler", 800, None, None)).unwrap();

    let loaded = repo.find_by_id(saved.id().unwrap()).unwrap().unwrap();
    assert_eq!(loaded.description, None);
    assert_eq!(loaded.stock_quantity, None);
}

#[test]
fn find_by_id_returns_none_for_unknown_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::try_new(&conn).unwrap();

    assert!(repo.find_by_id(42).unwrap().is_none());
}

#[test]
fn save_with_id_updates_existing_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::try_new(&conn).unwrap();

    let mut saved = repo.save(&pen()).unwrap();
    saved.price = 1200;
    saved.stock_quantity = Some(-1);
    repo.save(&saved).unwrap();

    let loaded = repo.find_by_id(saved.id().unwrap()).unwrap().unwrap();
    assert_eq!(loaded.price, 1200);
    assert_eq!(loaded.stock_quantity, Some(-1));
    assert_eq!(repo.find_all().unwrap().len(), 1);
}

#[test]
fn save_with_stale_id_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::try_new(&conn).unwrap();

    let saved = repo.save(&pen()).unwrap();
    repo.delete(&saved).unwrap();

    let err = repo.save(&saved).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if Some(id) == saved.id()));
}

#[test]
fn find_all_returns_rows_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::try_new(&conn).unwrap();

    let first = repo.save(&Product::new("A", 1, None, None)).unwrap();
    let second = repo.save(&Product::new("B", 2, None, None)).unwrap();
    let third = repo.save(&Product::new("C", 3, None, None)).unwrap();

    let all = repo.find_all().unwrap();
    assert_eq!(all, vec![first, second, third]);
}

#[test]
fn delete_removes_row_and_ids_are_not_reused() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::try_new(&conn).unwrap();

    let first = repo.save(&pen()).unwrap();
    repo.delete(&first).unwrap();
    assert!(repo.find_by_id(first.id().unwrap()).unwrap().is_none());

    let second = repo.save(&pen()).unwrap();
    assert!(second.id().unwrap() > first.id().unwrap());
}

#[test]
fn delete_rejects_unsaved_and_missing_records() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::try_new(&conn).unwrap();

    let err = repo.delete(&pen()).unwrap_err();
    assert!(matches!(err, RepoError::Unpersisted));

    let saved = repo.save(&pen()).unwrap();
    repo.delete(&saved).unwrap();
    let err = repo.delete(&saved).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[test]
fn dropped_write_scope_rolls_back() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::try_new(&conn).unwrap();

    {
        let _tx = repo.begin(TransactionMode::ReadWrite).unwrap();
        repo.save(&pen()).unwrap();
    }

    assert!(repo.find_all().unwrap().is_empty());
}

#[test]
fn committed_write_scope_persists() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::try_new(&conn).unwrap();

    let tx = repo.begin(TransactionMode::ReadWrite).unwrap();
    assert_eq!(tx.mode(), TransactionMode::ReadWrite);
    repo.save(&pen()).unwrap();
    tx.commit().unwrap();

    assert_eq!(repo.find_all().unwrap().len(), 1);
}

#[test]
fn read_only_scope_rejects_writes_and_is_released_afterwards() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::try_new(&conn).unwrap();

    let tx = repo.begin(TransactionMode::ReadOnly).unwrap();
    let err = repo.save(&pen()).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
    assert!(repo.find_all().unwrap().is_empty());
    tx.commit().unwrap();

    {
        let _tx = repo.begin(TransactionMode::ReadOnly).unwrap();
    }

    repo.save(&pen()).unwrap();
    assert_eq!(repo.find_all().unwrap().len(), 1);
}

#[test]
fn nested_scope_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::try_new(&conn).unwrap();

    let _outer = repo.begin(TransactionMode::ReadWrite).unwrap();
    let err = repo.begin(TransactionMode::ReadOnly).err().unwrap();
    assert!(matches!(err, RepoError::Db(_)));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteProductRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_products_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteProductRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("products"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            price INTEGER NOT NULL,
            description TEXT
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteProductRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "products",
            column: "stock_quantity"
        })
    ));
}
