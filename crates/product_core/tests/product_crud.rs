use product_core::db::open_db_in_memory;
use product_core::{NewProduct, ProductRepository, RepoError, SqliteProductRepository};

#[test]
fn list_returns_seed_rows_in_id_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::new(&conn);

    let products = repo.list_products().unwrap();
    let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(products[2].name, "Vodka");
    assert_eq!(products[2].price, 10);
}

#[test]
fn create_assigns_fresh_id_and_get_roundtrips() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::new(&conn);

    let created = repo
        .create_product(&NewProduct::new("Sprite", 2, 50, "Beverage"))
        .unwrap();
    assert_eq!(created.id, 4);

    let loaded = repo.get_product(created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn get_missing_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::new(&conn);

    assert!(repo.get_product(999).unwrap().is_none());
}

#[test]
fn update_replaces_every_field() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::new(&conn);

    let replacement = NewProduct::new("Coke Zero", 4, 90, "Diet beverage").with_id(1);
    repo.update_product(&replacement).unwrap();

    let loaded = repo.get_product(1).unwrap().unwrap();
    assert_eq!(loaded, replacement);
}

#[test]
fn update_not_found_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::new(&conn);

    let missing = NewProduct::new("Ghost", 1, 1, "").with_id(42);
    let err = repo.update_product(&missing).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(42)));
}

#[test]
fn delete_returns_removed_row_once() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::new(&conn);

    let removed = repo.delete_product(2).unwrap().unwrap();
    assert_eq!(removed.name, "Red Bull");
    assert!(!repo.product_exists(2).unwrap());
    assert!(repo.delete_product(2).unwrap().is_none());
}

#[test]
fn deleted_ids_are_not_reused() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::new(&conn);

    repo.delete_product(3).unwrap();
    let created = repo
        .create_product(&NewProduct::new("Gin", 12, 20, "Beverage"))
        .unwrap();
    assert_eq!(created.id, 4);
}

#[test]
fn out_of_range_persisted_value_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "UPDATE Product SET quantity = ?1 WHERE id = 1;",
        [i64::from(i32::MAX) + 1],
    )
    .unwrap();
    let repo = SqliteProductRepository::new(&conn);

    let err = repo.get_product(1).unwrap_err();
    match err {
        RepoError::InvalidData(message) => assert!(message.contains("Product.quantity")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_table_surfaces_db_error() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE Product;").unwrap();
    let repo = SqliteProductRepository::new(&conn);

    let err = repo.list_products().unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
    assert!(!err.is_busy());
}
