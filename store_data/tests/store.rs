use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::io::Write;
use store_data::{InMemoryStore, ProductRecord, SalesRecord, SalesStore, StoreError};
use tempfile::NamedTempFile;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sale(product_id: &str, day: NaiveDate, qty: u32) -> SalesRecord {
    SalesRecord {
        transaction_date: day,
        product_id: product_id.to_string(),
        quantity_sold: qty,
        unit_price_at_sale: 9.5,
        discount_applied: 0.0,
        promotion_marker: false,
    }
}

#[test]
fn sales_between_is_inclusive_and_ordered() {
    let mut store = InMemoryStore::new();
    store.add_product(ProductRecord::new("P0001", "A", Some("Snacks"), 9.5, 30));
    store.add_sales(vec![
        sale("P0001", date(2024, 2, 10), 2),
        sale("P0001", date(2024, 2, 1), 4),
        sale("P0001", date(2024, 2, 20), 1),
    ]);

    let rows = store
        .sales_between(&["P0001".to_string()], date(2024, 2, 1), date(2024, 2, 10))
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].transaction_date, date(2024, 2, 1));
    assert_eq!(rows[1].transaction_date, date(2024, 2, 10));
}

#[test]
fn products_with_no_match_yield_empty() {
    let store = InMemoryStore::new();
    let products = store.products(&["NOPE".to_string()]).unwrap();
    assert!(products.is_empty());
}

#[test]
fn csv_round_trip() {
    let mut products_file = NamedTempFile::new().unwrap();
    writeln!(
        products_file,
        "product_id,name,category,unit_price,current_stock,competitor_price"
    )
    .unwrap();
    writeln!(products_file, "P0001,Espresso Beans,Beverages,14.5,120,13.9").unwrap();
    writeln!(products_file, "P0002,Paper Towels,Household,4.2,300,").unwrap();

    let mut sales_file = NamedTempFile::new().unwrap();
    writeln!(
        sales_file,
        "transaction_date,product_id,quantity_sold,unit_price_at_sale,discount_applied,promotion_marker"
    )
    .unwrap();
    writeln!(sales_file, "2024-03-04,P0001,3,14.5,0.0,false").unwrap();
    writeln!(sales_file, "2024-03-05,P0002,10,4.2,0.5,true").unwrap();

    let store = InMemoryStore::from_csv_files(products_file.path(), sales_file.path()).unwrap();

    assert_eq!(store.product_count(), 2);
    assert_eq!(store.sales_count(), 2);

    let products = store
        .products(&["P0001".to_string(), "P0002".to_string()])
        .unwrap();
    assert_eq!(products[0].category.as_deref(), Some("Beverages"));
    assert_eq!(products[1].competitor_price, None);

    let rows = store
        .sales_between(&["P0002".to_string()], date(2024, 3, 1), date(2024, 3, 31))
        .unwrap();
    assert!(rows[0].promotion_marker);
}

#[test]
fn csv_load_fails_on_missing_file() {
    let result = InMemoryStore::from_csv_files("/nonexistent/products.csv", "/nonexistent/sales.csv");
    assert!(matches!(result, Err(StoreError::Io(_))));
}

#[test]
fn store_is_usable_through_a_reference() {
    let mut store = InMemoryStore::new();
    store.add_product(ProductRecord::new("P0001", "A", None, 1.0, 5));

    // The blanket impl lets callers hold borrows.
    fn count_products<S: SalesStore>(store: S) -> usize {
        store.products(&["P0001".to_string()]).unwrap().len()
    }
    assert_eq!(count_products(&store), 1);
}
