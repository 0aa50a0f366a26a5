use crate::test_helpers::factories::RawTableFactory;

#[test]
fn pads_short_columns_with_empty_text() {
    let table = RawTableFactory::new()
        .with_column("a", &["1", "2", "3"])
        .with_column("b", &["x"])
        .create();
    assert_eq!(table.num_rows(), 3);
    assert_eq!(table.column(1), vec!["x", "", ""]);
}

#[test]
fn sample_has_three_columns_and_rows() {
    let table = RawTableFactory::new().sample().create();
    assert_eq!(table.header(), &["id", "score", "name"]);
    assert_eq!(table.num_rows(), 3);
}
