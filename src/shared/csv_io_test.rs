use indexmap::IndexMap;

use crate::engine::core::column::format::DType;
use crate::engine::errors::ColfError;
use crate::engine::schema::types::{ColumnDescriptor, Schema};
use crate::engine::types::{Cell, ColumnSet, Row};
use crate::shared::csv_io::{read_csv, write_columns_csv, write_rows_csv};

#[test]
fn reads_header_and_records() {
    let table = read_csv("id,name\n1,alice\n2,\"b,ob\"\n".as_bytes()).unwrap();
    assert_eq!(table.header(), &["id".to_string(), "name".to_string()]);
    assert_eq!(table.num_rows(), 2);
    assert_eq!(table.column(1), vec!["alice", "b,ob"]);
}

#[test]
fn pads_short_records() {
    let table = read_csv("a,b,c\n1\n2,3,4\n".as_bytes()).unwrap();
    assert_eq!(table.column(2), vec!["", "4"]);
}

#[test]
fn rejects_long_records() {
    let err = read_csv("a,b\n1,2,3\n".as_bytes()).unwrap_err();
    assert!(matches!(err, ColfError::MalformedInput(_)));
}

#[test]
fn header_only_input_has_no_rows() {
    let table = read_csv("x,y\n".as_bytes()).unwrap();
    assert_eq!(table.num_columns(), 2);
    assert_eq!(table.num_rows(), 0);
}

#[test]
fn writes_rows_with_nulls_as_empty_fields() {
    let schema = Schema::new(
        2,
        vec![
            ColumnDescriptor::new("id", DType::Int32, false),
            ColumnDescriptor::new("score", DType::Float64, true),
        ],
    )
    .unwrap();
    let mut first = Row::new();
    first.insert("id".into(), Cell::from(1));
    first.insert("score".into(), Cell::from(2.5));
    let mut second = Row::new();
    second.insert("id".into(), Cell::from(2));
    second.insert("score".into(), Cell::Null);

    let mut out = Vec::new();
    write_rows_csv(&schema, &[first, second], &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "id,score\n1,2.5\n2,\n");
}

#[test]
fn writes_columns_in_requested_order() {
    let mut columns: ColumnSet = IndexMap::new();
    columns.insert("name".into(), vec![Cell::from("a"), Cell::from("b")]);
    columns.insert("id".into(), vec![Cell::from(1), Cell::from(2)]);

    let mut out = Vec::new();
    write_columns_csv(&columns, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "name,id\na,1\nb,2\n");
}

#[test]
fn quotes_fields_that_need_it() {
    let mut columns: ColumnSet = IndexMap::new();
    columns.insert("text".into(), vec![Cell::from("x,y"), Cell::from("say \"hi\"")]);

    let mut out = Vec::new();
    write_columns_csv(&columns, &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "text\n\"x,y\"\n\"say \"\"hi\"\"\"\n"
    );
}
