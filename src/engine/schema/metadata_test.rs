use crate::engine::core::column::compression::CompressionAlgo;
use crate::engine::core::column::format::DType;
use crate::engine::errors::ColfError;
use crate::engine::schema::metadata::{FileMetadata, JsonSchemaCodec, SchemaCodec};
use crate::engine::schema::types::{ColumnDescriptor, Schema};

fn sample_schema() -> Schema {
    Schema::new(
        3,
        vec![
            ColumnDescriptor::new("id", DType::Int32, true),
            ColumnDescriptor::new("name", DType::Utf8, false),
        ],
    )
    .unwrap()
}

#[test]
fn zlib_metadata_omits_compression_field() {
    let meta = FileMetadata::new(sample_schema(), CompressionAlgo::Zlib);
    let bytes = JsonSchemaCodec.encode(&meta).unwrap();
    assert_eq!(
        std::str::from_utf8(&bytes).unwrap(),
        r#"{"num_rows":3,"columns":[{"name":"id","type":"int32","nullable":true},{"name":"name","type":"utf8","nullable":false}]}"#
    );
    assert_eq!(JsonSchemaCodec.decode(&bytes).unwrap(), meta);
}

#[test]
fn non_default_compression_is_recorded() {
    let meta = FileMetadata::new(sample_schema(), CompressionAlgo::Zstd);
    let bytes = JsonSchemaCodec.encode(&meta).unwrap();
    assert!(std::str::from_utf8(&bytes).unwrap().ends_with(r#","compression":"zstd"}"#));
    assert_eq!(JsonSchemaCodec.decode(&bytes).unwrap().compression, CompressionAlgo::Zstd);
}

#[test]
fn decodes_reference_layout_with_extra_whitespace() {
    let json = br#"{ "num_rows": 0, "columns": [ {"name": "a", "type": "float64", "nullable": false} ] }"#;
    let meta = JsonSchemaCodec.decode(json).unwrap();
    assert_eq!(meta.schema.num_rows(), 0);
    assert_eq!(meta.schema.columns()[0].dtype, DType::Float64);
    assert_eq!(meta.compression, CompressionAlgo::Zlib);
}

#[test]
fn rejects_invalid_metadata() {
    let cases: &[&[u8]] = &[
        b"not json",
        &[0xff, 0xfe],
        br#"{"columns":[]}"#,
        br#"{"num_rows":1}"#,
        br#"{"num_rows":1,"columns":[{"name":"a","type":"int64","nullable":false}]}"#,
        br#"{"num_rows":1,"columns":[{"name":"a","type":"int32"}]}"#,
        br#"{"num_rows":1,"columns":[],"compression":"brotli"}"#,
        br#"{"num_rows":1,"columns":[{"name":"a","type":"utf8","nullable":false},{"name":"a","type":"utf8","nullable":false}]}"#,
    ];
    for case in cases {
        let err = JsonSchemaCodec.decode(case).unwrap_err();
        assert!(
            matches!(err, ColfError::SchemaParse(_)),
            "{:?} -> {err:?}",
            String::from_utf8_lossy(case)
        );
    }
}

#[test]
fn non_ascii_names_are_written_as_escapes() {
    let schema = Schema::new(
        1,
        vec![
            ColumnDescriptor::new("café", DType::Utf8, false),
            ColumnDescriptor::new("🦀\u{7f}", DType::Int32, true),
        ],
    )
    .unwrap();
    let meta = FileMetadata::new(schema, CompressionAlgo::Zlib);
    let bytes = JsonSchemaCodec.encode(&meta).unwrap();
    assert!(bytes.is_ascii());
    assert_eq!(
        std::str::from_utf8(&bytes).unwrap(),
        r#"{"num_rows":1,"columns":[{"name":"caf\u00e9","type":"utf8","nullable":false},{"name":"\ud83e\udd80\u007f","type":"int32","nullable":true}]}"#
    );
    assert_eq!(JsonSchemaCodec.decode(&bytes).unwrap(), meta);
}

#[test]
fn row_counts_past_the_addressable_limit_are_rejected() {
    let err = JsonSchemaCodec
        .decode(br#"{"num_rows":1152921504606846976,"columns":[{"name":"a","type":"int32","nullable":false}]}"#)
        .unwrap_err();
    assert!(matches!(err, ColfError::SchemaParse(_)));
}
