use crate::engine::core::column::format::{DType, FormatVersion, PayloadHeader};

#[test]
fn dtype_tags_are_stable() {
    assert_eq!(u8::from(DType::Int32), 1);
    assert_eq!(u8::from(DType::Float64), 2);
    assert_eq!(u8::from(DType::Utf8), 3);
    assert_eq!(DType::try_from(2), Ok(DType::Float64));
    assert_eq!(DType::try_from(9), Err(9));
}

#[test]
fn dtype_names_roundtrip_through_serde() {
    for d in [DType::Int32, DType::Float64, DType::Utf8] {
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, format!("\"{}\"", d.name()));
        assert_eq!(serde_json::from_str::<DType>(&json).unwrap(), d);
        assert_eq!(d.name().parse::<DType>().unwrap(), d);
    }
    assert!(serde_json::from_str::<DType>("\"int64\"").is_err());
}

#[test]
fn format_versions() {
    assert_eq!(FormatVersion::default(), FormatVersion::V1);
    assert_eq!(FormatVersion::try_from(2), Ok(FormatVersion::V2));
    assert_eq!(FormatVersion::try_from(0), Err(0));
    assert_eq!(FormatVersion::try_from(3), Err(3));
}

#[test]
fn payload_header_write_and_read() {
    let mut buf = Vec::new();
    PayloadHeader::new(DType::Utf8, true).write_to(&mut buf);
    assert_eq!(buf, vec![3, 1]);
    let h = PayloadHeader::read_from(&buf).unwrap();
    assert_eq!(h.dtype_tag, 3);
    assert_eq!(h.has_nulls, 1);
    assert!(PayloadHeader::read_from(&buf[..1]).is_none());
}
