use crate::engine::core::column::le_slice_reader::LeSliceReader;

#[test]
fn reads_little_endian_values_in_sequence() {
    let mut buf = Vec::new();
    buf.push(7u8);
    buf.extend_from_slice(&0xdead_beefu32.to_le_bytes());
    buf.extend_from_slice(&(-5i32).to_le_bytes());
    buf.extend_from_slice(&42u64.to_le_bytes());
    buf.extend_from_slice(&2.5f64.to_le_bytes());
    buf.extend_from_slice(b"tail");

    let mut r = LeSliceReader::new(&buf);
    assert_eq!(r.read_u8(), Some(7));
    assert_eq!(r.read_u32(), Some(0xdead_beef));
    assert_eq!(r.read_i32(), Some(-5));
    assert_eq!(r.read_u64(), Some(42));
    assert_eq!(r.read_f64(), Some(2.5));
    assert_eq!(r.remaining(), 4);
    assert_eq!(r.rest(), b"tail");
    assert_eq!(r.remaining(), 0);
    assert_eq!(r.rest(), b"");
}

#[test]
fn short_reads_return_none_without_advancing() {
    let buf = [1u8, 2, 3];
    let mut r = LeSliceReader::new(&buf);
    assert_eq!(r.read_u32(), None);
    assert_eq!(r.remaining(), 3);
    assert_eq!(r.take(2), Some(&buf[..2]));
    assert_eq!(r.take(2), None);
    assert_eq!(r.read_u8(), Some(3));
}
