use crate::engine::core::column::null_bitmap::{NullBitmap, NullBitmapBuilder};

#[test]
fn null_bitmap_checks_bits() {
    let nb = NullBitmap::new(Some(&[0b0001_0010]));
    assert_eq!(nb.is_null(0), false);
    assert_eq!(nb.is_null(1), true);
    assert_eq!(nb.is_null(4), true);
    assert_eq!(nb.is_null(5), false);
}

#[test]
fn null_bitmap_none_always_false() {
    let nb = NullBitmap::new(None);
    for i in 0..8 {
        assert_eq!(nb.is_null(i), false);
    }
}

#[test]
fn byte_len_rounds_up() {
    assert_eq!(NullBitmap::byte_len(0), 0);
    assert_eq!(NullBitmap::byte_len(1), 1);
    assert_eq!(NullBitmap::byte_len(8), 1);
    assert_eq!(NullBitmap::byte_len(9), 2);
}

#[test]
fn builder_packs_lsb_first() {
    let mut b = NullBitmapBuilder::with_rows(10);
    assert!(!b.has_nulls());
    b.set_null(0);
    b.set_null(2);
    b.set_null(9);
    b.set_null(9);
    assert_eq!(b.as_bytes(), &[0b0000_0101, 0b0000_0010]);
    assert!(b.has_nulls());
    assert!(b.view().is_null(9));
    assert!(!b.view().is_null(8));
}
