/// Read-only view over a packed null bitmap (bit = 1 means null, LSB-first).
/// A missing bitmap means no row is null.
pub struct NullBitmap<'a> {
    bits: Option<&'a [u8]>,
}

impl<'a> NullBitmap<'a> {
    pub fn new(bits: Option<&'a [u8]>) -> Self {
        Self { bits }
    }

    #[inline]
    pub fn is_null(&self, idx: usize) -> bool {
        if let Some(b) = self.bits {
            b.get(idx / 8).is_some_and(|byte| byte & (1 << (idx % 8)) != 0)
        } else {
            false
        }
    }

    #[inline]
    pub const fn byte_len(rows: usize) -> usize {
        rows.div_ceil(8)
    }
}

#[derive(Debug, Clone)]
pub struct NullBitmapBuilder {
    bits: Vec<u8>,
    has_nulls: bool,
}

impl NullBitmapBuilder {
    pub fn with_rows(rows: usize) -> Self {
        Self {
            bits: vec![0u8; NullBitmap::byte_len(rows)],
            has_nulls: false,
        }
    }

    pub fn set_null(&mut self, idx: usize) {
        let mask = 1 << (idx % 8);
        let byte = &mut self.bits[idx / 8];
        *byte |= mask;
        self.has_nulls = true;
    }

    pub fn has_nulls(&self) -> bool {
        self.has_nulls
    }

    pub fn view(&self) -> NullBitmap<'_> {
        NullBitmap::new(Some(&self.bits))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }
}
