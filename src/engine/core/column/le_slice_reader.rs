pub const SIZE_U8: usize = 1;
pub const SIZE_U32: usize = 4;
pub const SIZE_U64: usize = 8;

pub struct LeSliceReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> LeSliceReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn has_bytes(&self, n: usize) -> bool {
        self.remaining() >= n
    }

    pub fn read_u8(&mut self) -> Option<u8> {
        if !self.has_bytes(SIZE_U8) {
            return None;
        }
        let val = self.buf[self.pos];
        self.pos += SIZE_U8;
        Some(val)
    }

    pub fn read_u32(&mut self) -> Option<u32> {
        self.take_array::<SIZE_U32>().map(u32::from_le_bytes)
    }

    pub fn read_i32(&mut self) -> Option<i32> {
        self.take_array::<SIZE_U32>().map(i32::from_le_bytes)
    }

    pub fn read_u64(&mut self) -> Option<u64> {
        self.take_array::<SIZE_U64>().map(u64::from_le_bytes)
    }

    pub fn read_f64(&mut self) -> Option<f64> {
        self.take_array::<SIZE_U64>().map(f64::from_le_bytes)
    }

    /// Borrows the next `n` bytes and advances past them.
    pub fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        if !self.has_bytes(n) {
            return None;
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Some(out)
    }

    /// Everything not consumed yet; the reader is exhausted afterwards.
    pub fn rest(&mut self) -> &'a [u8] {
        let out = &self.buf[self.pos.min(self.buf.len())..];
        self.pos = self.buf.len();
        out
    }

    fn take_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        self.take(N)?.try_into().ok()
    }
}
