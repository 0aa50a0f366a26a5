use std::io::{self, Read, Seek, SeekFrom};

/// Wraps a seekable source and records every byte range handed out by
/// `read`.
#[derive(Debug)]
pub struct TrackingReader<R> {
    inner: R,
    pos: u64,
    reads: Vec<(u64, u64)>,
}

impl<R: Read + Seek> TrackingReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pos: 0,
            reads: Vec::new(),
        }
    }

    /// True if any recorded read overlaps `[start, end)`.
    pub fn touched(&self, start: u64, end: u64) -> bool {
        self.reads.iter().any(|&(s, e)| s < end && start < e)
    }
}

impl<R: Read> Read for TrackingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n > 0 {
            self.reads.push((self.pos, self.pos + n as u64));
        }
        self.pos += n as u64;
        Ok(n)
    }
}

impl<R: Seek> Seek for TrackingReader<R> {
    fn seek(&mut self, from: SeekFrom) -> io::Result<u64> {
        self.pos = self.inner.seek(from)?;
        Ok(self.pos)
    }
}
