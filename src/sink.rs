use std::io::{self, Write};

/// Byte-oriented output capability accepted by the printer, prettifier and
/// mutator.
///
/// `write` returns the number of bytes the write *represents*, which bounded
/// sinks may exceed what they actually stored: [`SliceSink`] truncates when
/// full but still reports the full requested length, so a caller can size a
/// buffer by doing a dry run into a zero-capacity sink and reading the
/// returned total.
pub trait Sink {
    fn write(&mut self, buf: &[u8]) -> usize;
}

/// Everything written is appended; never truncates.
impl Sink for Vec<u8> {
    fn write(&mut self, buf: &[u8]) -> usize {
        self.extend_from_slice(buf);
        buf.len()
    }
}

/// Bounded buffer sink over a caller-provided slice.
///
/// Stores at most the slice capacity, silently dropping the rest, while the
/// reported lengths keep counting. `written()` is the logical total,
/// `stored()` the bytes that actually landed.
pub struct SliceSink<'a> {
    buf: &'a mut [u8],
    stored: usize,
    written: usize,
}

impl<'a> SliceSink<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            stored: 0,
            written: 0,
        }
    }

    /// Logical bytes written, including anything truncated.
    pub fn written(&self) -> usize {
        self.written
    }

    /// The bytes that fit.
    pub fn stored(&self) -> &[u8] {
        &self.buf[..self.stored]
    }
}

impl Sink for SliceSink<'_> {
    fn write(&mut self, buf: &[u8]) -> usize {
        let avail = self.buf.len() - self.stored;
        let n = buf.len().min(avail);
        self.buf[self.stored..self.stored + n].copy_from_slice(&buf[..n]);
        self.stored += n;
        self.written += buf.len();
        buf.len()
    }
}

/// Adapter from any `io::Write` (files, in particular).
///
/// The `Sink` trait has no error channel, so the first I/O failure is
/// stashed and every later write becomes a no-op reporting zero; callers
/// retrieve the verdict with [`IoSink::finish`].
pub struct IoSink<W: Write> {
    inner: W,
    error: Option<io::Error>,
}

impl<W: Write> IoSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, error: None }
    }

    /// Unwrap the writer, surfacing any write error seen along the way.
    pub fn finish(mut self) -> io::Result<W> {
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(self.inner),
        }
    }
}

impl<W: Write> Sink for IoSink<W> {
    fn write(&mut self, buf: &[u8]) -> usize {
        if self.error.is_some() {
            return 0;
        }
        match self.inner.write_all(buf) {
            Ok(()) => buf.len(),
            Err(e) => {
                self.error = Some(e);
                0
            }
        }
    }
}
