//! Ring-buffer collaborator contracts
//!
//! The decoder never owns a buffer; it is handed a [`SampleSource`] and a [`ByteSink`]
//! and reads/writes only within what each currently reports available.
//! `VecSampleSource`/`VecByteSink` are reference implementations backed by a growable
//! `Vec`, suitable for tests and the bundled CLI tools. A production host can back
//! these traits with a lock-free SPSC ring buffer instead.

/// Upstream collaborator: a stream of normalized `f32` samples.
pub trait SampleSource {
    /// Number of samples currently available to read without blocking.
    fn available(&self) -> usize;
    /// A slice of up to `available()` unread samples, starting at the current read
    /// position.
    fn read_ptr(&self) -> &[f32];
    /// Advance the read position by `n` samples. `n` must be `<= available()`.
    fn advance(&mut self, n: usize);
}

/// Downstream collaborator: a stream of output bytes.
pub trait ByteSink {
    /// Number of bytes that can currently be written without blocking.
    fn writeable(&self) -> usize;
    /// A mutable slice of at least `writeable()` bytes to write into, starting at the
    /// current write position.
    fn write_ptr(&mut self) -> &mut [u8];
    /// Advance the write position by `n` bytes, committing what was written. `n` must
    /// be `<= writeable()`.
    fn advance(&mut self, n: usize);
}

/// `Vec<f32>`-backed [`SampleSource`] for tests and CLI tools.
#[derive(Debug, Default, Clone)]
pub struct VecSampleSource {
    samples: Vec<f32>,
    pos: usize,
}

impl VecSampleSource {
    pub fn new(samples: Vec<f32>) -> Self {
        Self { samples, pos: 0 }
    }

    /// Append more samples (simulating a producer feeding the ring buffer).
    pub fn push(&mut self, more: &[f32]) {
        self.samples.extend_from_slice(more);
    }
}

impl SampleSource for VecSampleSource {
    fn available(&self) -> usize {
        self.samples.len() - self.pos
    }

    fn read_ptr(&self) -> &[f32] {
        &self.samples[self.pos..]
    }

    fn advance(&mut self, n: usize) {
        assert!(n <= self.available(), "advance past available samples");
        self.pos += n;
    }
}

/// `Vec<u8>`-backed [`ByteSink`] for tests and CLI tools. `writeable()` is effectively
/// unbounded (it grows); a host that wants to exercise back-pressure should wrap a
/// fixed-capacity buffer instead and cap `writeable()`.
#[derive(Debug, Default, Clone)]
pub struct VecByteSink {
    bytes: Vec<u8>,
    committed: usize,
    capacity: usize,
}

impl VecByteSink {
    /// A sink with unbounded effective capacity.
    pub fn new() -> Self {
        Self {
            bytes: Vec::new(),
            committed: 0,
            capacity: usize::MAX,
        }
    }

    /// A sink that reports only `capacity` writeable bytes at a time, to exercise the
    /// line decoder's backpressure/skip-a-row behavior.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: vec![0u8; capacity],
            committed: 0,
            capacity,
        }
    }

    /// The bytes committed so far.
    pub fn committed(&self) -> &[u8] {
        &self.bytes[..self.committed]
    }
}

impl ByteSink for VecByteSink {
    fn writeable(&self) -> usize {
        if self.capacity == usize::MAX {
            // Report a large but finite scratch window; growth happens on advance().
            self.bytes.len().saturating_sub(self.committed).max(1 << 20)
        } else {
            self.capacity.saturating_sub(self.committed)
        }
    }

    fn write_ptr(&mut self) -> &mut [u8] {
        if self.capacity == usize::MAX {
            let needed = self.committed + (1 << 20);
            if self.bytes.len() < needed {
                self.bytes.resize(needed, 0);
            }
        }
        &mut self.bytes[self.committed..]
    }

    fn advance(&mut self, n: usize) {
        assert!(n <= self.writeable(), "advance past writeable capacity");
        self.committed += n;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sample_source_tracks_position() {
        let mut src = VecSampleSource::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(src.available(), 3);
        assert_eq!(src.read_ptr(), &[1.0, 2.0, 3.0]);
        src.advance(2);
        assert_eq!(src.available(), 1);
        assert_eq!(src.read_ptr(), &[3.0]);
    }

    #[test]
    #[should_panic]
    fn vec_sample_source_rejects_over_advance() {
        let mut src = VecSampleSource::new(vec![1.0]);
        src.advance(2);
    }

    #[test]
    fn vec_byte_sink_accumulates_committed_bytes() {
        let mut sink = VecByteSink::new();
        assert!(sink.writeable() >= 4);
        sink.write_ptr()[..4].copy_from_slice(b"SYNC");
        sink.advance(4);
        assert_eq!(sink.committed(), b"SYNC");
    }

    #[test]
    fn vec_byte_sink_with_capacity_reports_backpressure() {
        let mut sink = VecByteSink::with_capacity(4);
        assert_eq!(sink.writeable(), 4);
        sink.advance(4);
        assert_eq!(sink.writeable(), 0);
    }
}
