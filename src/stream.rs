//! Octet stream abstractions: a forward-only, seekable reader for
//! decoding, and a two-region (head/tail) writer for encoding.

use crate::error::AbiError;
use crate::numeric::WORD_SIZE;

/// A random-access view over an input byte slice with a current cursor.
///
/// `read` never mutates anything the caller can observe besides the
/// cursor, and the cursor may be seeked freely forwards or backwards —
/// this is what lets the composite codec "peek and restore" around a
/// dynamic member's offset indirection.
#[derive(Debug, Clone, Copy)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Reader { data, pos: 0 }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The reader's current absolute offset.
    pub fn tell(&self) -> usize {
        self.pos
    }

    /// Repositions the cursor to an absolute offset. Out-of-range seeks
    /// are allowed; they only become an error if something is later read
    /// at that position.
    pub fn seek(&mut self, abs: usize) {
        self.pos = abs;
    }

    /// Reads exactly `n` bytes starting at the cursor and advances it,
    /// or fails with `InsufficientData`.
    pub fn read(&mut self, n: usize, type_string: &str) -> Result<&'a [u8], AbiError> {
        let start = self.pos;
        let end = start
            .checked_add(n)
            .ok_or_else(|| AbiError::InsufficientData {
                type_string: type_string.to_string(),
                offset: start,
            })?;
        let slice = self
            .data
            .get(start..end)
            .ok_or_else(|| AbiError::InsufficientData {
                type_string: type_string.to_string(),
                offset: start,
            })?;
        self.pos = end;
        Ok(slice)
    }

    /// Reads exactly one 32-byte word.
    pub fn read_word(&mut self, type_string: &str) -> Result<[u8; WORD_SIZE], AbiError> {
        let slice = self.read(WORD_SIZE, type_string)?;
        let mut word = [0u8; WORD_SIZE];
        word.copy_from_slice(slice);
        Ok(word)
    }

    /// Reads a `uint256` head slot and interprets it as a byte offset
    /// into this reader's own buffer. A word too large to fit in a
    /// `usize` can never be a valid offset into any real buffer, so it
    /// is rejected as `InvalidOffset` rather than silently truncated.
    pub fn read_offset(&mut self, type_string: &str) -> Result<usize, AbiError> {
        let start = self.pos;
        self.read_usize_word(type_string).ok_or_else(|| AbiError::InvalidOffset {
            type_string: type_string.to_string(),
            offset: start,
            buffer_len: self.data.len(),
        })
    }

    /// Reads a `uint256` length prefix (as used by `bytes`, `string`,
    /// and dynamic arrays). A word too large to fit in a `usize` can
    /// never be satisfied by any real buffer, so it is reported the
    /// same way a short read would be.
    pub fn read_length(&mut self, type_string: &str) -> Result<usize, AbiError> {
        let start = self.pos;
        self.read_usize_word(type_string).ok_or_else(|| AbiError::InsufficientData {
            type_string: type_string.to_string(),
            offset: start,
        })
    }

    fn read_usize_word(&mut self, type_string: &str) -> Option<usize> {
        const USIZE_BYTES: usize = core::mem::size_of::<usize>();
        let word = self.read_word(type_string).ok()?;
        let high_zero = word[..WORD_SIZE - USIZE_BYTES].iter().all(|&b| b == 0);
        if !high_zero {
            return None;
        }
        let mut buf = [0u8; USIZE_BYTES];
        buf.copy_from_slice(&word[WORD_SIZE - USIZE_BYTES..]);
        Some(usize::from_be_bytes(buf))
    }
}

/// Two append-only regions that together make up a composite encoding:
/// fixed-width slots (inline values or offsets) in `head`, and the
/// concatenated bodies of dynamic members in `tail`.
///
/// The writer itself doesn't know what "local base" its offsets are
/// relative to — that's established by whoever is pushing dynamic
/// members, since it's always `head.len()` at the moment the whole
/// region is finalized.
#[derive(Debug, Default)]
pub struct Writer {
    head: Vec<u8>,
    tail: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Writer::default()
    }

    /// Appends a static member's encoding directly into the head.
    pub fn push_head(&mut self, bytes: &[u8]) {
        self.head.extend_from_slice(bytes);
    }

    /// Appends a dynamic member's full body to the tail and returns the
    /// tail offset it now starts at, relative to the start of the tail.
    pub fn push_tail(&mut self, bytes: &[u8]) -> usize {
        let offset = self.tail.len();
        self.tail.extend_from_slice(bytes);
        offset
    }

    /// The head's length so far — the component of a dynamic offset
    /// that isn't the body's position within the tail.
    pub fn head_len(&self) -> usize {
        self.head.len()
    }

    /// The tail's length so far.
    pub fn tail_len(&self) -> usize {
        self.tail.len()
    }

    /// Concatenates head then tail into the final encoding.
    pub fn finish(mut self) -> Vec<u8> {
        self.head.extend_from_slice(&self.tail);
        self.head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_reads_and_seeks() {
        let data = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let mut r = Reader::new(&data);
        assert_eq!(r.read(4, "bytes4").unwrap(), &[1, 2, 3, 4]);
        assert_eq!(r.tell(), 4);
        r.seek(0);
        assert_eq!(r.read(2, "bytes2").unwrap(), &[1, 2]);
    }

    #[test]
    fn reader_rejects_short_read() {
        let data = [1u8, 2, 3];
        let mut r = Reader::new(&data);
        assert!(r.read(32, "uint256").is_err());
    }

    #[test]
    fn writer_concatenates_head_then_tail() {
        let mut w = Writer::new();
        w.push_head(&[1, 2, 3]);
        w.push_tail(&[9, 9]);
        assert_eq!(w.finish(), vec![1, 2, 3, 9, 9]);
    }
}
