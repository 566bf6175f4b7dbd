//! PRC bit-stream encoder
//!
//! Serializes typed primitives into an in-memory buffer in the exact field
//! order the PRC format expects. The format carries no self-describing
//! schema: field order *is* the schema, so every repeated field uses the
//! same convention of a `u32` count followed by the elements.
//!
//! The same serialization pass is used both to size a segment and to emit
//! it; a finished buffer can be handed out raw (the uncompressed file
//! prologue) or passed through DEFLATE (file-structure segments).

use miniz_oxide::deflate::compress_to_vec;

use crate::status::{limit_error, PrcError};

/// DEFLATE level 10 is miniz_oxide's maximum ("uber") compression.
const DEFLATE_LEVEL_MAX: u8 = 10;

/// Anything with a fixed PRC wire layout.
///
/// This is the single field-order template: the size pass and the write
/// pass both fold over `write`, so they cannot drift apart.
pub trait WireRecord {
    fn write(&self, out: &mut BitStreamWriter) -> Result<(), PrcError>;
}

/// Accumulates little-endian PRC primitives.
#[derive(Debug, Default)]
pub struct BitStreamWriter {
    buf: Vec<u8>,
}

impl BitStreamWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_f64(&mut self, value: f64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Booleans occupy one byte on the wire.
    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(value as u8);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Text is a `u32` byte length followed by UTF-8 bytes.
    pub fn write_string(&mut self, value: &str) -> Result<(), PrcError> {
        self.write_count(value.len(), "string length")?;
        self.buf.extend_from_slice(value.as_bytes());
        Ok(())
    }

    pub fn write_u32_list(&mut self, list: &[u32]) -> Result<(), PrcError> {
        self.write_count(list.len(), "u32 list length")?;
        for &value in list {
            self.write_u32(value);
        }
        Ok(())
    }

    pub fn write_f64_list(&mut self, list: &[f64]) -> Result<(), PrcError> {
        self.write_count(list.len(), "f64 list length")?;
        for &value in list {
            self.write_f64(value);
        }
        Ok(())
    }

    /// Length-prefixed list of self-serializing sub-records.
    pub fn write_record_list<R: WireRecord>(&mut self, list: &[R]) -> Result<(), PrcError> {
        self.write_count(list.len(), "record list length")?;
        for record in list {
            record.write(self)?;
        }
        Ok(())
    }

    fn write_count(&mut self, count: usize, what: &str) -> Result<(), PrcError> {
        let count = u32::try_from(count)
            .map_err(|_| limit_error(format!("{what} exceeds 32-bit range")))?;
        self.write_u32(count);
        Ok(())
    }

    /// Consumes the writer, returning the raw serialized bytes.
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }

    /// Consumes the writer, returning the bytes run through a raw DEFLATE
    /// filter at maximum compression.
    pub fn finish_compressed(self) -> Vec<u8> {
        compress_to_vec(&self.buf, DEFLATE_LEVEL_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miniz_oxide::inflate::decompress_to_vec;

    #[test]
    fn test_primitives_are_little_endian() {
        let mut w = BitStreamWriter::new();
        w.write_u32(0x12345678);
        w.write_bool(true);
        w.write_bool(false);
        w.write_f64(1.0);
        let bytes = w.finish();
        assert_eq!(&bytes[..4], &[0x78, 0x56, 0x34, 0x12]);
        assert_eq!(&bytes[4..6], &[1, 0]);
        assert_eq!(&bytes[6..], &1.0f64.to_le_bytes());
    }

    #[test]
    fn test_lists_are_count_prefixed() {
        let mut w = BitStreamWriter::new();
        w.write_u32_list(&[7, 8]).unwrap();
        w.write_f64_list(&[]).unwrap();
        let bytes = w.finish();
        assert_eq!(&bytes[..4], &2u32.to_le_bytes());
        assert_eq!(&bytes[4..8], &7u32.to_le_bytes());
        assert_eq!(&bytes[8..12], &8u32.to_le_bytes());
        // Empty list is just a zero count.
        assert_eq!(&bytes[12..], &0u32.to_le_bytes());
    }

    #[test]
    fn test_string_is_length_prefixed_utf8() {
        let mut w = BitStreamWriter::new();
        w.write_string("PRC").unwrap();
        let bytes = w.finish();
        assert_eq!(&bytes[..4], &3u32.to_le_bytes());
        assert_eq!(&bytes[4..], b"PRC");
    }

    #[test]
    fn test_compressed_finish_round_trips() {
        let mut w = BitStreamWriter::new();
        w.write_f64_list(&[0.0, 1.0, 0.5]).unwrap();
        let raw_len = w.len();
        let compressed = w.finish_compressed();
        let inflated = decompress_to_vec(&compressed).unwrap();
        assert_eq!(inflated.len(), raw_len);
        assert_eq!(&inflated[..4], &3u32.to_le_bytes());
    }
}
