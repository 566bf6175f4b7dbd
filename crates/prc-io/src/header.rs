//! Uncompressed file header
//!
//! The header is the only uncompressed part of the stream besides the
//! schema marker. It states every compressed segment's offset and size and
//! the total file size, which is why the document must be sized before a
//! single byte is written.

use prc_core::status::{limit_error, PrcError};
use prc_core::wire::BitStreamWriter;

use crate::uuid::Uuid;
use crate::version::{AUTHORING_VERSION, MAGIC, MINIMAL_VERSION};

/// Fixed header bytes before the offset/size table: magic, two versions,
/// two UUIDs.
const PROLOGUE_LEN: usize = 3 + 2 * 4 + 2 * 16;

/// Trailing header fields: structure count, model file offset, file size,
/// uncompressed file count.
const FIXED_TAIL_LEN: usize = 4 + 4 + 4 + 4;

#[derive(Debug, Clone)]
pub struct FileHeader {
    pub minimal_version: u32,
    pub authoring_version: u32,
    pub file_structure_uuid: Uuid,
    pub application_uuid: Uuid,
    pub structure_offsets_sizes: Vec<(u32, u32)>,
    pub model_file_offset: u32,
    pub file_size: u32,
}

impl FileHeader {
    pub fn new(file_structure_uuid: Uuid, application_uuid: Uuid) -> Self {
        Self {
            minimal_version: MINIMAL_VERSION,
            authoring_version: AUTHORING_VERSION,
            file_structure_uuid,
            application_uuid,
            structure_offsets_sizes: Vec::new(),
            model_file_offset: 0,
            file_size: 0,
        }
    }

    /// Serialized header length for a given number of file structures.
    pub fn byte_len(structure_count: usize) -> usize {
        PROLOGUE_LEN + FIXED_TAIL_LEN + structure_count * 8
    }

    pub fn write(&self, out: &mut BitStreamWriter) -> Result<(), PrcError> {
        out.write_bytes(MAGIC);
        out.write_u32(self.minimal_version);
        out.write_u32(self.authoring_version);
        for word in self.file_structure_uuid.words() {
            out.write_u32(word);
        }
        for word in self.application_uuid.words() {
            out.write_u32(word);
        }
        let count = u32::try_from(self.structure_offsets_sizes.len())
            .map_err(|_| limit_error("file structure count exceeds 32-bit range"))?;
        out.write_u32(count);
        for &(offset, size) in &self.structure_offsets_sizes {
            out.write_u32(offset);
            out.write_u32(size);
        }
        out.write_u32(self.model_file_offset);
        out.write_u32(self.file_size);
        out.write_u32(0); // uncompressed file count
        Ok(())
    }
}
