//! Top-level header parsing.

use crate::error::DecodeResult;
use crate::reader::{ByteReader, count};

/// Byte offset of the first header count field.
///
/// The preceding 76 bytes hold the ident, version, model name and flags,
/// none of which the decoder needs.
pub const HEADER_OFFSET: usize = 76;

/// Number of 4-byte fields in the header record.
pub const HEADER_FIELDS: usize = 8;

/// Maximum animation frames per model.
pub const MAX_FRAMES: usize = 1024;

/// Maximum surfaces per model.
pub const MAX_SURFACES: usize = 32;

/// Fixed top-level record: element counts and section offsets.
///
/// Offsets are absolute byte positions within the buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Header {
    pub num_frames: i32,
    pub num_tags: i32,
    pub num_surfaces: i32,
    pub num_skins: i32,
    pub ofs_frames: i32,
    pub ofs_tags: i32,
    pub ofs_surfaces: i32,
    pub ofs_eof: i32,
}

impl Header {
    /// Number of surfaces as a length.
    pub fn surface_count(&self) -> DecodeResult<usize> {
        count(self.num_surfaces, "NUM_SURFACES", MAX_SURFACES)
    }
}

/// Parse the header record at [`HEADER_OFFSET`].
///
/// No magic or version check is made: any buffer long enough to hold the
/// eight fields parses.
pub fn parse_header(data: &[u8]) -> DecodeResult<Header> {
    let fields = ByteReader::new(ByteReader::new(data).slice(HEADER_OFFSET, HEADER_FIELDS * 4)?);
    let field = |index: usize| fields.read_i32(index * 4);

    Ok(Header {
        num_frames: field(0)?,
        num_tags: field(1)?,
        num_surfaces: field(2)?,
        num_skins: field(3)?,
        ofs_frames: field(4)?,
        ofs_tags: field(5)?,
        ofs_surfaces: field(6)?,
        ofs_eof: field(7)?,
    })
}
