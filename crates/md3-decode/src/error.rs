//! Decode error types.

use thiserror::Error;

/// Result alias for decoding operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors produced while decoding an MD3 buffer.
///
/// Every read is bounds-checked, so a truncated or malformed buffer
/// surfaces as one of these instead of garbage geometry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A read of `len` bytes at `offset` would run past the end of the buffer.
    #[error("read of {len} bytes at offset {offset} exceeds buffer of {available} bytes")]
    OutOfBounds {
        offset: usize,
        len: usize,
        available: usize,
    },

    /// A count field holds a negative value.
    #[error("{field} is negative ({value})")]
    NegativeCount {
        field: &'static str,
        value: i32,
    },

    /// A count field exceeds the format's fixed limit.
    #[error("{field} is {value}, above the limit of {max}")]
    CountTooLarge {
        field: &'static str,
        value: i32,
        max: usize,
    },

    /// A surface block is too short to hold its own header.
    #[error("surface at offset {offset} has OFS_END {ofs_end}, below the minimum of {min}")]
    SurfaceTooShort {
        offset: usize,
        ofs_end: i32,
        min: usize,
    },

    /// An offset field resolves to a position before the start of the buffer.
    #[error("{field} resolves to a negative position ({value})")]
    NegativeOffset {
        field: &'static str,
        value: i64,
    },

    /// A triangle references a vertex that does not exist.
    #[error("face index {index} out of range for {vertex_count} vertices")]
    FaceIndexOutOfRange {
        index: i64,
        vertex_count: usize,
    },

    /// Per-vertex attribute arrays disagree in length.
    #[error("attribute length mismatch: {positions} positions, {normals} normals, {uvs} uvs")]
    LengthMismatch {
        positions: usize,
        normals: usize,
        uvs: usize,
    },

    /// A frame index past the surface's frame count was requested.
    #[error("frame {frame} out of range for {frame_count} frames")]
    FrameOutOfRange {
        frame: usize,
        frame_count: usize,
    },
}
