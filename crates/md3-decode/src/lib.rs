//! Decode packed MD3 animated mesh buffers.
//!
//! This crate provides pure synchronous decoding functions for turning a raw
//! MD3 byte buffer into renderer-ready meshes. Nothing here performs I/O;
//! the caller supplies the bytes and owns the result.
//!
//! # Design principles
//!
//! - **Synchronous**: No async, no threading primitives
//! - **Bounds-checked**: Malformed offsets and counts become [`DecodeError`]s
//! - **Immutable input**: The buffer is only ever borrowed
//!
//! # Key functions
//!
//! - [`decode_model`]: Decode the header and every surface
//! - [`parse_header`]: Read the fixed top-level record
//! - [`parse_surfaces`]: Walk the surface blocks in file order
//! - [`decode_normal`]: Expand a two-byte compressed normal
//! - [`build_mesh`]: Assemble parallel attribute arrays into a [`Mesh`]

mod error;

pub mod header;
pub mod mesh;
pub mod normals;
pub mod reader;
pub mod surface;

pub use error::{DecodeError, DecodeResult};
pub use header::{HEADER_OFFSET, Header, parse_header};
pub use mesh::{Mesh, build_mesh};
pub use normals::decode_normal;
pub use reader::ByteReader;
pub use surface::{
    DecodedSurface, Frame, POSITION_SCALE, SurfaceHeader, parse_surface_header, parse_surfaces,
    unpack_faces, unpack_frames, unpack_uvs,
};

/// Result of decoding a complete model buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedModel {
    pub header: Header,
    /// Surfaces in file order.
    pub surfaces: Vec<DecodedSurface>,
}

impl DecodedModel {
    /// Headers of every decoded surface, in file order.
    pub fn surface_headers(&self) -> impl Iterator<Item = &SurfaceHeader> {
        self.surfaces.iter().map(|s| &s.header)
    }
}

/// Decode a complete model buffer.
pub fn decode_model(data: &[u8]) -> DecodeResult<DecodedModel> {
    let header = parse_header(data)?;
    let surfaces = parse_surfaces(data, &header)?;
    Ok(DecodedModel { header, surfaces })
}
