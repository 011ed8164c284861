//! Surface parsing: per-surface headers, vertex frames, UVs and triangles.
//!
//! All `OFS_*` fields of a surface header are relative to the surface's own
//! start. `OFS_END` is the byte length of the surface block and locates the
//! next surface.
//!
//! # Surface block layout
//!
//! ```text
//! +0x00  ident      [u8; 4]
//! +0x04  name       [u8; 64]
//! +0x44  flags      i32
//! +0x48  9 × i32    NUM_FRAMES .. OFS_END
//! ```

use glam::{Vec2, Vec3};

use crate::error::{DecodeError, DecodeResult};
use crate::header::{Header, MAX_FRAMES};
use crate::mesh::{Mesh, build_mesh};
use crate::normals::decode_normal;
use crate::reader::{ByteReader, count, resolve_offset};

/// Width of the identifier block preceding the surface header fields.
pub const SURFACE_NAME_BLOCK: usize = 72;

/// Number of 4-byte fields in a surface header.
pub const SURFACE_HEADER_FIELDS: usize = 9;

/// Size of the fixed surface record: name block plus header fields.
///
/// `OFS_END` can never be smaller than this.
pub const SURFACE_HEADER_SIZE: usize = SURFACE_NAME_BLOCK + SURFACE_HEADER_FIELDS * 4;

/// Maximum vertices per surface.
pub const MAX_VERTS: usize = 4096;

/// Maximum triangles per surface.
pub const MAX_TRIANGLES: usize = 8192;

/// Fixed-point scale of stored vertex coordinates.
pub const POSITION_SCALE: f32 = 1.0 / 64.0;

const NAME_OFFSET: usize = 4;
const NAME_WIDTH: usize = 64;

const VERTEX_STRIDE: usize = 8;
const UV_STRIDE: usize = 8;
const TRIANGLE_STRIDE: usize = 12;

/// Per-surface record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceHeader {
    /// Absolute start of this surface's block.
    pub offset: usize,
    pub num_frames: i32,
    pub num_shaders: i32,
    pub num_verts: i32,
    pub num_triangles: i32,
    pub ofs_triangles: i32,
    pub ofs_shaders: i32,
    pub ofs_st: i32,
    pub ofs_xyznormal: i32,
    pub ofs_end: i32,
}

impl SurfaceHeader {
    pub fn frame_count(&self) -> DecodeResult<usize> {
        count(self.num_frames, "NUM_FRAMES", MAX_FRAMES)
    }

    pub fn vertex_count(&self) -> DecodeResult<usize> {
        count(self.num_verts, "NUM_VERTS", MAX_VERTS)
    }

    pub fn triangle_count(&self) -> DecodeResult<usize> {
        count(self.num_triangles, "NUM_TRIANGLES", MAX_TRIANGLES)
    }
}

/// One animation pose of a surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
}

/// A fully decoded surface.
///
/// Every frame shares the same UVs and triangle list.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedSurface {
    pub header: SurfaceHeader,
    pub name: String,
    pub frames: Vec<Frame>,
    pub uvs: Vec<Vec2>,
    pub faces: Vec<i32>,
    /// Mesh of frame 0.
    pub mesh: Mesh,
}

impl DecodedSurface {
    /// Build the mesh for the given animation frame.
    pub fn mesh_for_frame(&self, frame: usize) -> DecodeResult<Mesh> {
        let pose = self.frames.get(frame).ok_or(DecodeError::FrameOutOfRange {
            frame,
            frame_count: self.frames.len(),
        })?;
        build_mesh(
            pose.positions.clone(),
            pose.normals.clone(),
            self.uvs.clone(),
            &self.faces,
        )
    }
}

/// Parse the surface header of the block starting at `offset`.
///
/// Fails if `OFS_END` is shorter than the fixed surface record, since the
/// next surface would then overlap this one.
pub fn parse_surface_header(data: &[u8], offset: usize) -> DecodeResult<SurfaceHeader> {
    let start = offset
        .checked_add(SURFACE_NAME_BLOCK)
        .ok_or(DecodeError::OutOfBounds {
            offset,
            len: SURFACE_HEADER_SIZE,
            available: data.len(),
        })?;
    let fields = ByteReader::new(ByteReader::new(data).slice(start, SURFACE_HEADER_FIELDS * 4)?);
    let field = |index: usize| fields.read_i32(index * 4);

    let header = SurfaceHeader {
        offset,
        num_frames: field(0)?,
        num_shaders: field(1)?,
        num_verts: field(2)?,
        num_triangles: field(3)?,
        ofs_triangles: field(4)?,
        ofs_shaders: field(5)?,
        ofs_st: field(6)?,
        ofs_xyznormal: field(7)?,
        ofs_end: field(8)?,
    };

    if usize::try_from(header.ofs_end).unwrap_or(0) < SURFACE_HEADER_SIZE {
        return Err(DecodeError::SurfaceTooShort {
            offset,
            ofs_end: header.ofs_end,
            min: SURFACE_HEADER_SIZE,
        });
    }

    Ok(header)
}

/// Borrow `count` records of `stride` bytes at `base + relative`.
fn records<'a>(
    reader: ByteReader<'a>,
    base: usize,
    relative: i32,
    field: &'static str,
    record_count: usize,
    stride: usize,
) -> DecodeResult<ByteReader<'a>> {
    let start = resolve_offset(base, relative, field)?;
    let len = record_count.checked_mul(stride).ok_or(DecodeError::OutOfBounds {
        offset: start,
        len: usize::MAX,
        available: reader.len(),
    })?;
    reader.slice(start, len).map(ByteReader::new)
}

/// Decode the positions and normals of every frame.
///
/// Each vertex record is three fixed-point `i16` coordinates (scaled by
/// [`POSITION_SCALE`]) followed by a zenith and an azimuth byte.
#[allow(clippy::cast_precision_loss)]
pub fn unpack_frames(data: &[u8], header: &SurfaceHeader) -> DecodeResult<Vec<Frame>> {
    let frame_count = header.frame_count()?;
    let vertex_count = header.vertex_count()?;
    let frame_size = vertex_count.saturating_mul(VERTEX_STRIDE);
    let block = records(
        ByteReader::new(data),
        header.offset,
        header.ofs_xyznormal,
        "OFS_XYZNORMAL",
        frame_count,
        frame_size,
    )?;

    let coord = |at: usize| block.read_i16(at).map(|v| v as f32 * POSITION_SCALE);

    (0..frame_count)
        .map(|frame| -> DecodeResult<Frame> {
            let mut positions = Vec::with_capacity(vertex_count);
            let mut normals = Vec::with_capacity(vertex_count);
            for vertex in 0..vertex_count {
                let at = frame * frame_size + vertex * VERTEX_STRIDE;
                positions.push(Vec3::new(coord(at)?, coord(at + 2)?, coord(at + 4)?));
                normals.push(decode_normal(block.read_u8(at + 6)?, block.read_u8(at + 7)?));
            }
            Ok(Frame { positions, normals })
        })
        .collect()
}

/// Decode per-vertex texture coordinates.
///
/// The vertical coordinate is flipped (`1 - v`) for the renderer's
/// convention.
pub fn unpack_uvs(data: &[u8], header: &SurfaceHeader) -> DecodeResult<Vec<Vec2>> {
    let vertex_count = header.vertex_count()?;
    let block = records(
        ByteReader::new(data),
        header.offset,
        header.ofs_st,
        "OFS_ST",
        vertex_count,
        UV_STRIDE,
    )?;

    (0..vertex_count)
        .map(|vertex| -> DecodeResult<Vec2> {
            let at = vertex * UV_STRIDE;
            Ok(Vec2::new(block.read_f32(at)?, 1.0 - block.read_f32(at + 4)?))
        })
        .collect()
}

/// Decode the flat triangle index list (three indices per triangle).
pub fn unpack_faces(data: &[u8], header: &SurfaceHeader) -> DecodeResult<Vec<i32>> {
    let triangle_count = header.triangle_count()?;
    let block = records(
        ByteReader::new(data),
        header.offset,
        header.ofs_triangles,
        "OFS_TRIANGLES",
        triangle_count,
        TRIANGLE_STRIDE,
    )?;

    (0..triangle_count * 3)
        .map(|index| block.read_i32(index * 4))
        .collect()
}

/// Decode a single surface block starting at `offset`.
pub fn parse_surface(data: &[u8], offset: usize) -> DecodeResult<DecodedSurface> {
    let header = parse_surface_header(data, offset)?;
    let name = ByteReader::new(data).read_fixed_str(offset + NAME_OFFSET, NAME_WIDTH)?;

    let frames = unpack_frames(data, &header)?;
    let uvs = unpack_uvs(data, &header)?;
    let faces = unpack_faces(data, &header)?;

    let first = frames.first().ok_or(DecodeError::FrameOutOfRange {
        frame: 0,
        frame_count: 0,
    })?;
    let mesh = build_mesh(
        first.positions.clone(),
        first.normals.clone(),
        uvs.clone(),
        &faces,
    )?;

    Ok(DecodedSurface {
        header,
        name,
        frames,
        uvs,
        faces,
        mesh,
    })
}

/// Decode every surface declared by `header`, in file order.
///
/// The first surface starts at `OFS_SURFACES`; each following one starts
/// `OFS_END` bytes after its predecessor.
pub fn parse_surfaces(data: &[u8], header: &Header) -> DecodeResult<Vec<DecodedSurface>> {
    let surface_count = header.surface_count()?;
    let mut offset = resolve_offset(0, header.ofs_surfaces, "OFS_SURFACES")?;
    let mut surfaces = Vec::with_capacity(surface_count);

    for _ in 0..surface_count {
        let surface = parse_surface(data, offset)?;
        offset = resolve_offset(offset, surface.header.ofs_end, "OFS_END")?;
        surfaces.push(surface);
    }

    Ok(surfaces)
}
