//! Hand-built MD3 fixtures.

#![allow(dead_code)]

/// Size of the fixed top-level record (ident .. `OFS_EOF`).
pub const HEADER_SIZE: usize = 108;
/// Size of the fixed surface record (ident .. `OFS_END`).
pub const SURFACE_HEADER_SIZE: usize = 108;

/// A vertex as stored on disk: fixed-point position and normal angles.
#[derive(Debug, Clone, Copy)]
pub struct RawVertex {
    pub position: [i16; 3],
    pub normal: [u8; 2],
}

#[derive(Debug, Clone, Default)]
pub struct SurfaceFixture {
    pub name: String,
    pub frames: Vec<Vec<RawVertex>>,
    pub uvs: Vec<[f32; 2]>,
    pub triangles: Vec<[i32; 3]>,
}

impl SurfaceFixture {
    fn vertex_count(&self) -> usize {
        self.uvs.len()
    }

    fn write(&self, out: &mut Vec<u8>) {
        let vertex_count = self.vertex_count();
        let ofs_triangles = SURFACE_HEADER_SIZE;
        let ofs_shaders = ofs_triangles + self.triangles.len() * 12;
        let ofs_st = ofs_shaders;
        let ofs_xyznormal = ofs_st + vertex_count * 8;
        let ofs_end = ofs_xyznormal + self.frames.len() * vertex_count * 8;

        let start = out.len();
        out.extend_from_slice(b"IDP3");
        let mut name = [0u8; 64];
        name[..self.name.len()].copy_from_slice(self.name.as_bytes());
        out.extend_from_slice(&name);
        put(out, 0);

        for value in [
            self.frames.len(),
            0,
            vertex_count,
            self.triangles.len(),
            ofs_triangles,
            ofs_shaders,
            ofs_st,
            ofs_xyznormal,
            ofs_end,
        ] {
            put(out, i32::try_from(value).unwrap());
        }

        for triangle in &self.triangles {
            for &index in triangle {
                put(out, index);
            }
        }
        for [u, v] in &self.uvs {
            out.extend_from_slice(&u.to_le_bytes());
            out.extend_from_slice(&v.to_le_bytes());
        }
        for frame in &self.frames {
            assert_eq!(frame.len(), vertex_count);
            for vertex in frame {
                for c in vertex.position {
                    out.extend_from_slice(&c.to_le_bytes());
                }
                out.extend_from_slice(&vertex.normal);
            }
        }

        assert_eq!(out.len() - start, ofs_end);
    }
}

fn put(out: &mut Vec<u8>, value: i32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Serialize a model with the given surfaces directly after the header.
pub fn build_md3(surfaces: &[SurfaceFixture]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"IDP3");
    put(&mut out, 15);
    let mut name = [0u8; 64];
    name[..9].copy_from_slice(b"fixture\0\0");
    out.extend_from_slice(&name);
    put(&mut out, 0);

    let num_frames = surfaces.first().map_or(0, |s| s.frames.len());
    let header_pos = out.len();
    for _ in 0..8 {
        put(&mut out, 0);
    }
    assert_eq!(out.len(), HEADER_SIZE);

    for surface in surfaces {
        surface.write(&mut out);
    }

    let eof = out.len();
    let fields = [
        num_frames,
        0,
        surfaces.len(),
        0,
        HEADER_SIZE,
        HEADER_SIZE,
        HEADER_SIZE,
        eof,
    ];
    for (i, value) in fields.into_iter().enumerate() {
        let at = header_pos + i * 4;
        out[at..at + 4].copy_from_slice(&i32::try_from(value).unwrap().to_le_bytes());
    }
    out
}

/// A unit quad: four vertices, two triangles, one frame.
pub fn quad(name: &str) -> SurfaceFixture {
    let v = |x: i16, y: i16| RawVertex {
        position: [x, y, 0],
        normal: [0, 0],
    };
    SurfaceFixture {
        name: name.to_string(),
        frames: vec![vec![v(0, 0), v(64, 0), v(64, 64), v(0, 64)]],
        uvs: vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
        triangles: vec![[0, 1, 2], [0, 2, 3]],
    }
}
