//! Minimal MD3 buffers for container tests.

#![allow(dead_code)]

use std::path::PathBuf;

fn put(out: &mut Vec<u8>, value: usize) {
    out.extend_from_slice(&i32::try_from(value).unwrap().to_le_bytes());
}

/// One surface: `frames` poses of a single triangle, each lifted by
/// `frame` units along Z.
fn surface(out: &mut Vec<u8>, name: &str, frames: usize) {
    let ofs_triangles = 108;
    let ofs_st = ofs_triangles + 12;
    let ofs_xyznormal = ofs_st + 3 * 8;
    let ofs_end = ofs_xyznormal + frames * 3 * 8;

    out.extend_from_slice(b"IDP3");
    let mut field = [0u8; 64];
    field[..name.len()].copy_from_slice(name.as_bytes());
    out.extend_from_slice(&field);
    put(out, 0);
    for value in [
        frames,
        0,
        3,
        1,
        ofs_triangles,
        ofs_st,
        ofs_st,
        ofs_xyznormal,
        ofs_end,
    ] {
        put(out, value);
    }

    for index in [0, 1, 2] {
        put(out, index);
    }
    for (u, v) in [(0.0f32, 0.0f32), (1.0, 0.0), (0.0, 1.0)] {
        out.extend_from_slice(&u.to_le_bytes());
        out.extend_from_slice(&v.to_le_bytes());
    }
    for frame in 0..frames {
        let z = i16::try_from(frame * 64).unwrap();
        for (x, y) in [(0i16, 0i16), (64, 0), (0, 64)] {
            for c in [x, y, z] {
                out.extend_from_slice(&c.to_le_bytes());
            }
            out.extend_from_slice(&[0, 0]);
        }
    }
}

/// A model whose surfaces are named by `names`, each with `frames` poses.
pub fn model_bytes(names: &[&str], frames: usize) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"IDP3");
    put(&mut out, 15);
    out.extend_from_slice(&[0u8; 64]);
    put(&mut out, 0);
    for value in [frames, 0, names.len(), 0, 108, 108, 108, 0] {
        put(&mut out, value);
    }
    for name in names {
        surface(&mut out, name, frames);
    }
    let eof = out.len();
    out[104..108].copy_from_slice(&i32::try_from(eof).unwrap().to_le_bytes());
    out
}

/// Write `bytes` to a uniquely named file in the system temp directory.
pub fn temp_model(tag: &str, bytes: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("md3-test-{}-{tag}.md3", std::process::id()));
    std::fs::write(&path, bytes).unwrap();
    path
}
