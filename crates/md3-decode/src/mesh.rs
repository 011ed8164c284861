//! Mesh assembly from decoded vertex streams.

use glam::{Vec2, Vec3};

use crate::error::{DecodeError, DecodeResult};

/// Renderer-ready indexed triangle mesh.
///
/// Vertex `i` is described by `positions[i]`, `normals[i]` and `uvs[i]`.
/// Every three entries of `indices` form one triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl Mesh {
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds of the positions, or `None` for an empty mesh.
    #[must_use]
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(min, max), &p| (min.min(p), max.max(p))),
        )
    }
}

/// Build a mesh from parallel attribute arrays and a flat index list.
///
/// Fails if the attribute arrays differ in length or any index does not
/// name an existing vertex.
pub fn build_mesh(
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    uvs: Vec<Vec2>,
    faces: &[i32],
) -> DecodeResult<Mesh> {
    if positions.len() != normals.len() || positions.len() != uvs.len() {
        return Err(DecodeError::LengthMismatch {
            positions: positions.len(),
            normals: normals.len(),
            uvs: uvs.len(),
        });
    }

    let vertex_count = positions.len();
    let indices = faces
        .iter()
        .map(|&index| {
            u32::try_from(index)
                .ok()
                .filter(|&i| (i as usize) < vertex_count)
                .ok_or(DecodeError::FaceIndexOutOfRange {
                    index: i64::from(index),
                    vertex_count,
                })
        })
        .collect::<DecodeResult<Vec<_>>>()?;

    Ok(Mesh {
        positions,
        normals,
        uvs,
        indices,
    })
}
