//! Conversions between Bevy meshes and the editable session model.
//!
//! Hosts build an `EditMesh` from a render mesh when entering edit mode and
//! bake the result back out when leaving. Baking honors the corner-normal
//! block by splitting shared vertices, since a Bevy mesh stores exactly one
//! normal per vertex.

use bevy::mesh::{Indices, PrimitiveTopology, VertexAttributeValues};
use bevy::prelude::*;
use std::collections::HashMap;

use crate::edit_mesh::{EditMesh, MeshData};

impl EditMesh {
    /// Build an editable view from a Bevy `Mesh`.
    ///
    /// Returns `None` if the mesh lacks positions or uses a non-triangle
    /// topology. A missing normal attribute leaves `normals` empty, which
    /// the operator reports as unsupported for normal copying.
    pub fn from_bevy_mesh(mesh: &Mesh) -> Option<Self> {
        if mesh.primitive_topology() != PrimitiveTopology::TriangleList {
            return None;
        }

        let positions: Vec<Vec3> = match mesh.attribute(Mesh::ATTRIBUTE_POSITION)? {
            VertexAttributeValues::Float32x3(v) => v.iter().map(|p| Vec3::from(*p)).collect(),
            _ => return None,
        };

        let normals: Vec<Vec3> = match mesh.attribute(Mesh::ATTRIBUTE_NORMAL) {
            Some(VertexAttributeValues::Float32x3(v)) => {
                v.iter().map(|n| Vec3::from(*n)).collect()
            }
            _ => Vec::new(),
        };

        // `chunks_exact` drops a dangling remainder instead of panicking on
        // a malformed index count.
        let triangles = match mesh.indices() {
            Some(Indices::U32(indices)) => indices
                .chunks_exact(3)
                .map(|c| [c[0], c[1], c[2]])
                .collect(),
            Some(Indices::U16(indices)) => indices
                .chunks_exact(3)
                .map(|c| [c[0] as u32, c[1] as u32, c[2] as u32])
                .collect(),
            None => {
                // Non-indexed: generate sequential indices
                (0..positions.len() as u32)
                    .collect::<Vec<_>>()
                    .chunks_exact(3)
                    .map(|c| [c[0], c[1], c[2]])
                    .collect()
            }
        };

        Some(EditMesh {
            positions,
            normals,
            triangles,
            ..default()
        })
    }
}

impl MeshData {
    /// Bake the edit view back into a Bevy `Mesh`.
    ///
    /// With a filled corner-normal block, vertices shared between corners
    /// that disagree on their normal are duplicated so every corner keeps
    /// its own. Without one the per-vertex normals go out as they are.
    pub fn to_bevy_mesh(&self, edit: &EditMesh) -> Mesh {
        if self.corner_normals.len() == edit.triangles.len() * 3 {
            self.bake_with_corner_normals(edit)
        } else {
            bake_vertices(&edit.positions, &edit.normals, edit.triangles.clone())
        }
    }

    fn bake_with_corner_normals(&self, edit: &EditMesh) -> Mesh {
        let mut positions = Vec::with_capacity(edit.positions.len());
        let mut normals = Vec::with_capacity(edit.positions.len());
        let mut triangles = Vec::with_capacity(edit.triangles.len());
        // (vertex, normal bits) -> output vertex, so corners agreeing on a
        // normal keep sharing a vertex.
        let mut vertex_map: HashMap<(u32, [u32; 3]), u32> = HashMap::new();

        for (fi, tri) in edit.triangles.iter().enumerate() {
            let mut out_tri = [0u32; 3];
            for (ci, &vi) in tri.iter().enumerate() {
                let normal = self.corner_normals[fi * 3 + ci];
                let key = (vi, normal.to_array().map(f32::to_bits));
                let out_vi = *vertex_map.entry(key).or_insert_with(|| {
                    positions.push(edit.positions[vi as usize]);
                    normals.push(normal);
                    positions.len() as u32 - 1
                });
                out_tri[ci] = out_vi;
            }
            triangles.push(out_tri);
        }

        bake_vertices(&positions, &normals, triangles)
    }
}

fn bake_vertices(positions: &[Vec3], normals: &[Vec3], triangles: Vec<[u32; 3]>) -> Mesh {
    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, default());

    mesh.insert_attribute(
        Mesh::ATTRIBUTE_POSITION,
        positions.iter().map(|p| [p.x, p.y, p.z]).collect::<Vec<_>>(),
    );
    if normals.len() == positions.len() {
        mesh.insert_attribute(
            Mesh::ATTRIBUTE_NORMAL,
            normals.iter().map(|n| [n.x, n.y, n.z]).collect::<Vec<_>>(),
        );
    }

    let indices: Vec<u32> = triangles.iter().flat_map(|t| t.iter().copied()).collect();
    mesh.insert_indices(Indices::U32(indices));
    mesh
}
