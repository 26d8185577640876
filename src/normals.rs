//! Two-phase split-normal upkeep around the normal copy pass.
//!
//! Corner (split) normals are derived from vertex normals, so they must be
//! refreshed before any vertex normal changes and rebuilt wholesale after.
//! The rebuild goes through a per-vertex snapshot because the mesh model
//! exposes no per-corner patching.

use bevy::prelude::*;

use crate::propagate::SourceAttribs;
use crate::session::MeshContext;

/// Pre-phase: refresh every context's corner normals from its current
/// geometry, before any pass writes into the edit views.
pub fn prep_meshes(contexts: &mut [MeshContext<'_>]) {
    for context in contexts.iter_mut() {
        context.data.recalculate_corner_normals(context.edit);
    }
}

/// Post-phase: rebuild every context's split normals so each selected
/// vertex contributes the copied normal.
///
/// The snapshot is taken from the mutated meshes: selected vertices map to
/// the source normal, all others keep whatever their vertex normal now is.
/// Auto-smooth is switched on so the custom corners take effect, the corner
/// block is recreated, and the snapshot is written in.
pub fn finalize_normals(contexts: &mut [MeshContext<'_>], source: &SourceAttribs) {
    for context in contexts.iter_mut() {
        let snapshot: Vec<Vec3> = (0..context.edit.vertex_count() as u32)
            .map(|vi| {
                if context.edit.selection.contains(&vi) {
                    source.normal
                } else {
                    context.edit.normals[vi as usize]
                }
            })
            .collect();

        context.data.auto_smooth = true;
        context.data.recalculate_corner_normals(context.edit);
        context.data.set_corner_normals_from_vertices(context.edit, &snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit_mesh::{EditMesh, MeshData};

    fn two_triangles() -> EditMesh {
        EditMesh {
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::ONE],
            normals: vec![Vec3::Z; 4],
            triangles: vec![[0, 1, 2], [1, 3, 2]],
            ..default()
        }
    }

    fn source_with_normal(normal: Vec3) -> SourceAttribs {
        SourceAttribs {
            transform: Mat4::IDENTITY,
            local_position: Vec3::ZERO,
            world_position: Vec3::ZERO,
            normal,
            shape_key_points: Vec::new(),
        }
    }

    #[test]
    fn prep_sizes_the_corner_block() {
        let mut data = MeshData::default();
        let mut edit = two_triangles();
        let mut contexts = [MeshContext {
            name: "mesh",
            data: &mut data,
            edit: &mut edit,
            transform: Mat4::IDENTITY,
            is_active: true,
        }];

        prep_meshes(&mut contexts);

        assert_eq!(contexts[0].data.corner_normals.len(), 6);
    }

    #[test]
    fn finalize_writes_source_normal_into_selected_corners() {
        let mut data = MeshData::default();
        let mut edit = two_triangles();
        edit.selection.extend([1, 3]);
        let mut contexts = [MeshContext {
            name: "mesh",
            data: &mut data,
            edit: &mut edit,
            transform: Mat4::IDENTITY,
            is_active: true,
        }];
        prep_meshes(&mut contexts);

        finalize_normals(&mut contexts, &source_with_normal(Vec3::X));

        let context = &contexts[0];
        assert!(context.data.auto_smooth);
        // Corners of vertices 1 and 3 carry the copied normal, the rest
        // keep their vertex normal.
        let expected = [
            Vec3::Z,
            Vec3::X,
            Vec3::Z, // face 0: vertices 0, 1, 2
            Vec3::X,
            Vec3::X,
            Vec3::Z, // face 1: vertices 1, 3, 2
        ];
        assert_eq!(context.data.corner_normals, expected);
    }

    #[test]
    fn finalize_snapshots_normals_after_mutation() {
        let mut data = MeshData::default();
        let mut edit = two_triangles();
        edit.selection.insert(0);
        let mut contexts = [MeshContext {
            name: "mesh",
            data: &mut data,
            edit: &mut edit,
            transform: Mat4::IDENTITY,
            is_active: true,
        }];
        prep_meshes(&mut contexts);

        // A pass rewrites an unselected vertex normal between the phases.
        contexts[0].edit.normals[2] = Vec3::NEG_X;

        finalize_normals(&mut contexts, &source_with_normal(Vec3::Y));

        // The snapshot reflects the post-mutation normal, not the one the
        // pre-phase saw.
        assert_eq!(contexts[0].data.corner_normals[2], Vec3::NEG_X);
        assert_eq!(contexts[0].data.corner_normals[0], Vec3::Y);
    }
}
