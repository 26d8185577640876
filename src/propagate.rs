//! Attribute propagation passes and the object-space conversion they share.
//!
//! Every pass takes the resolved contexts, the target list, and the source
//! attributes captured from the active vertex before any pass ran. Passes
//! write straight into the contexts' edit views and custom data.

use bevy::prelude::*;

use crate::edit_mesh::VertexId;
use crate::select::VertexRef;
use crate::session::MeshContext;

/// Every value copied from the active vertex, captured before mutation so
/// later passes cannot observe earlier passes' writes.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceAttribs {
    /// World transform of the active object.
    pub transform: Mat4,
    pub local_position: Vec3,
    pub world_position: Vec3,
    pub normal: Vec3,
    /// The active vertex's point in each shape-key layer, in layer order.
    pub shape_key_points: Vec<Vec3>,
}

/// Capture the active vertex's attributes from the active context.
pub fn capture_source(active: &MeshContext<'_>, vertex: VertexId) -> SourceAttribs {
    let local = active.edit.positions[vertex as usize];
    SourceAttribs {
        transform: active.transform,
        local_position: local,
        world_position: active.transform.transform_point3(local),
        normal: active
            .edit
            .normals
            .get(vertex as usize)
            .copied()
            .unwrap_or(Vec3::ZERO),
        shape_key_points: active
            .data
            .shape_keys
            .iter()
            .map(|key| key.points.get(vertex as usize).copied().unwrap_or(Vec3::ZERO))
            .collect(),
    }
}

/// Local-space position a vertex of an object with `target_transform` must
/// take to coincide with the source in world space.
///
/// When both objects share the same transform the source local position is
/// returned verbatim, so same-object copies stay bit-identical instead of
/// picking up a world-space round trip.
pub fn apply_position(target_transform: Mat4, source: &SourceAttribs) -> Vec3 {
    if target_transform == source.transform {
        source.local_position
    } else {
        target_transform
            .inverse()
            .transform_point3(source.world_position)
    }
}

/// Move every target onto the active vertex's world position.
pub fn copy_transforms(
    contexts: &mut [MeshContext<'_>],
    targets: &[VertexRef],
    source: &SourceAttribs,
) {
    for target in targets {
        let context = &mut contexts[target.context];
        context.edit.positions[target.vertex as usize] =
            apply_position(context.transform, source);
    }
}

/// Overwrite every target's vertex normal with the active vertex's normal.
///
/// Normals are copied as-is, without any re-expression between object
/// spaces.
pub fn copy_normals(
    contexts: &mut [MeshContext<'_>],
    targets: &[VertexRef],
    source: &SourceAttribs,
) {
    for target in targets {
        contexts[target.context].edit.normals[target.vertex as usize] = source.normal;
    }
}

/// Shift every target's shape-key points by the active vertex's per-layer
/// delta. Only meaningful within a single context.
///
/// The delta for every layer is measured against the active vertex's point
/// in the first layer, not against each layer's own rest state; see the
/// pinning test before changing this.
pub fn copy_shape_keys(
    context: &mut MeshContext<'_>,
    targets: &[VertexRef],
    source: &SourceAttribs,
) {
    let Some(&basis) = source.shape_key_points.first() else {
        return;
    };
    for (li, key) in context.data.shape_keys.iter_mut().enumerate() {
        let diff = source.shape_key_points[li] - basis;
        for target in targets {
            if let Some(point) = key.points.get_mut(target.vertex as usize) {
                *point += diff;
            }
        }
    }
}

/// Skin-weight propagation. Not implemented; logs and leaves all weights
/// untouched. The signature is the stable interface for a real pass later.
pub fn copy_weights(
    _contexts: &mut [MeshContext<'_>],
    targets: &[VertexRef],
    _source: &SourceAttribs,
) {
    info!(
        "Weight copy is not implemented yet; {} targets left unchanged",
        targets.len()
    );
}
