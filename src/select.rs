//! Locating the copy source and the copy targets in resolved contexts.

use crate::edit_mesh::{ElementRef, VertexId};
use crate::session::MeshContext;

/// A vertex addressed together with the context that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexRef {
    /// Index into the resolved context list.
    pub context: usize,
    pub vertex: VertexId,
}

/// Most recent vertex entry in the active context's selection history.
///
/// Edge and face entries are passed over, as are entries referencing
/// vertices that no longer exist. Only the active context's history is
/// consulted: selecting a vertex last in a non-active object does not make
/// it the source.
pub fn find_active_vertex(active: &MeshContext<'_>) -> Option<VertexId> {
    active.edit.history.iter().rev().find_map(|entry| match entry {
        ElementRef::Vertex(v) if (*v as usize) < active.edit.vertex_count() => Some(*v),
        _ => None,
    })
}

/// Every selected vertex of every context, in context order then vertex
/// storage order, leaving out the active vertex itself.
pub fn collect_targets(contexts: &[MeshContext<'_>], active: VertexRef) -> Vec<VertexRef> {
    let mut targets = Vec::new();
    for (ci, context) in contexts.iter().enumerate() {
        for vi in 0..context.edit.vertex_count() as u32 {
            let candidate = VertexRef {
                context: ci,
                vertex: vi,
            };
            if candidate != active && context.edit.selection.contains(&vi) {
                targets.push(candidate);
            }
        }
    }
    targets
}
