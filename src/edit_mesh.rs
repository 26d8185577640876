//! In-memory model of a mesh under editing.
//!
//! `EditMesh` is the live editable view: vertex storage plus selection
//! state and history. `MeshData` carries the per-mesh custom data that
//! outlives the view, shape-key layers and the derived per-face-corner
//! (split) normal block. Split normals are always rebuilt wholesale from a
//! per-vertex sequence; there is no per-corner patching.

use bevy::prelude::*;
use std::collections::HashSet;

/// Index of a vertex in the mesh's storage order.
pub type VertexId = u32;

/// An entry in a mesh's selection history, most recent last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRef {
    Vertex(VertexId),
    Edge(u32),
    Face(u32),
}

/// Live editable vertex and face storage for a mesh in edit mode.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditMesh {
    pub positions: Vec<Vec3>,
    /// Per-vertex normals. Empty when the mesh has no normal storage.
    pub normals: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
    /// Vertices currently marked selected.
    pub selection: HashSet<VertexId>,
    /// Selection history across all element kinds.
    pub history: Vec<ElementRef>,
}

impl EditMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Whether this mesh carries writable per-vertex normal storage.
    pub fn has_vertex_normals(&self) -> bool {
        !self.normals.is_empty() && self.normals.len() == self.positions.len()
    }

    /// Mark a vertex selected and record it in the selection history.
    pub fn select_vertex(&mut self, vertex: VertexId) {
        self.selection.insert(vertex);
        self.history.push(ElementRef::Vertex(vertex));
    }

    /// Geometric normal of a triangle.
    pub fn face_normal(&self, face: usize) -> Vec3 {
        let [a, b, c] = self.triangles[face];
        let v0 = self.positions[a as usize];
        let v1 = self.positions[b as usize];
        let v2 = self.positions[c as usize];
        (v1 - v0).cross(v2 - v0).normalize_or_zero()
    }
}

/// A named per-vertex offset channel (morph-target style deformation).
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeKey {
    pub name: String,
    /// One point per vertex, in vertex storage order.
    pub points: Vec<Vec3>,
}

/// Per-mesh custom data read and written alongside the edit view.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub shape_keys: Vec<ShapeKey>,
    /// Split normals, three per triangle, in face-corner order.
    pub corner_normals: Vec<Vec3>,
    pub auto_smooth: bool,
    /// Angle threshold in degrees for corner splitting during recalculation.
    pub auto_smooth_angle: f32,
}

impl Default for MeshData {
    fn default() -> Self {
        Self {
            shape_keys: Vec::new(),
            corner_normals: Vec::new(),
            auto_smooth: false,
            auto_smooth_angle: 30.0,
        }
    }
}

impl MeshData {
    /// Append a shape-key layer. Points are per vertex, storage order.
    pub fn add_shape_key(&mut self, name: impl Into<String>, points: Vec<Vec3>) {
        self.shape_keys.push(ShapeKey {
            name: name.into(),
            points,
        });
    }

    /// Recalculate the corner-normal block from the mesh's current geometry.
    ///
    /// A corner takes its vertex's normal, except that with auto-smooth
    /// enabled a corner whose face normal deviates from the vertex normal by
    /// more than `auto_smooth_angle` is split hard onto the face normal.
    /// Meshes without vertex normals get face normals throughout.
    pub fn recalculate_corner_normals(&mut self, edit: &EditMesh) {
        let threshold_cos = self.auto_smooth_angle.to_radians().cos();
        self.corner_normals.clear();
        self.corner_normals.reserve(edit.triangles.len() * 3);

        for (fi, tri) in edit.triangles.iter().enumerate() {
            let face_normal = edit.face_normal(fi);
            for &vi in tri {
                let corner = match edit.normals.get(vi as usize) {
                    Some(&n) if !self.auto_smooth || face_normal.dot(n) >= threshold_cos => n,
                    _ => face_normal,
                };
                self.corner_normals.push(corner);
            }
        }
    }

    /// Write per-vertex normals into the existing corner-normal block.
    ///
    /// Fills in place: the block must have been sized by
    /// `recalculate_corner_normals` first, or nothing is written.
    pub fn set_corner_normals_from_vertices(&mut self, edit: &EditMesh, per_vertex: &[Vec3]) {
        let corners = edit.triangles.iter().flatten();
        for (corner_normal, &vi) in self.corner_normals.iter_mut().zip(corners) {
            if let Some(&n) = per_vertex.get(vi as usize) {
                *corner_normal = n;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_triangle() -> EditMesh {
        EditMesh {
            positions: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            normals: vec![Vec3::Z; 3],
            triangles: vec![[0, 1, 2]],
            ..default()
        }
    }

    #[test]
    fn select_vertex_updates_selection_and_history() {
        let mut mesh = flat_triangle();
        mesh.select_vertex(2);
        mesh.select_vertex(0);

        assert!(mesh.selection.contains(&2));
        assert!(mesh.selection.contains(&0));
        assert_eq!(
            mesh.history,
            vec![ElementRef::Vertex(2), ElementRef::Vertex(0)]
        );
    }

    #[test]
    fn normal_storage_detection() {
        let mut mesh = flat_triangle();
        assert!(mesh.has_vertex_normals());

        mesh.normals.clear();
        assert!(!mesh.has_vertex_normals());

        // A half-filled normal array is not usable storage either.
        mesh.normals = vec![Vec3::Z; 2];
        assert!(!mesh.has_vertex_normals());
    }

    #[test]
    fn corner_recalculation_uses_vertex_normals_when_smooth() {
        let mut mesh = flat_triangle();
        mesh.normals = vec![Vec3::X, Vec3::Y, Vec3::Z];
        let mut data = MeshData::default();

        data.recalculate_corner_normals(&mesh);

        assert_eq!(data.corner_normals, vec![Vec3::X, Vec3::Y, Vec3::Z]);
    }

    #[test]
    fn corner_recalculation_splits_hard_corners_with_auto_smooth() {
        let mut mesh = flat_triangle();
        // Vertex normals 90 degrees off the +Z face normal.
        mesh.normals = vec![Vec3::X; 3];
        let mut data = MeshData {
            auto_smooth: true,
            auto_smooth_angle: 30.0,
            ..default()
        };

        data.recalculate_corner_normals(&mesh);

        assert_eq!(data.corner_normals, vec![Vec3::Z; 3]);

        // Without auto-smooth the deviant vertex normals pass through.
        data.auto_smooth = false;
        data.recalculate_corner_normals(&mesh);
        assert_eq!(data.corner_normals, vec![Vec3::X; 3]);
    }

    #[test]
    fn corner_recalculation_without_normal_storage_uses_face_normals() {
        let mut mesh = flat_triangle();
        mesh.normals.clear();
        let mut data = MeshData::default();

        data.recalculate_corner_normals(&mesh);

        assert_eq!(data.corner_normals, vec![Vec3::Z; 3]);
    }

    #[test]
    fn corner_write_in_maps_vertices_to_corners() {
        let mesh = flat_triangle();
        let mut data = MeshData::default();
        data.recalculate_corner_normals(&mesh);

        data.set_corner_normals_from_vertices(&mesh, &[Vec3::X, Vec3::Y, Vec3::NEG_Z]);

        assert_eq!(data.corner_normals, vec![Vec3::X, Vec3::Y, Vec3::NEG_Z]);
    }

    #[test]
    fn corner_write_in_requires_sized_block() {
        let mesh = flat_triangle();
        let mut data = MeshData::default();

        // No recalculation has happened, so there is nowhere to write.
        data.set_corner_normals_from_vertices(&mesh, &[Vec3::X, Vec3::Y, Vec3::Z]);

        assert!(data.corner_normals.is_empty());
    }
}
