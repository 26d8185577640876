//! Multi-object edit sessions.
//!
//! A session holds every object sharing the current edit mode, each with its
//! own world transform, plus which object is active. Resolving a session
//! yields one `MeshContext` per eligible mesh, with the active object's
//! context always first.

use bevy::prelude::*;

use crate::copy_attributes::CopyError;
use crate::edit_mesh::{EditMesh, MeshData};

/// What a session object is. Only mesh objects are editable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectKind {
    #[default]
    Mesh,
    Camera,
    Light,
    Empty,
}

/// One object participating in the session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionObject {
    pub name: String,
    pub kind: ObjectKind,
    pub in_edit_mode: bool,
    /// Object-to-world transform.
    pub transform: Mat4,
    /// Mesh custom data. `None` for objects with no mesh data attached.
    pub data: Option<MeshData>,
    /// Live editable view of the mesh. `None` when no view is synced.
    pub edit: Option<EditMesh>,
}

impl SessionObject {
    /// A mesh object in edit mode with default custom data.
    pub fn mesh(name: impl Into<String>, transform: Mat4, edit: EditMesh) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::Mesh,
            in_edit_mode: true,
            transform,
            data: Some(MeshData::default()),
            edit: Some(edit),
        }
    }
}

/// All objects sharing the current edit session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditSession {
    pub objects: Vec<SessionObject>,
    /// Index of the active object, if any.
    pub active: Option<usize>,
}

/// An eligible mesh resolved for one operator invocation: the live edit
/// view, the mesh custom data, and the owning object's world transform.
#[derive(Debug)]
pub struct MeshContext<'a> {
    pub name: &'a str,
    pub data: &'a mut MeshData,
    pub edit: &'a mut EditMesh,
    pub transform: Mat4,
    pub is_active: bool,
}

/// Resolve the session into per-mesh contexts, active context first.
///
/// Objects that are not meshes, not in edit mode, have no mesh data, no
/// edit view, or no vertices are skipped. The active object must survive
/// the filter; otherwise there is nothing to copy from.
pub fn resolve_contexts(session: &mut EditSession) -> Result<Vec<MeshContext<'_>>, CopyError> {
    let active = session.active.ok_or(CopyError::NoObjectSelected)?;
    if active >= session.objects.len() {
        return Err(CopyError::NoObjectSelected);
    }

    let mut contexts = Vec::new();
    for (index, object) in session.objects.iter_mut().enumerate() {
        if object.kind != ObjectKind::Mesh || !object.in_edit_mode {
            continue;
        }
        let Some(data) = object.data.as_mut() else {
            continue;
        };
        let Some(edit) = object.edit.as_mut() else {
            debug!("Skipping `{}`: editable mesh view unavailable", object.name);
            continue;
        };
        if edit.positions.is_empty() {
            continue;
        }
        contexts.push(MeshContext {
            name: object.name.as_str(),
            data,
            edit,
            transform: object.transform,
            is_active: index == active,
        });
    }

    if contexts.is_empty() {
        return Err(CopyError::NoEligibleMeshes);
    }
    contexts.sort_by_key(|context| !context.is_active);
    if !contexts[0].is_active {
        return Err(CopyError::NoEligibleMeshes);
    }
    Ok(contexts)
}
