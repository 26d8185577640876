//! The copy-vertex-attributes operator.
//!
//! One entry point, [`copy_vertex_attributes`], runs the whole flow:
//! resolve the session, find the active vertex and the targets, validate,
//! capture the source attributes, then run the enabled propagation passes.
//! Every check that can fail happens before the first write, so an `Err`
//! always means the session was left exactly as it was.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::normals::{finalize_normals, prep_meshes};
use crate::propagate::{
    capture_source, copy_normals, copy_shape_keys, copy_transforms, copy_weights,
};
use crate::select::{collect_targets, find_active_vertex, VertexRef};
use crate::session::{resolve_contexts, EditSession};

/// Which attributes to propagate. Everything is off by default; callers
/// opt in per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyOptions {
    pub transform: bool,
    pub normals: bool,
    pub shape_keys: bool,
    pub weights: bool,
}

/// Outcome of a successful copy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CopyReport {
    /// Number of vertices in the target set for this invocation.
    pub targets_updated: usize,
    /// Non-fatal condition the caller should surface to the user.
    pub warning: Option<String>,
}

/// Fatal precondition failures. All of them are raised before any mesh is
/// touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CopyError {
    #[error("no active object in the edit session")]
    NoObjectSelected,
    #[error("no mesh object in edit mode with mesh data")]
    NoEligibleMeshes,
    #[error("selection history holds no vertex to copy from")]
    NoActiveVertex,
    #[error("select at least one vertex besides the active one")]
    InsufficientSelection,
    #[error("mesh `{0}` has no vertex normal storage")]
    NormalsUnsupported(String),
}

/// Copy attributes of the active vertex onto every other selected vertex,
/// across all meshes in the session.
///
/// The active vertex is the most recent vertex in the active object's
/// selection history; positions are carried over through world space so the
/// targets land on the same world-space point regardless of each object's
/// transform.
pub fn copy_vertex_attributes(
    session: &mut EditSession,
    options: &CopyOptions,
) -> Result<CopyReport, CopyError> {
    let mut contexts = resolve_contexts(session)?;

    let active_vertex = find_active_vertex(&contexts[0]).ok_or(CopyError::NoActiveVertex)?;
    let active = VertexRef {
        context: 0,
        vertex: active_vertex,
    };
    let targets = collect_targets(&contexts, active);
    if targets.is_empty() {
        return Err(CopyError::InsufficientSelection);
    }
    if options.normals {
        for context in &contexts {
            if !context.edit.has_vertex_normals() {
                return Err(CopyError::NormalsUnsupported(context.name.to_string()));
            }
        }
    }

    let source = capture_source(&contexts[0], active_vertex);

    if options.normals {
        prep_meshes(&mut contexts);
    }
    if options.transform {
        copy_transforms(&mut contexts, &targets, &source);
    }
    if options.normals {
        copy_normals(&mut contexts, &targets, &source);
    }

    let mut warning = None;
    if options.shape_keys {
        if let [context] = contexts.as_mut_slice() {
            copy_shape_keys(context, &targets, &source);
        } else {
            warning = Some(format!(
                "shape keys skipped: the selection spans {} meshes, shape-key copy supports one",
                contexts.len()
            ));
        }
    }
    if options.weights {
        copy_weights(&mut contexts, &targets, &source);
    }
    if options.normals {
        finalize_normals(&mut contexts, &source);
    }

    info!(
        "Copied vertex attributes from `{}` to {} vertices",
        contexts[0].name,
        targets.len()
    );
    Ok(CopyReport {
        targets_updated: targets.len(),
        warning,
    })
}
