//! # Bevy Vertex Copy
//!
//! Copy attributes of the active vertex onto every other selected vertex,
//! across all mesh objects sharing an edit session.
//!
//! ## Quick Start
//!
//! Add the plugin to your Bevy app and queue a request once a session is
//! populated:
//!
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_vertex_copy::{CopyOptions, CopyVertexAttributes, VertexCopyPlugin};
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(VertexCopyPlugin)
//!         .run();
//! }
//!
//! fn align_selected(mut requests: MessageWriter<CopyVertexAttributes>) {
//!     requests.write(CopyVertexAttributes {
//!         options: CopyOptions {
//!             transform: true,
//!             normals: true,
//!             ..default()
//!         },
//!     });
//! }
//! ```
//!
//! ## How a copy works
//!
//! The source is the *active* vertex: the most recent vertex in the active
//! object's selection history. Every other selected vertex, in every mesh
//! of the session, is a target:
//!
//! - **Transform**: targets move onto the source's world position,
//!   converted into each object's local space.
//! - **Normals**: targets take the source's vertex normal, and each mesh's
//!   split-normal data is rebuilt around the change.
//! - **Shape keys**: targets shift by the source's per-layer delta
//!   (single-mesh sessions only).
//! - **Weights**: reserved; currently a logged no-op.
//!
//! The operator can also be called directly on an [`EditSession`] without
//! the plugin, via [`copy_vertex_attributes`].

pub mod convert;
pub mod copy_attributes;
pub mod edit_mesh;
pub mod normals;
pub mod plugin;
pub mod propagate;
pub mod select;
pub mod session;

// Re-export the plugin surface
pub use plugin::{CopyVertexAttributes, EditSessionState, VertexCopyPlugin};

// Re-export the operator and its types
pub use copy_attributes::{copy_vertex_attributes, CopyError, CopyOptions, CopyReport};

// Re-export the session model
pub use edit_mesh::{EditMesh, ElementRef, MeshData, ShapeKey, VertexId};
pub use session::{EditSession, MeshContext, ObjectKind, SessionObject};

// Re-export addressing used in reports and passes
pub use select::VertexRef;
