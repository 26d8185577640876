//! Bevy plugin surface: the operator request message, the session resource,
//! and the handler system that runs the operator and reports the outcome.

use bevy::prelude::*;

use crate::copy_attributes::{copy_vertex_attributes, CopyOptions};
use crate::session::EditSession;

/// Request to run the copy operator with the given options.
#[derive(Message, Debug, Clone, Copy)]
pub struct CopyVertexAttributes {
    pub options: CopyOptions,
}

/// The live multi-object edit session, if one is open. Hosts populate this
/// when entering edit mode and take it back out when leaving.
#[derive(Resource, Debug, Default)]
pub struct EditSessionState {
    pub session: Option<EditSession>,
}

pub struct VertexCopyPlugin;

impl Plugin for VertexCopyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EditSessionState>()
            .add_message::<CopyVertexAttributes>()
            .add_systems(Update, handle_copy_requests);
    }
}

/// Run the operator for each queued request.
///
/// Fatal errors cancel the request and leave the session untouched;
/// warnings are logged and the copy still counts as done.
fn handle_copy_requests(
    mut requests: MessageReader<CopyVertexAttributes>,
    mut state: ResMut<EditSessionState>,
) {
    for request in requests.read() {
        let Some(session) = state.session.as_mut() else {
            warn!("Copy vertex attributes: no edit session open");
            continue;
        };
        match copy_vertex_attributes(session, &request.options) {
            Ok(report) => {
                if let Some(warning) = &report.warning {
                    warn!("{warning}");
                }
            }
            Err(error) => warn!("Copy vertex attributes cancelled: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit_mesh::EditMesh;
    use crate::session::SessionObject;

    fn session_with_two_selected() -> EditSession {
        let mut edit = EditMesh {
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            normals: vec![Vec3::Z; 3],
            triangles: vec![[0, 1, 2]],
            ..default()
        };
        edit.select_vertex(1);
        edit.select_vertex(0);
        EditSession {
            objects: vec![SessionObject::mesh(
                "solo",
                Mat4::from_translation(Vec3::new(0.0, 0.0, 3.0)),
                edit,
            )],
            active: Some(0),
        }
    }

    #[test]
    fn queued_request_runs_the_operator() {
        let mut app = App::new();
        app.add_plugins(VertexCopyPlugin);
        app.world_mut().resource_mut::<EditSessionState>().session =
            Some(session_with_two_selected());

        app.world_mut().write_message(CopyVertexAttributes {
            options: CopyOptions {
                transform: true,
                ..default()
            },
        });
        app.update();

        let state = app.world().resource::<EditSessionState>();
        let session = state.session.as_ref().unwrap();
        let edit = session.objects[0].edit.as_ref().unwrap();
        assert_eq!(edit.positions[1], Vec3::ZERO);
    }

    #[test]
    fn request_without_a_session_is_ignored() {
        let mut app = App::new();
        app.add_plugins(VertexCopyPlugin);

        app.world_mut().write_message(CopyVertexAttributes {
            options: CopyOptions::default(),
        });
        app.update();

        assert!(app
            .world()
            .resource::<EditSessionState>()
            .session
            .is_none());
    }
}
