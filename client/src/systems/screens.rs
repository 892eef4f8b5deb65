use bevy::{
    asset::LoadedFolder,
    prelude::*,
    scene::{SceneInstance, SceneSpawner},
};

use room_common::{config::ExperienceConfig, cutscene::loop_frame};

use crate::{
    constants::{SCREEN_FOLDER, SCREEN_NAMES},
    markers::RoomMarker,
    resources::{folder_failed, ordered_frames},
};

// ============================================================================
// Components
// ============================================================================

// A room mesh whose base color cycles through a folder of frames. The
// material is a private copy so other meshes sharing it stay untouched.
#[derive(Component)]
pub struct AmbientScreen {
    pub folder: Handle<LoadedFolder>,
    pub frames: Vec<Handle<Image>>,
    pub material: Handle<StandardMaterial>,
    pub shown: Option<u32>,
}

fn screen_folder(name: &str) -> String {
    format!("{SCREEN_FOLDER}/{name}loop")
}

// ============================================================================
// Ambient Screen Systems
// ============================================================================

// Give each named screen in the room its own material and start loading its
// frames. Runs until the room scene is ready, then never again.
pub fn screen_attach_system(
    mut commands: Commands,
    mut attached: Local<bool>,
    asset_server: Res<AssetServer>,
    scene_spawner: Res<SceneSpawner>,
    rooms: Query<(Entity, &SceneInstance), With<RoomMarker>>,
    children: Query<&Children>,
    names: Query<&Name>,
    meshes: Query<&MeshMaterial3d<StandardMaterial>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if *attached {
        return;
    }
    let Some((room, instance)) = rooms.iter().next() else {
        return;
    };
    if !scene_spawner.instance_is_ready(**instance) {
        return;
    }
    *attached = true;

    let mut count = 0;
    for entity in children.iter_descendants(room) {
        let Ok(name) = names.get(entity) else {
            continue;
        };
        if !SCREEN_NAMES.contains(&name.as_str()) {
            continue;
        }

        let folder = asset_server.load_folder(screen_folder(name.as_str()));
        for part in std::iter::once(entity).chain(children.iter_descendants(entity)) {
            let Ok(mesh_material) = meshes.get(part) else {
                continue;
            };
            let Some(material) = materials.get(&mesh_material.0).cloned() else {
                continue;
            };
            let material = materials.add(material);
            commands.entity(part).insert((
                MeshMaterial3d(material.clone()),
                AmbientScreen {
                    folder: folder.clone(),
                    frames: Vec::new(),
                    material,
                    shown: None,
                },
            ));
            count += 1;
        }
    }

    if count == 0 {
        warn!("room has no ambient screens named {SCREEN_NAMES:?}");
    } else {
        debug!("attached {count} ambient screen meshes");
    }
}

// Show the current frame of every screen's loop
pub fn screen_playback_system(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<ExperienceConfig>,
    asset_server: Res<AssetServer>,
    loaded: Res<Assets<LoadedFolder>>,
    mut screens: Query<(Entity, &mut AmbientScreen)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (entity, mut screen) in &mut screens {
        if screen.frames.is_empty() {
            let ready = asset_server.is_loaded_with_dependencies(&screen.folder);
            if ready && let Some(folder) = loaded.get(&screen.folder) {
                screen.frames = ordered_frames(folder);
            }
            if screen.frames.is_empty() {
                if ready || folder_failed(&asset_server, &screen.folder) {
                    // Leave the mesh with its original texture
                    warn!("no frames for ambient screen {entity}");
                    commands.entity(entity).remove::<AmbientScreen>();
                }
                continue;
            }
        }

        let Some(frame) = loop_frame(time.elapsed_secs(), config.clip_fps, screen.frames.len() as u32) else {
            continue;
        };
        if screen.shown == Some(frame) {
            continue;
        }
        screen.shown = Some(frame);

        let texture = screen.frames.get(frame as usize).cloned();
        if let Some(material) = materials.get_mut(&screen.material) {
            material.base_color_texture = texture;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_folders_follow_mesh_names() {
        assert_eq!(screen_folder("news1"), "backgroundvideos/news1loop");
        assert_eq!(screen_folder("wallpaper"), "backgroundvideos/wallpaperloop");
    }
}
