//! Camera plugin: a 2D camera that eases toward the player.
//!
//! Render-only; headless apps leave it out.
//!
//! A system cannot hold `Query<&Transform>` and `Query<&mut Transform>` unless
//! Bevy can prove they are disjoint, so both queries carry `Without<...>`.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy::transform::TransformSystems;

use crate::common::state::GameState;
use crate::plugins::player::Player;

#[derive(Component)]
pub struct MainCamera {
    pub responsiveness: f32,
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_camera).add_systems(
        PostUpdate,
        follow_player
            .before(TransformSystems::Propagate)
            .run_if(in_state(GameState::InGame)),
    );
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera { responsiveness: 5.0 },
        Transform::from_xyz(0.0, 0.0, 999.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn follow_player(
    time: Res<Time>,
    player: Option<Single<&Transform, (With<Player>, Without<MainCamera>)>>,
    camera: Option<Single<(&mut Transform, &MainCamera), Without<Player>>>,
) {
    let (Some(player), Some(camera)) = (player, camera) else {
        return;
    };
    let (mut tf_cam, main_cam) = camera.into_inner();

    let dt = time.delta_secs();
    let alpha = 1.0 - (-main_cam.responsiveness * dt).exp();

    let target = player.translation.truncate();
    let current = tf_cam.translation.truncate();
    let eased = current + (target - current) * alpha;
    tf_cam.translation.x = eased.x;
    tf_cam.translation.y = eased.y;
}
