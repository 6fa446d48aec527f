use bevy::prelude::*;
use bevy::log::info;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::math::primitives::Circle;
use bevy::window::PrimaryWindow;

use crate::simulation::params::Arena;
use crate::simulation::render::{render, DrawList};
use crate::simulation::scenario::Scenario;
use crate::simulation::states::{NVec2, Palette};

/// Component tagging each circle with its body index into Scenario.system.bodies()
#[derive(Component)]
struct BodyIndex(pub usize);

/// Draw list filled by `render` every frame and consumed by the sync system
#[derive(Resource, Default)]
struct FrameDrawList(DrawList);

/// Number keys 1..7 pick the palette entry at the same position
const COLOR_KEYS: [KeyCode; 7] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
];

const BACKGROUND: Color = Color::srgb(0.08, 0.08, 0.10);

/// Open a window the size of the arena and run physics at `hz` steps per second
pub fn run_2d(scenario: Scenario, hz: f64) {
    let (w, h) = (scenario.arena.width as f32, scenario.arena.height as f32);

    App::new()
        .insert_resource(Time::<Fixed>::from_hz(hz))
        .insert_resource(ClearColor(BACKGROUND))
        .insert_resource(scenario)
        .init_resource::<FrameDrawList>()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "ballsim".into(),
                resolution: (w, h).into(),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .add_systems(Startup, setup_bodies_system)
        .add_systems(FixedUpdate, physics_step_system)
        .add_systems(
            Update,
            (pointer_input_system, color_keys_system, render_system, sync_bodies_system).chain(),
        )
        .run();
}

fn setup_bodies_system(mut commands: Commands, scenario: Res<Scenario>, mut meshes: ResMut<Assets<Mesh>>, mut materials: ResMut<Assets<ColorMaterial>>) {
    info!("run_2d: {} bodies in {}x{} arena", scenario.system.len(), scenario.arena.width, scenario.arena.height);

    commands.spawn(Camera2dBundle::default());

    // Unit circle shared by every body, scaled by radius in the transform
    let unit = Mesh2dHandle(meshes.add(Circle::new(1.0)));

    for (i, body) in scenario.system.bodies().iter().enumerate() {
        let p = to_world(&scenario.arena, body.x);

        commands.spawn((
            MaterialMesh2dBundle {
                mesh: unit.clone(),
                material: materials.add(ColorMaterial::from(palette_color(body.color()))),
                transform: Transform::from_xyz(p.x, p.y, 0.0).with_scale(Vec3::splat(body.radius() as f32)),
                ..Default::default()
            },
            BodyIndex(i),
        ));
    }
}

fn physics_step_system(mut scenario: ResMut<Scenario>) {
    scenario.step();
}

/// Left mouse button drives the pointer down / move / up transitions
fn pointer_input_system(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut scenario: ResMut<Scenario>,
) {
    if buttons.just_released(MouseButton::Left) {
        scenario.pointer_up();
        return;
    }
    if !buttons.pressed(MouseButton::Left) {
        return;
    }

    let Ok(window) = windows.get_single() else { return };
    let Ok((camera, camera_transform)) = cameras.get_single() else { return };
    let Some(cursor) = window.cursor_position() else { return };
    let Some(world) = camera.viewport_to_world_2d(camera_transform, cursor) else { return };
    let p = to_arena(&scenario.arena, world);

    if buttons.just_pressed(MouseButton::Left) {
        scenario.pointer_down(p);
    } else {
        scenario.pointer_move(p);
    }
}

fn color_keys_system(keys: Res<ButtonInput<KeyCode>>, mut scenario: ResMut<Scenario>) {
    for (i, key) in COLOR_KEYS.iter().enumerate() {
        if keys.just_pressed(*key) {
            if let Some(color) = Palette::from_index(i) {
                info!("selected color {color:?}");
                scenario.colors.select(color);
            }
        }
    }
}

fn render_system(scenario: Res<Scenario>, mut frame: ResMut<FrameDrawList>) {
    frame.0.clear();
    render(&scenario.system, &mut frame.0);
}

fn sync_bodies_system(
    scenario: Res<Scenario>,
    frame: Res<FrameDrawList>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut query: Query<(&BodyIndex, &mut Transform, &Handle<ColorMaterial>)>,
) {
    for (BodyIndex(i), mut transform, material) in &mut query {
        let Some(cmd) = frame.0.commands.get(*i) else { continue };

        let p = to_world(&scenario.arena, cmd.center);
        transform.translation.x = p.x;
        transform.translation.y = p.y;
        transform.scale = Vec3::splat(cmd.radius as f32);

        let color = palette_color(cmd.color);
        if materials.get(material).map(|m| m.color) != Some(color) {
            if let Some(m) = materials.get_mut(material) {
                m.color = color;
            }
        }
    }
}

fn palette_color(c: Palette) -> Color {
    let (r, g, b) = c.srgb();
    Color::srgb(r, g, b)
}

/// Arena (origin top-left, y down) -> world (origin at center, y up)
fn to_world(arena: &Arena, p: NVec2) -> Vec2 {
    Vec2::new(
        (p.x - 0.5 * arena.width) as f32,
        (0.5 * arena.height - p.y) as f32,
    )
}

/// World -> arena, inverse of `to_world`
fn to_arena(arena: &Arena, w: Vec2) -> NVec2 {
    NVec2::new(
        w.x as f64 + 0.5 * arena.width,
        0.5 * arena.height - w.y as f64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_corners_map_to_window_corners() {
        let arena = Arena::default();
        assert_eq!(to_world(&arena, NVec2::new(0.0, 0.0)), Vec2::new(-400.0, 200.0));
        assert_eq!(to_world(&arena, NVec2::new(800.0, 400.0)), Vec2::new(400.0, -200.0));
        assert_eq!(to_arena(&arena, Vec2::new(-400.0, 200.0)), NVec2::new(0.0, 0.0));
    }
}
