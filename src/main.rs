use asteroid_shooter::config::GameConfig;
use asteroid_shooter::rendering::RenderingPlugin;
use asteroid_shooter::simulation::SimulationPlugin;
use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier2d::prelude::*;

fn main() {
    // Resolved before the app exists so the window matches the world size.
    let config = GameConfig::load_or_default();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Asteroid Shooter".into(),
                resolution: WindowResolution::new(
                    config.world_width as u32,
                    config.world_height as u32,
                ),
                resizable: false,
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(config)
        // One world unit per pixel: speeds and radii are given in pixels.
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(1.0))
        .add_plugins(SimulationPlugin)
        .add_plugins(RenderingPlugin)
        .run();
}
