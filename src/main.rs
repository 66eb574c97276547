// Main
mod error;
mod script;
mod sections;
mod sequencer;
mod story;
mod typewriter;
mod valentine;
mod widgets;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use sections::Sections;
use story::StoryPlugin;
use valentine::ValentinePlugin;
use widgets::{DUSK, WidgetsPlugin};

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Sunset Mountain Tales".into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    filter: "wgpu=error,naga=warn,sunset_tales=debug".into(),
                    ..default()
                }),
        )
        .insert_resource(ClearColor(DUSK))
        .init_state::<Sections>()
        .add_plugins((WidgetsPlugin, StoryPlugin, ValentinePlugin))
        .add_systems(Startup, spawn_camera)
        .run();
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
