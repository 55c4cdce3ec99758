//! minimal bootstrap for the 2D block sandbox
//!
//! Loads `tile_sandbox.toml` (or defaults), then hands the world to bevy.
//! Works with **Bevy 0.15**.

mod shell;

use std::path::Path;

use bevy::diagnostic::{
    EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin,
    LogDiagnosticsPlugin,
};
use bevy::input::ButtonInput;
use bevy::prelude::*;
use bevy::window::{MonitorSelection, PrimaryWindow, WindowMode};

use tile_sandbox::{GameConfig, TerrainGenerator};

use shell::camera::camera_follow_system;
use shell::hud::{
    inventory_slots_system, playing, setup_hud, toggle_inventory_system,
    InventoryOpen,
};
use shell::input::{
    gather_input_system, quit_system, simulate_tick_system, PendingInput,
};
use shell::terrain::{
    generate_world_and_player, redraw_changed_tiles_system, rgb_color,
    sync_player_sprite_system, Settings, Terrain,
};

const CONFIG_PATH: &str = "tile_sandbox.toml";

/* ------------------------------------------------------------------------ */
/* camera                                                                   */
/* ------------------------------------------------------------------------ */
fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/* ------------------------------------------------------------------------ */
/* F11 borderless‑fullscreen toggle                                         */
/* ------------------------------------------------------------------------ */
fn toggle_fullscreen(
    keys: Res<ButtonInput<KeyCode>>,
    mut window_q: Query<&mut Window, With<PrimaryWindow>>,
) {
    if keys.just_pressed(KeyCode::F11) {
        let Ok(mut window) = window_q.get_single_mut() else { return };
        window.mode = match window.mode {
            WindowMode::Windowed => {
                WindowMode::BorderlessFullscreen(MonitorSelection::Primary)
            }
            _ => WindowMode::Windowed,
        };
    }
}

/* ------------------------------------------------------------------------ */
/* main                                                                     */
/* ------------------------------------------------------------------------ */
fn main() -> AppExit {
    /* settings are checked before any window opens ----------------------- */
    let config = match GameConfig::load_or_default(Path::new(CONFIG_PATH)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{CONFIG_PATH}: {err}");
            return AppExit::error();
        }
    };
    let generator = match TerrainGenerator::from_config(&config) {
        Ok(generator) => generator,
        Err(err) => {
            eprintln!("{CONFIG_PATH}: {err}");
            return AppExit::error();
        }
    };

    let resolution = (
        config.world.pixel_width() as f32,
        config.world.pixel_height() as f32,
    );
    let background = rgb_color(config.palette.background());
    let tick = Time::<Fixed>::from_hz(config.tick_hz);

    App::new()
        /* diagnostics ----------------------------------------------------- */
        .add_plugins((
            LogDiagnosticsPlugin::default(),
            FrameTimeDiagnosticsPlugin::default(),
            EntityCountDiagnosticsPlugin::default(),
        ))

        /* bevy core ------------------------------------------------------- */
        .insert_resource(ClearColor(background))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Minecraft 2D".into(),
                resolution: resolution.into(),
                mode: WindowMode::Windowed,
                ..default()
            }),
            ..default()
        }))

        /* game resources -------------------------------------------------- */
        .insert_resource(tick)
        .insert_resource(Settings { config, generator })
        .init_resource::<PendingInput>()
        .init_resource::<InventoryOpen>()

        /* startup systems ------------------------------------------------- */
        .add_systems(
            Startup,
            (setup_camera, generate_world_and_player, setup_hud),
        )

        /* fixed‑rate simulation ------------------------------------------- */
        .add_systems(
            FixedUpdate,
            simulate_tick_system
                .run_if(resource_exists::<Terrain>)
                .run_if(playing),
        )

        /* frame‑update systems ------------------------------------------- */
        .add_systems(
            Update,
            (
                /* player -------------------------------------------------- */
                gather_input_system.run_if(playing), // A/D, Space, LMB
                sync_player_sprite_system,           // rect → sprite

                /* world --------------------------------------------------- */
                redraw_changed_tiles_system,         // mined cells

                /* hud ----------------------------------------------------- */
                inventory_slots_system.after(toggle_inventory_system),
            )
                .run_if(resource_exists::<Terrain>),
        )
        .add_systems(
            Update,
            (
                toggle_inventory_system, // P
                quit_system,             // Q
                toggle_fullscreen,
            ),
        )

        /* post‑update (camera) -------------------------------------------- */
        .add_systems(
            PostUpdate,
            camera_follow_system.run_if(resource_exists::<Terrain>),
        )
        .run()
}
