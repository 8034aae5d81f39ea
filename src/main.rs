// ./src/main.rs
use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use metaball_mask::debug::{
    ui::blob_control_ui_system,
    visualization::{
        overlay::draw_blob_overlay_system,
        svg::{SvgExportSettings, svg_export_system},
    },
};
use metaball_mask::physics::sim::{resources::*, state::*, systems::*};
use metaball_mask::setup::{BACKGROUND, setup_scene};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Metaball Mask".into(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin)
        .insert_resource(ClearColor(BACKGROUND))
        .init_resource::<ConfigDraft>()
        .init_resource::<PointerTracker>()
        .init_resource::<Autopilot>()
        .init_resource::<OverlaySettings>()
        .init_resource::<SvgExportSettings>()
        .init_state::<SimulationState>()
        .add_systems(Startup, (setup_scene, setup_simulation_system))
        .add_systems(
            Update,
            (
                // Block 1: Eingaben und UI
                blob_control_ui_system,
                keyboard_controls_system,
                apply_config_draft_system,
                handle_window_resize_system,
                track_pointer_system,
                // Block 2: Simulationsschritt, nur im Running-State
                step_simulation_system.run_if(in_state(SimulationState::Running)),
                // Block 3: Ausgabe
                svg_export_system,
                draw_blob_overlay_system,
            )
                .chain()
                // Die Engine entsteht erst im Startup, sobald das Fenster existiert
                .run_if(resource_exists::<BlobSimulation>),
        )
        .run();
}
