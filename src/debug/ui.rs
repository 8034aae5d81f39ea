// ./src/debug/ui.rs
use crate::debug::visualization::svg::SvgExportSettings;
use crate::physics::sim::resources::{
    Autopilot, BlobSimulation, ConfigDraft, OverlaySettings,
};
use crate::physics::sim::state::SimulationState;
use bevy::prelude::*;
use bevy_egui::{
    EguiContexts,
    egui::{self, Slider, Window},
};

pub fn blob_control_ui_system(
    mut contexts: EguiContexts,
    mut sim: ResMut<BlobSimulation>,
    mut draft: ResMut<ConfigDraft>,
    mut overlay: ResMut<OverlaySettings>,
    mut autopilot: ResMut<Autopilot>,
    mut export: ResMut<SvgExportSettings>,
    mut next_state: ResMut<NextState<SimulationState>>,
    current_state: Res<State<SimulationState>>,
) {
    Window::new("Blob-Steuerung")
        .default_width(320.0)
        .show(contexts.ctx_mut(), |ui| {
            let engine = &sim.engine;
            ui.label(format!(
                "Blobs: {} / {}",
                engine.blob_count(),
                engine.config().max_blobs
            ));
            if let Some(primary) = engine.primary() {
                ui.label(format!(
                    "Primär: ({:.0}, {:.0})  |v| = {:.1} px/Frame",
                    primary.position.x,
                    primary.position.y,
                    primary.speed()
                ));
            }
            let (grid_x, grid_y) = engine.grid_dimensions();
            ui.label(format!("Gitter: {grid_x} x {grid_y}"));

            ui.horizontal(|ui| {
                let paused = *current_state.get() == SimulationState::Paused;
                if ui.button(if paused { "▶ Play" } else { "⏸ Pause" }).clicked() {
                    next_state.set(current_state.get().toggled());
                }
                if ui.button("↺ Reset").clicked() {
                    sim.engine.reset();
                    autopilot.choreography.restart();
                }
                if ui.button("SVG exportieren").clicked() {
                    export.requested = true;
                }
            });
            let mut autopilot_enabled = autopilot.enabled;
            if ui.checkbox(&mut autopilot_enabled, "Autopilot").changed() {
                autopilot.toggle();
            }

            ui.collapsing("Feld & Dynamik", |ui| {
                // Auf einer Kopie arbeiten, damit ConfigDraft nur bei echten Änderungen als geändert gilt
                let mut config = draft.config.clone();
                ui.add(Slider::new(&mut config.threshold, 0.2..=3.0).text("Schwellwert"));
                ui.add(
                    Slider::new(&mut config.grid_resolution, 4.0..=40.0).text("Gitterabstand (px)"),
                );
                ui.add(Slider::new(&mut config.base_radius, 20.0..=300.0).text("Basisradius"));
                ui.add(Slider::new(&mut config.max_blobs, 1..=8).text("Max. Blobs"));
                ui.add(Slider::new(&mut config.spring_k, 0.01..=0.5).text("Federkonstante"));
                ui.add(Slider::new(&mut config.damping, 0.0..=0.99).text("Dämpfung"));
                ui.add(
                    Slider::new(&mut config.split_threshold, 1.0..=60.0).text("Split-Schwelle"),
                );
                ui.add(
                    Slider::new(&mut config.merge_distance, 0.0..=2.0).text("Verschmelzungsdistanz"),
                );
                ui.add(
                    Slider::new(&mut config.breath_amplitude, 0.0..=0.2).text("Atem-Amplitude"),
                );
                ui.add(
                    Slider::new(&mut config.breath_speed, 0.0..=0.02)
                        .logarithmic(true)
                        .text("Atem-Tempo (rad/ms)"),
                );
                if config != draft.config {
                    draft.config = config;
                }
                if let Some(message) = &draft.last_error {
                    ui.colored_label(egui::Color32::LIGHT_RED, message.as_str());
                }
            });

            ui.collapsing("Overlay", |ui| {
                ui.checkbox(&mut overlay.show_segments, "Marching-Squares-Segmente");
                ui.checkbox(&mut overlay.show_filled_path, "Gefüllte Kontur");
                ui.checkbox(&mut overlay.show_blobs, "Blob-Umrisse");
                ui.checkbox(&mut overlay.show_grid_bounds, "Flächenrand");
            });

            ui.collapsing("Tastatur", |ui| {
                ui.label("Leertaste: Pause / Weiter");
                ui.label("R: Reset");
                ui.label("A: Autopilot");
                ui.label("S: SVG-Snapshot");
            });
        });
}
