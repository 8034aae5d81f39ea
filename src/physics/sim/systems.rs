use super::resources::{Autopilot, BlobSimulation, ConfigDraft, PointerTracker};
use super::state::SimulationState;
use crate::physics::blob::{BlobEngine, PointerSample};
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

/// Erzeugt die Engine passend zur Größe des Hauptfensters.
pub fn setup_simulation_system(
    mut commands: Commands,
    windows: Query<&Window, With<PrimaryWindow>>,
    draft: Res<ConfigDraft>,
) {
    let Ok(window) = windows.get_single() else {
        error!("No primary window, blob simulation not started.");
        return;
    };
    match BlobEngine::new(draft.config.clone(), window.width(), window.height()) {
        Ok(engine) => commands.insert_resource(BlobSimulation::new(engine)),
        Err(err) => error!("Blob simulation could not be created: {}", err),
    }
}

/// Fenstergröße ändert sich: Fläche und Blob-Positionen mitskalieren statt neu starten.
pub fn handle_window_resize_system(
    mut resize_events: EventReader<WindowResized>,
    mut sim: ResMut<BlobSimulation>,
) {
    // Nur das letzte Ereignis des Frames ist relevant
    let Some(event) = resize_events.read().last() else {
        return;
    };
    if let Err(err) = sim.engine.resize(event.width, event.height) {
        warn!(
            "Ignoring resize to {}x{}: {}",
            event.width, event.height, err
        );
    }
}

pub fn track_pointer_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    time: Res<Time>,
    mut tracker: ResMut<PointerTracker>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    // cursor_position: Ursprung oben links, y nach unten, wie die Engine
    match window.cursor_position() {
        Some(position) => tracker.record(position, time.delta_seconds() * 1000.0),
        None => tracker.hold(),
    }
}

/// Ein Engine-Tick pro Frame. Ziel ist der Autopilot, sonst der Mauszeiger,
/// ohne beides bleibt der Blob an seiner Position.
pub fn step_simulation_system(
    time: Res<Time>,
    tracker: Res<PointerTracker>,
    mut autopilot: ResMut<Autopilot>,
    mut sim: ResMut<BlobSimulation>,
) {
    let dt_ms = time.delta_seconds() * 1000.0;
    let bounds = sim.engine.bounds();

    let pointer = if autopilot.enabled {
        autopilot.choreography.advance(dt_ms, &bounds)
    } else if let Some(sample) = tracker.sample() {
        sample
    } else if let Some(primary) = sim.engine.primary() {
        PointerSample::new(primary.position, Vec2::ZERO)
    } else {
        return;
    };

    sim.engine.step(dt_ms, pointer);
}

/// Space: Pause, R: Reset, A: Autopilot.
pub fn keyboard_controls_system(
    keys: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<SimulationState>>,
    mut next_state: ResMut<NextState<SimulationState>>,
    mut autopilot: ResMut<Autopilot>,
    mut sim: ResMut<BlobSimulation>,
) {
    if keys.just_pressed(KeyCode::Space) {
        let target = current_state.get().toggled();
        info!("Simulation state -> {:?}", target);
        next_state.set(target);
    }
    if keys.just_pressed(KeyCode::KeyR) {
        sim.engine.reset();
        autopilot.choreography.restart();
    }
    if keys.just_pressed(KeyCode::KeyA) {
        autopilot.toggle();
        info!(
            "Autopilot {}",
            if autopilot.enabled { "enabled" } else { "disabled" }
        );
    }
}

/// Übernimmt den Konfigurationsentwurf, sobald das Panel ihn geändert hat.
pub fn apply_config_draft_system(
    mut draft: ResMut<ConfigDraft>,
    mut sim: ResMut<BlobSimulation>,
) {
    if !draft.is_changed() || draft.config == *sim.engine.config() {
        return;
    }
    match sim.engine.apply_config(draft.config.clone()) {
        Ok(()) => {
            draft.bypass_change_detection().last_error = None;
            debug!("Engine configuration updated");
        }
        Err(err) => {
            warn!("Rejected configuration change: {}", err);
            // Fehlertext setzen, ohne den Entwurf erneut als geändert zu markieren
            draft.bypass_change_detection().last_error = Some(err.to_string());
        }
    }
}
