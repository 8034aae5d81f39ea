use super::choreography::{CursorChoreography, FRAME_MS};
use crate::math::utils::comparison;
use crate::physics::blob::{BlobEngine, EngineConfig, PointerSample};
use bevy::prelude::*;

/// Die laufende Blob-Simulation als Bevy-Ressource.
#[derive(Resource, Debug)]
pub struct BlobSimulation {
    pub engine: BlobEngine,
}

impl BlobSimulation {
    pub fn new(engine: BlobEngine) -> Self {
        Self { engine }
    }
}

/// Entwurf der Engine-Konfiguration, den das Steuerpanel bearbeitet.
/// Wird erst nach erfolgreicher Validierung übernommen.
#[derive(Resource, Debug, Clone, Default)]
pub struct ConfigDraft {
    pub config: EngineConfig,
    pub last_error: Option<String>,
}

/// Letzte Zeigerposition im Fenster (Pixel, Ursprung oben links) und daraus
/// abgeleitete Geschwindigkeit in Pixeln pro Frame.
#[derive(Resource, Debug, Default)]
pub struct PointerTracker {
    sample: Option<PointerSample>,
}

impl PointerTracker {
    pub fn sample(&self) -> Option<PointerSample> {
        self.sample
    }

    pub fn record(&mut self, position: Vec2, dt_ms: f32) {
        let velocity = match self.sample {
            Some(previous) if dt_ms.is_finite() && !comparison::nearly_zero(dt_ms) => {
                (position - previous.position) * (FRAME_MS / dt_ms)
            }
            _ => Vec2::ZERO,
        };
        self.sample = Some(PointerSample::new(position, velocity));
    }

    /// Zeiger hat das Fenster verlassen: Ziel bleibt stehen, Bewegung endet.
    pub fn hold(&mut self) {
        if let Some(sample) = self.sample.as_mut() {
            sample.velocity = Vec2::ZERO;
        }
    }
}

/// Geskriptete Zeigerbahn anstelle der Maus.
#[derive(Resource, Debug, Default)]
pub struct Autopilot {
    pub enabled: bool,
    pub choreography: CursorChoreography,
}

impl Autopilot {
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
        self.choreography.restart();
    }
}

#[derive(Resource, Debug, Clone)]
pub struct OverlaySettings {
    pub show_segments: bool,
    pub show_filled_path: bool,
    pub show_blobs: bool,
    pub show_grid_bounds: bool,
    pub segment_color: Color,
    pub filled_color: Color,
    pub primary_color: Color,
    pub secondary_color: Color,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            show_segments: true,
            show_filled_path: true,
            show_blobs: false,
            show_grid_bounds: false,
            segment_color: Color::rgb(0.2, 0.9, 1.0),
            filled_color: Color::WHITE,
            primary_color: Color::ORANGE,
            secondary_color: Color::YELLOW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pointer_velocity_per_frame() {
        let mut tracker = PointerTracker::default();
        tracker.record(Vec2::new(100.0, 100.0), FRAME_MS);
        assert_eq!(tracker.sample().unwrap().velocity, Vec2::ZERO);

        // 10 px in zwei Frames = 5 px/Frame
        tracker.record(Vec2::new(110.0, 100.0), 2.0 * FRAME_MS);
        let sample = tracker.sample().unwrap();
        assert_eq!(sample.position, Vec2::new(110.0, 100.0));
        assert_relative_eq!(sample.velocity.x, 5.0, epsilon = 1e-4);

        tracker.hold();
        assert_eq!(tracker.sample().unwrap().velocity, Vec2::ZERO);
        assert_eq!(tracker.sample().unwrap().position, Vec2::new(110.0, 100.0));
    }

    #[test]
    fn test_zero_frame_time_gives_no_velocity() {
        let mut tracker = PointerTracker::default();
        tracker.record(Vec2::ZERO, 16.0);
        tracker.record(Vec2::new(50.0, 0.0), 0.0);
        assert_eq!(tracker.sample().unwrap().velocity, Vec2::ZERO);
    }

    #[test]
    fn test_autopilot_toggle_restarts() {
        let mut autopilot = Autopilot::default();
        assert!(!autopilot.enabled);
        autopilot.toggle();
        assert!(autopilot.enabled);
        assert_eq!(autopilot.choreography.current_index(), 0);
    }
}
