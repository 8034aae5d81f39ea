// src/physics/sim/choreography.rs

use crate::math::{types::Bounds2D, utils::comparison};
use crate::physics::blob::PointerSample;
use bevy::math::Vec2;

/// Referenz-Framezeit, auf die Zeigergeschwindigkeiten normiert werden (60 fps).
pub const FRAME_MS: f32 = 1000.0 / 60.0;

/// Ein Haltepunkt der Zeigerbahn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    /// Versatz vom Flächenzentrum, normiert auf die halbe Breite/Höhe.
    /// Bildschirmkoordinaten: +y zeigt nach unten.
    pub offset: Vec2,
    /// Wie lange das Ziel gehalten wird.
    pub hold_ms: f32,
}

impl Waypoint {
    pub const fn new(x: f32, y: f32, hold_ms: f32) -> Self {
        Self {
            offset: Vec2::new(x, y),
            hold_ms,
        }
    }

    /// Zielposition in Pixeln auf der Fläche `bounds`.
    pub fn resolve(&self, bounds: &Bounds2D) -> Vec2 {
        bounds.center() + self.offset * bounds.size() * 0.5
    }
}

/// Geskriptete Zeigerbahn als Autopilot. Springt von Haltepunkt zu Haltepunkt
/// und beginnt nach dem letzten wieder von vorn.
#[derive(Debug, Clone)]
pub struct CursorChoreography {
    waypoints: Vec<Waypoint>,
    index: usize,
    elapsed_ms: f32,
    previous_target: Option<Vec2>,
}

impl CursorChoreography {
    /// Leere oder nur aus Null-Dauern bestehende Bahnen werden durch einen
    /// einzelnen Haltepunkt im Zentrum ersetzt.
    pub fn new(waypoints: Vec<Waypoint>) -> Self {
        let usable = waypoints
            .iter()
            .any(|wp| wp.hold_ms.is_finite() && wp.hold_ms > 0.0);
        let waypoints = if usable {
            waypoints
        } else {
            vec![Waypoint::new(0.0, 0.0, 1000.0)]
        };
        Self {
            waypoints,
            index: 0,
            elapsed_ms: 0.0,
            previous_target: None,
        }
    }

    /// Die Sieben-Punkte-Schleife der Hero-Animation: rechts, Spitze, weiter
    /// Schwung nach links, abbremsen, zurück in die Mitte, atmen.
    pub fn hero_loop() -> Self {
        Self::new(vec![
            Waypoint::new(0.0, 0.0, 300.0),
            Waypoint::new(0.375, -0.111, 800.0),
            Waypoint::new(0.5, 0.0, 400.0),
            Waypoint::new(-0.375, 0.067, 1000.0),
            Waypoint::new(-0.125, -0.044, 400.0),
            Waypoint::new(0.0, 0.0, 600.0),
            Waypoint::new(0.0, 0.0, 500.0),
        ])
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Gesamtdauer einer Schleife.
    pub fn loop_duration_ms(&self) -> f32 {
        self.waypoints.iter().map(|wp| wp.hold_ms.max(0.0)).sum()
    }

    pub fn restart(&mut self) {
        self.index = 0;
        self.elapsed_ms = 0.0;
        self.previous_target = None;
    }

    /// Schreitet um `dt_ms` fort und liefert Ziel und Zeigergeschwindigkeit (px/Frame).
    pub fn advance(&mut self, dt_ms: f32, bounds: &Bounds2D) -> PointerSample {
        let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        // Ganze Schleifen vorab abziehen, sonst läuft die Schleife bei großen Sprüngen endlos
        self.elapsed_ms = (self.elapsed_ms + dt_ms) % self.loop_duration_ms();
        while self.elapsed_ms >= self.current().hold_ms.max(0.0) {
            let hold = self.current().hold_ms.max(0.0);
            self.elapsed_ms -= hold;
            self.index = (self.index + 1) % self.waypoints.len();
        }

        let target = self.current().resolve(bounds);
        let velocity = match self.previous_target {
            Some(previous) if !comparison::nearly_zero(dt_ms) => {
                (target - previous) * (FRAME_MS / dt_ms)
            }
            _ => Vec2::ZERO,
        };
        self.previous_target = Some(target);
        PointerSample::new(target, velocity)
    }

    fn current(&self) -> &Waypoint {
        &self.waypoints[self.index]
    }
}

impl Default for CursorChoreography {
    fn default() -> Self {
        Self::hero_loop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::blob::BlobEngine;
    use approx::assert_relative_eq;

    fn bounds() -> Bounds2D {
        Bounds2D::from_size(800.0, 600.0).unwrap()
    }

    #[test]
    fn test_hero_loop_shape() {
        let choreography = CursorChoreography::hero_loop();
        assert_eq!(choreography.waypoints().len(), 7);
        assert_relative_eq!(choreography.loop_duration_ms(), 4000.0);
    }

    #[test]
    fn test_waypoint_resolves_against_bounds() {
        let target = Waypoint::new(0.5, 0.0, 400.0).resolve(&bounds());
        assert_eq!(target, Vec2::new(600.0, 300.0));
        let target = Waypoint::new(-1.0, 1.0, 400.0).resolve(&bounds());
        assert_eq!(target, Vec2::new(0.0, 600.0));
    }

    #[test]
    fn test_advance_steps_through_waypoints() {
        let mut choreography = CursorChoreography::hero_loop();
        let bounds = bounds();

        let first = choreography.advance(100.0, &bounds);
        assert_eq!(first.position, Vec2::new(400.0, 300.0));
        assert_eq!(first.velocity, Vec2::ZERO);

        // 300 ms erreicht: zweiter Haltepunkt, Sprung nach rechts
        let second = choreography.advance(200.0, &bounds);
        assert_eq!(choreography.current_index(), 1);
        assert_relative_eq!(second.position.x, 550.0, epsilon = 1e-3);
        assert!(second.velocity.x > 0.0);
        assert!(second.velocity.y < 0.0);

        let held = choreography.advance(16.0, &bounds);
        assert_eq!(held.position, second.position);
        assert_eq!(held.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_advance_loops() {
        let mut choreography = CursorChoreography::hero_loop();
        let bounds = bounds();
        choreography.advance(4000.0, &bounds);
        assert_eq!(choreography.current_index(), 0);
        choreography.advance(4300.0, &bounds);
        assert_eq!(choreography.current_index(), 1);
    }

    #[test]
    fn test_advance_handles_huge_time_jumps() {
        let mut choreography = CursorChoreography::hero_loop();
        let bounds = bounds();
        // 1e10 ms sind ein ganzzahliges Vielfaches der Schleifendauer
        let sample = choreography.advance(1.0e10, &bounds);
        assert_eq!(choreography.current_index(), 0);
        assert!(sample.position.is_finite());

        choreography.restart();
        choreography.advance(4000.0 * 1000.0 + 300.0, &bounds);
        assert_eq!(choreography.current_index(), 1);
    }

    #[test]
    fn test_degenerate_waypoints_fall_back_to_centre() {
        let mut choreography = CursorChoreography::new(vec![Waypoint::new(1.0, 1.0, 0.0)]);
        let sample = choreography.advance(16.0, &bounds());
        assert_eq!(sample.position, Vec2::new(400.0, 300.0));

        let mut empty = CursorChoreography::new(Vec::new());
        assert_eq!(empty.advance(f32::NAN, &bounds()).position, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_autopilot_drives_engine_headless() {
        let bounds = bounds();
        let mut engine = BlobEngine::with_defaults(800.0, 600.0).unwrap();
        let mut choreography = CursorChoreography::hero_loop();
        let mut max_blobs = 1;
        let mut max_x: f32 = 0.0;

        // Zwei volle Schleifen mit 16 ms pro Frame
        for _ in 0..500 {
            let pointer = choreography.advance(16.0, &bounds);
            engine.step(16.0, pointer);
            max_blobs = max_blobs.max(engine.blob_count());
            max_x = max_x.max(engine.primary().unwrap().position.x);
            assert!(engine.blob_count() <= engine.config().max_blobs);
        }

        // Der schnelle Schwung nach links/rechts erzeugt Tropfen
        assert!(max_blobs > 1);
        assert!(max_x > 550.0);
        assert!(!engine.filled_boundary_path().is_empty());
    }
}
