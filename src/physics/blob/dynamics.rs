// src/physics/blob/dynamics.rs

//! Bewegungsregeln für einen einzelnen Tick. Die Funktionen arbeiten auf einzelnen
//! Blobs; die Reihenfolge und die Verwaltung der Blob-Liste übernimmt `BlobEngine`.

use super::config::EngineConfig;
use crate::math::{
    algorithms::Blob,
    utils::constants::{EPSILON, TAU},
};
use bevy::math::Vec2;

/// Geschwindigkeit (px/Frame), bei der die Streckung ihr Maximum erreicht, geteilt durch `max_stretch`.
const STRETCH_SPEED_SCALE: f32 = 20.0;
const STRETCH_ALONG: f32 = 0.7;
const STRETCH_ACROSS: f32 = 0.3;
const IDLE_RELAXATION: f32 = 0.1;

/// Abstand des neuen Tropfens hinter dem primären Blob, relativ zu dessen Radius.
const SPLIT_OFFSET: f32 = 0.8;
pub const SECONDARY_RADIUS_FACTOR: f32 = 0.4;
const SECONDARY_SPEED_FACTOR: f32 = 0.3;
/// Kleinster Lebensanteil, mit dem der Radius skaliert wird.
const MIN_LIFE_SCALE: f32 = 0.2;

/// Atem-Hüllkurve `1 + amplitude * sin(clock * speed)` zum Zeitpunkt `clock_ms`.
pub fn breathing_baseline(clock_ms: f64, config: &EngineConfig) -> f32 {
    1.0 + config.breath_amplitude * breathing_phase(clock_ms, config, 0.0).sin()
}

fn breathing_phase(clock_ms: f64, config: &EngineConfig, offset: f32) -> f32 {
    // f64 für die Multiplikation, damit lange Laufzeiten die Phase nicht verrauschen
    ((clock_ms * config.breath_speed as f64) % std::f64::consts::TAU) as f32 + offset
}

/// Gedämpfte Feder mit Ruhelänge 0 Richtung `target`.
pub fn apply_spring(blob: &mut Blob, target: Vec2, config: &EngineConfig) {
    blob.velocity += (target - blob.position) * config.spring_k;
    blob.velocity *= config.damping;
    blob.position += blob.velocity;
}

/// Streckt den primären Blob in Bewegungsrichtung oder lässt ihn im Ruhezustand
/// weich in die Atem-Hüllkurve zurückkehren.
pub fn update_primary_stretch(blob: &mut Blob, clock_ms: f64, config: &EngineConfig) {
    let speed = blob.speed();
    if speed > config.stretch_threshold && speed > EPSILON {
        let amount = (speed / STRETCH_SPEED_SCALE).min(config.max_stretch);
        let dir = blob.velocity / speed;
        let (along_x, along_y) = (dir.x.abs(), dir.y.abs());
        blob.stretch = Vec2::new(
            1.0 + amount * (STRETCH_ALONG * along_x - STRETCH_ACROSS * along_y),
            1.0 + amount * (STRETCH_ALONG * along_y - STRETCH_ACROSS * along_x),
        );
    } else {
        let breath = breathing_baseline(clock_ms, config);
        blob.stretch += (Vec2::splat(breath) - blob.stretch) * IDLE_RELAXATION;
    }
}

/// Erzeugt den Tropfen, der sich bei schneller Bewegung hinter dem primären Blob löst.
/// `None`, solange die Geschwindigkeit die Split-Schwelle nicht übersteigt.
pub fn split_droplet(primary: &Blob, config: &EngineConfig) -> Option<Blob> {
    let speed = primary.speed();
    if speed <= config.split_threshold || speed <= EPSILON {
        return None;
    }
    let dir = primary.velocity / speed;
    Some(Blob::secondary(
        primary.position - dir * (SPLIT_OFFSET * primary.radius),
        -dir * (SECONDARY_SPEED_FACTOR * speed),
        primary.radius * SECONDARY_RADIUS_FACTOR,
    ))
}

/// Alterung, Anziehung zum primären Blob, Integration und Schrumpfen eines sekundären Blobs.
pub fn update_secondary(
    blob: &mut Blob,
    primary_position: Vec2,
    dt_ms: f32,
    clock_ms: f64,
    config: &EngineConfig,
) {
    blob.life -= config.decay_rate * dt_ms;

    let to_primary = primary_position - blob.position;
    if to_primary.length_squared() > EPSILON {
        blob.velocity += to_primary * config.secondary_attraction;
    }
    blob.velocity *= config.secondary_damping;
    blob.position += blob.velocity;

    blob.radius = config.base_radius * SECONDARY_RADIUS_FACTOR * blob.life.max(MIN_LIFE_SCALE);

    // Phasenversatz über die Lebenszeit, damit mehrere Tropfen nicht synchron pulsieren
    let phase = breathing_phase(clock_ms, config, blob.life * TAU);
    blob.stretch = Vec2::new(
        1.0 + config.breath_amplitude * phase.sin(),
        1.0 + config.breath_amplitude * phase.cos(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_spring_moves_towards_target() {
        let config = EngineConfig::default();
        let mut blob = Blob::primary(Vec2::new(400.0, 300.0), 120.0);
        apply_spring(&mut blob, Vec2::new(600.0, 300.0), &config);
        // v = 200 * 0.08 * 0.85
        assert_relative_eq!(blob.velocity.x, 13.6, epsilon = 1e-4);
        assert_relative_eq!(blob.position.x, 413.6, epsilon = 1e-3);
        assert_eq!(blob.position.y, 300.0);
    }

    #[test]
    fn test_stretch_elongates_along_motion() {
        let config = EngineConfig::default();
        let mut blob = Blob::primary(Vec2::ZERO, 120.0);
        blob.velocity = Vec2::new(5.0, 0.0);
        update_primary_stretch(&mut blob, 0.0, &config);
        // amount = 0.25
        assert_relative_eq!(blob.stretch.x, 1.175, epsilon = 1e-5);
        assert_relative_eq!(blob.stretch.y, 0.925, epsilon = 1e-5);
    }

    #[test]
    fn test_stretch_is_capped() {
        let config = EngineConfig::default();
        let mut blob = Blob::primary(Vec2::ZERO, 120.0);
        blob.velocity = Vec2::new(0.0, -200.0);
        update_primary_stretch(&mut blob, 0.0, &config);
        assert_relative_eq!(blob.stretch.y, 1.35, epsilon = 1e-5);
        assert_relative_eq!(blob.stretch.x, 0.85, epsilon = 1e-5);
    }

    #[test]
    fn test_idle_stretch_relaxes_smoothly() {
        let config = EngineConfig::default();
        let mut blob = Blob::primary(Vec2::ZERO, 120.0);
        blob.stretch = Vec2::new(1.4, 0.8);
        update_primary_stretch(&mut blob, 0.0, &config);
        // Baseline bei clock 0 ist 1.0; ein Zehntel des Abstands wird abgebaut
        assert_relative_eq!(blob.stretch.x, 1.36, epsilon = 1e-5);
        assert_relative_eq!(blob.stretch.y, 0.82, epsilon = 1e-5);
    }

    #[test]
    fn test_breathing_baseline_stays_in_envelope() {
        let config = EngineConfig::default();
        for step in 0..200 {
            let baseline = breathing_baseline(step as f64 * 97.0, &config);
            assert!((0.97..=1.03).contains(&baseline), "{baseline}");
        }
    }

    #[test]
    fn test_split_droplet_trails_behind() {
        let config = EngineConfig::default();
        let mut primary = Blob::primary(Vec2::new(100.0, 100.0), 120.0);
        assert!(split_droplet(&primary, &config).is_none());

        primary.velocity = Vec2::new(20.0, 0.0);
        let droplet = split_droplet(&primary, &config).unwrap();
        assert!(!droplet.is_primary);
        assert_eq!(droplet.life, 1.0);
        assert_relative_eq!(droplet.position.x, 100.0 - 96.0, epsilon = 1e-4);
        assert_relative_eq!(droplet.radius, 48.0, epsilon = 1e-5);
        assert_relative_eq!(droplet.velocity.x, -6.0, epsilon = 1e-5);
    }

    #[test]
    fn test_secondary_decays_and_shrinks() {
        let config = EngineConfig::default();
        let mut droplet = Blob::secondary(Vec2::new(200.0, 0.0), Vec2::ZERO, 48.0);
        update_secondary(&mut droplet, Vec2::ZERO, 500.0, 0.0, &config);
        assert_relative_eq!(droplet.life, 0.5, epsilon = 1e-6);
        assert_relative_eq!(droplet.radius, 24.0, epsilon = 1e-4);
        // Anziehung Richtung Ursprung
        assert!(droplet.velocity.x < 0.0);
        assert!(droplet.position.x < 200.0);

        update_secondary(&mut droplet, Vec2::ZERO, 450.0, 0.0, &config);
        // Radius fällt nicht unter 20 % des Startradius
        assert_relative_eq!(droplet.radius, 48.0 * 0.2, epsilon = 1e-4);
    }

    #[test]
    fn test_secondary_on_primary_centre_stays_finite() {
        let config = EngineConfig::default();
        let mut droplet = Blob::secondary(Vec2::ZERO, Vec2::ZERO, 48.0);
        update_secondary(&mut droplet, Vec2::ZERO, 16.0, 1000.0, &config);
        assert!(droplet.position.is_finite());
        assert!(droplet.stretch.x > 0.0 && droplet.stretch.y > 0.0);
    }

    #[test]
    fn test_secondaries_pulse_out_of_phase() {
        let config = EngineConfig::default();
        let amplitude = config.breath_amplitude;
        let mut fresh = Blob::secondary(Vec2::new(200.0, 0.0), Vec2::ZERO, 48.0);
        let mut aged = Blob::secondary(Vec2::new(200.0, 0.0), Vec2::ZERO, 48.0);
        aged.life = 0.75;

        // dt = 0: Lebenszeit bleibt, nur der Versatz unterscheidet die Phasen
        update_secondary(&mut fresh, Vec2::ZERO, 0.0, 0.0, &config);
        update_secondary(&mut aged, Vec2::ZERO, 0.0, 0.0, &config);

        assert_relative_eq!(fresh.stretch.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(fresh.stretch.y, 1.0 + amplitude, epsilon = 1e-5);
        assert_relative_eq!(aged.stretch.x, 1.0 - amplitude, epsilon = 1e-5);
        assert_relative_eq!(aged.stretch.y, 1.0, epsilon = 1e-5);
        assert!(fresh.stretch.distance(aged.stretch) > amplitude);
    }
}
