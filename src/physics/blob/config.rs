// src/physics/blob/config.rs

use crate::math::{
    algorithms::BoundarySettings,
    error::{MathError, MathResult},
};

/// Konfiguration der Blob-Simulation. Alle Längen in Pixeln, Zeiten in Millisekunden,
/// Geschwindigkeiten in Pixeln pro Frame.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Iso-Wert des Metaball-Feldes. Kleiner = Blobs verschmelzen eher.
    pub threshold: f32,
    /// Gitterabstand für Marching Squares.
    pub grid_resolution: f32,
    /// Obergrenze für die Anzahl gleichzeitig existierender Blobs (inkl. primärem Blob).
    pub max_blobs: usize,
    pub base_radius: f32,
    /// Federsteifigkeit Richtung Zeiger.
    pub spring_k: f32,
    /// Geschwindigkeitsdämpfung pro Tick, in [0, 1).
    pub damping: f32,
    /// Geschwindigkeit, ab der sich ein Tropfen abspaltet.
    pub split_threshold: f32,
    pub split_cooldown_ms: f32,
    /// Verschmelzungsdistanz als Vielfaches des Radius des primären Blobs.
    pub merge_distance: f32,
    /// Anteil der Geschwindigkeit eines verschmelzenden Tropfens, der auf den primären Blob übergeht.
    pub absorb_fraction: f32,
    pub breath_amplitude: f32,
    /// Kreisfrequenz des "Atmens" in rad/ms.
    pub breath_speed: f32,
    /// Geschwindigkeit, unterhalb der der Blob in die Atembewegung zurückkehrt.
    pub stretch_threshold: f32,
    /// Maximale Streckung (0.5 = 50 %).
    pub max_stretch: f32,
    /// Lebensabnahme sekundärer Blobs pro Millisekunde (0.001 = 1 s Lebensdauer).
    pub decay_rate: f32,
    /// Anziehung sekundärer Blobs zum primären Blob pro Tick und Pixel Abstand.
    pub secondary_attraction: f32,
    pub secondary_damping: f32,
    pub ray_count: usize,
    pub ray_iterations: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threshold: 1.0,
            grid_resolution: 10.0,
            max_blobs: 4,
            base_radius: 120.0,
            spring_k: 0.08,
            damping: 0.85,
            split_threshold: 15.0,
            split_cooldown_ms: 300.0,
            merge_distance: 0.8,
            absorb_fraction: 0.2,
            breath_amplitude: 0.03,
            breath_speed: 0.002,
            stretch_threshold: 0.5,
            max_stretch: 0.5,
            decay_rate: 0.001,
            secondary_attraction: 0.005,
            secondary_damping: 0.95,
            ray_count: 120,
            ray_iterations: 20,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_grid_resolution(mut self, resolution: f32) -> Self {
        self.grid_resolution = resolution;
        self
    }

    pub fn with_max_blobs(mut self, count: usize) -> Self {
        self.max_blobs = count;
        self
    }

    pub fn with_base_radius(mut self, radius: f32) -> Self {
        self.base_radius = radius;
        self
    }

    pub fn with_spring(mut self, spring_k: f32, damping: f32) -> Self {
        self.spring_k = spring_k;
        self.damping = damping;
        self
    }

    pub fn with_split_threshold(mut self, speed: f32) -> Self {
        self.split_threshold = speed;
        self
    }

    pub fn with_split_cooldown_ms(mut self, cooldown_ms: f32) -> Self {
        self.split_cooldown_ms = cooldown_ms;
        self
    }

    pub fn with_merge_distance(mut self, factor: f32) -> Self {
        self.merge_distance = factor;
        self
    }

    pub fn with_breathing(mut self, amplitude: f32, speed: f32) -> Self {
        self.breath_amplitude = amplitude;
        self.breath_speed = speed;
        self
    }

    pub fn with_rays(mut self, count: usize, iterations: usize) -> Self {
        self.ray_count = count;
        self.ray_iterations = iterations;
        self
    }

    /// Parameter für die Konturextraktion.
    pub fn boundary_settings(&self) -> BoundarySettings {
        BoundarySettings {
            threshold: self.threshold,
            grid_resolution: self.grid_resolution,
            ray_count: self.ray_count,
            ray_iterations: self.ray_iterations,
        }
    }

    pub fn validate(&self) -> MathResult<()> {
        require_positive("threshold", self.threshold)?;
        require_positive("grid_resolution", self.grid_resolution)?;
        require_positive("base_radius", self.base_radius)?;
        require_positive("spring_k", self.spring_k)?;
        require_positive("decay_rate", self.decay_rate)?;

        require_non_negative("split_threshold", self.split_threshold)?;
        require_non_negative("split_cooldown_ms", self.split_cooldown_ms)?;
        require_non_negative("merge_distance", self.merge_distance)?;
        require_non_negative("breath_speed", self.breath_speed)?;
        require_non_negative("stretch_threshold", self.stretch_threshold)?;
        require_non_negative("secondary_attraction", self.secondary_attraction)?;

        require_unit_interval("damping", self.damping, false)?;
        require_unit_interval("secondary_damping", self.secondary_damping, false)?;
        require_unit_interval("absorb_fraction", self.absorb_fraction, true)?;
        require_unit_interval("max_stretch", self.max_stretch, true)?;
        require_unit_interval("breath_amplitude", self.breath_amplitude, false)?;

        if self.max_blobs == 0 {
            return Err(MathError::config(
                "max_blobs must be at least 1 (the primary blob).",
            ));
        }
        if self.ray_count < 3 {
            return Err(MathError::config(format!(
                "ray_count must be at least 3 to enclose an area, got {}.",
                self.ray_count
            )));
        }
        if self.ray_iterations == 0 {
            return Err(MathError::config("ray_iterations must be at least 1."));
        }
        Ok(())
    }
}

fn require_positive(name: &str, value: f32) -> MathResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(MathError::config(format!(
            "{name} must be finite and > 0, got {value}."
        )))
    }
}

fn require_non_negative(name: &str, value: f32) -> MathResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(MathError::config(format!(
            "{name} must be finite and >= 0, got {value}."
        )))
    }
}

/// `[0, 1]` bei `inclusive`, sonst `[0, 1)`.
fn require_unit_interval(name: &str, value: f32, inclusive: bool) -> MathResult<()> {
    let in_range = if inclusive {
        (0.0..=1.0).contains(&value)
    } else {
        (0.0..1.0).contains(&value)
    };
    if in_range {
        Ok(())
    } else {
        let upper = if inclusive { "1]" } else { "1)" };
        Err(MathError::config(format!(
            "{name} must lie in [0, {upper}, got {value}."
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.threshold, 1.0);
        assert_eq!(config.grid_resolution, 10.0);
        assert_eq!(config.max_blobs, 4);
        assert_eq!(config.base_radius, 120.0);
        assert_eq!(config.spring_k, 0.08);
        assert_eq!(config.damping, 0.85);
        assert_eq!(config.split_threshold, 15.0);
        assert_eq!(config.merge_distance, 0.8);
        assert_eq!(config.breath_amplitude, 0.03);
        assert_eq!(config.breath_speed, 0.002);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let invalid = [
            EngineConfig::new().with_grid_resolution(0.0),
            EngineConfig::new().with_grid_resolution(-4.0),
            EngineConfig::new().with_base_radius(-120.0),
            EngineConfig::new().with_threshold(f32::NAN),
            EngineConfig::new().with_max_blobs(0),
            EngineConfig::new().with_spring(0.08, 1.0),
            EngineConfig::new().with_merge_distance(-0.1),
            EngineConfig::new().with_rays(2, 20),
            EngineConfig::new().with_rays(120, 0),
        ];
        for config in invalid {
            let err = config.validate().unwrap_err();
            assert!(matches!(err, MathError::InvalidConfiguration { .. }), "{err}");
        }
    }

    #[test]
    fn test_error_message_names_field() {
        let err = EngineConfig::new()
            .with_grid_resolution(0.0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("grid_resolution"));
    }

    #[test]
    fn test_boundary_settings_follow_config() {
        let settings = EngineConfig::new()
            .with_threshold(1.5)
            .with_grid_resolution(12.0)
            .boundary_settings();
        assert_eq!(settings.threshold, 1.5);
        assert_eq!(settings.grid_resolution, 12.0);
        assert_eq!(settings.ray_count, 120);
    }
}
