// src/math/utils.rs

/// Mathematische Konstanten
pub mod constants {
    pub const EPSILON: f32 = 1e-6;
    pub const TAU: f32 = std::f32::consts::TAU;
}

/// Vergleichsfunktionen mit Toleranz
pub mod comparison {
    use super::constants::EPSILON;

    /// Prüft ob zwei Floats (nahezu) gleich sind
    pub fn nearly_equal(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    /// Prüft ob Float (nahezu) Null ist
    pub fn nearly_zero(a: f32) -> bool {
        a.abs() < EPSILON
    }

    /// Inverse lineare Interpolation.
    /// Liefert `None`, wenn `a` und `b` zusammenfallen.
    pub fn inverse_lerp(a: f32, b: f32, value: f32) -> Option<f32> {
        if nearly_equal(a, b) {
            None
        } else {
            Some((value - a) / (b - a))
        }
    }

    /// Prüft, ob alle Werte endlich und strikt positiv sind.
    pub fn all_positive_finite(values: &[f32]) -> bool {
        values.iter().all(|v| v.is_finite() && *v > 0.0)
    }
}
