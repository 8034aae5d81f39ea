// src/math/algorithms/metaballs/blob.rs

use crate::math::algorithms::metaballs::influence::FieldInfluence;
use bevy::math::Vec2;

/// Untergrenze für `d²` im Nenner. Punkte im Zentrum eines Blobs erhalten
/// dadurch den endlichen Maximalwert `radius² / CENTER_EPSILON_SQ`.
pub const CENTER_EPSILON_SQ: f32 = 1e-4;

/// Untergrenze für Stretch-Faktoren bei der Feldauswertung.
const MIN_STRETCH: f32 = 1e-3;

/// Ein einzelner Metaball der Simulation.
///
/// Es gibt genau einen primären Blob (vom Zeiger gesteuert). Sekundäre Blobs
/// entstehen beim Splitten, altern über `life` und verschwinden beim Ablauf
/// oder wenn sie wieder mit dem primären Blob verschmelzen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blob {
    pub position: Vec2,
    /// Verschiebung pro Frame (px/Frame).
    pub velocity: Vec2,
    /// Einflussradius, immer > 0.
    pub radius: f32,
    /// Anisotrope Skalierung (stretchX, stretchY) der Distanz im Feld.
    pub stretch: Vec2,
    pub is_primary: bool,
    /// Normierter Lebenszähler in [0, 1], nur für sekundäre Blobs relevant.
    pub life: f32,
}

impl Blob {
    pub fn primary(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            radius,
            stretch: Vec2::ONE,
            is_primary: true,
            life: 1.0,
        }
    }

    pub fn secondary(position: Vec2, velocity: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
            stretch: Vec2::ONE,
            is_primary: false,
            life: 1.0,
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Quadrierte, durch den Stretch skalierte Distanz zu `point`.
    fn stretched_distance_sq(&self, point: Vec2) -> f32 {
        let offset = (point - self.position) / self.stretch.max(Vec2::splat(MIN_STRETCH));
        offset.length_squared()
    }
}

impl FieldInfluence for Blob {
    /// Klassischer Metaball-Beitrag `radius² / d²`.
    fn influence_at(&self, point: Vec2) -> f32 {
        let distance_sq = self.stretched_distance_sq(point).max(CENTER_EPSILON_SQ);
        self.radius * self.radius / distance_sq
    }
}
