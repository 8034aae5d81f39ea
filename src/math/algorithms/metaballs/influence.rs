// src/math/algorithms/metaballs/influence.rs

use bevy::math::Vec2;

/// Trait für alle Objekte, die ein Skalarfeld beeinflussen können
pub trait FieldInfluence: std::fmt::Debug {
    /// Berechnet den Einfluss an einem gegebenen Punkt
    fn influence_at(&self, point: Vec2) -> f32;
}

/// Summiert die Einflüsse aller Quellen an einem Punkt (Superposition).
pub fn total_influence<'a, I, S>(sources: I, point: Vec2) -> f32
where
    I: IntoIterator<Item = &'a S>,
    S: FieldInfluence + 'a,
{
    sources
        .into_iter()
        .map(|source| source.influence_at(point))
        .sum()
}
