// src/math/scalar_field.rs

use bevy::math::Vec2;

/// Trait für ein zweidimensionales, auf einem Gitter abgetastetes Skalarfeld.
/// Ermöglicht es Algorithmen wie Marching Squares, auf verschiedenen
/// Feldimplementierungen zu operieren.
pub trait ScalarField2D {
    /// Anzahl der Gitterpunkte in x-Richtung.
    fn width(&self) -> usize;

    /// Anzahl der Gitterpunkte in y-Richtung.
    fn height(&self) -> usize;

    /// Abstand zweier benachbarter Gitterpunkte in Weltkoordinaten.
    fn cell_size(&self) -> f32;

    /// Gibt den Skalarwert am Gitterpunkt (x_idx, y_idx) zurück.
    /// Liefert 0.0 für Indizes außerhalb des Gitters.
    fn get_value(&self, x_idx: usize, y_idx: usize) -> f32;

    /// Konvertiert einen Gitterpunkt in Weltkoordinaten.
    fn cell_to_world(&self, x_idx: usize, y_idx: usize) -> Vec2 {
        Vec2::new(
            x_idx as f32 * self.cell_size(),
            y_idx as f32 * self.cell_size(),
        )
    }
}

/// Kontinuierliches Skalarfeld, an beliebigen Punkten auswertbar.
pub trait ImplicitField {
    fn value_at(&self, point: Vec2) -> f32;

    /// Iso-Wert, ab dem ein Punkt als "innen" gilt.
    fn threshold(&self) -> f32;

    fn is_inside(&self, point: Vec2) -> bool {
        self.value_at(point) >= self.threshold()
    }
}
