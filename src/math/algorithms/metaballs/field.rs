// src/math/algorithms/metaballs/field.rs
use crate::math::algorithms::metaballs::{
    blob::Blob,
    influence::total_influence,
};
use crate::math::scalar_field::{ImplicitField, ScalarField2D};
use crate::math::types::Bounds2D;
use bevy::math::Vec2;

/// Kontinuierliche Sicht auf eine Menge von Blobs: das Metaball-Feld selbst.
/// Hält nur eine Referenz auf einen Snapshot und verändert nichts.
#[derive(Debug, Clone, Copy)]
pub struct BlobField<'a> {
    blobs: &'a [Blob],
    threshold: f32,
}

impl<'a> BlobField<'a> {
    pub fn new(blobs: &'a [Blob], threshold: f32) -> Self {
        Self { blobs, threshold }
    }

    pub fn blobs(&self) -> &'a [Blob] {
        self.blobs
    }

    /// Feldstärke an (x, y): Summe aller Blob-Beiträge.
    pub fn field_at(&self, x: f32, y: f32) -> f32 {
        self.value_at(Vec2::new(x, y))
    }

    /// `field_at(x, y) >= threshold`.
    pub fn is_inside_xy(&self, x: f32, y: f32) -> bool {
        self.is_inside(Vec2::new(x, y))
    }

    /// Schwerpunkt aller Blob-Positionen, `None` ohne Blobs.
    pub fn centroid(&self) -> Option<Vec2> {
        if self.blobs.is_empty() {
            return None;
        }
        let sum: Vec2 = self.blobs.iter().map(|blob| blob.position).sum();
        Some(sum / self.blobs.len() as f32)
    }
}

impl ImplicitField for BlobField<'_> {
    fn value_at(&self, point: Vec2) -> f32 {
        total_influence(self.blobs, point)
    }

    fn threshold(&self) -> f32 {
        self.threshold
    }
}

/// Auf einem regelmäßigen Gitter abgetastetes Skalarfeld.
/// Die Daten werden zeilenweise (row-major) gespeichert, ein Wert pro Gitterpunkt.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledField {
    data: Vec<f32>,
    pub width: usize,   // Gitterpunkte in x-Richtung
    pub height: usize,  // Gitterpunkte in y-Richtung
    pub cell_size: f32, // Gitterabstand in Weltkoordinaten
    pub origin: Vec2,   // Weltkoordinate des Gitterpunkts (0, 0)
}

impl SampledField {
    /// Erstellt ein neues, mit Nullen initialisiertes Feld.
    pub fn new(width: usize, height: usize, cell_size: f32, origin: Vec2) -> Self {
        if width == 0 || height == 0 {
            Self {
                data: Vec::new(),
                width: 0,
                height: 0,
                cell_size,
                origin,
            }
        } else {
            Self {
                data: vec![0.0; width * height],
                width,
                height,
                cell_size,
                origin,
            }
        }
    }

    /// Übernimmt vorberechnete Werte. Überzählige Werte werden verworfen,
    /// fehlende mit 0.0 aufgefüllt.
    pub fn from_values(width: usize, height: usize, cell_size: f32, values: &[f32]) -> Self {
        let mut field = Self::new(width, height, cell_size, Vec2::ZERO);
        for (slot, value) in field.data.iter_mut().zip(values) {
            *slot = *value;
        }
        field
    }

    /// Gitterdimensionen (Punkte pro Achse), die `bounds` mit Abstand
    /// `cell_size` vollständig abdecken.
    pub fn grid_dimensions(bounds: &Bounds2D, cell_size: f32) -> (usize, usize) {
        let columns = (bounds.width() / cell_size).ceil() as usize + 1;
        let rows = (bounds.height() / cell_size).ceil() as usize + 1;
        (columns, rows)
    }

    /// Tastet `source` an jedem Gitterpunkt genau einmal ab.
    pub fn sample<F: ImplicitField + ?Sized>(source: &F, bounds: &Bounds2D, cell_size: f32) -> Self {
        let (width, height) = Self::grid_dimensions(bounds, cell_size);
        let mut field = Self::new(width, height, cell_size, bounds.min);
        for y_idx in 0..height {
            for x_idx in 0..width {
                let point = field.cell_to_world(x_idx, y_idx);
                field.set(x_idx, y_idx, source.value_at(point));
            }
        }
        field
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    pub fn get(&self, x: usize, y: usize) -> f32 {
        match self.idx(x, y) {
            Some(index) => self.data.get(index).copied().unwrap_or(0.0),
            None => 0.0,
        }
    }

    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        if let Some(index) = self.idx(x, y) {
            if let Some(val_ref) = self.data.get_mut(index) {
                *val_ref = value;
            }
        }
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }
}

impl ScalarField2D for SampledField {
    fn width(&self) -> usize {
        self.width
    }
    fn height(&self) -> usize {
        self.height
    }
    fn cell_size(&self) -> f32 {
        self.cell_size
    }
    fn get_value(&self, x_idx: usize, y_idx: usize) -> f32 {
        self.get(x_idx, y_idx)
    }
    fn cell_to_world(&self, x_idx: usize, y_idx: usize) -> Vec2 {
        self.origin + Vec2::new(x_idx as f32, y_idx as f32) * self.cell_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_blob() -> Vec<Blob> {
        vec![Blob::primary(Vec2::new(400.0, 300.0), 120.0)]
    }

    #[test]
    fn test_field_decays_with_distance() {
        let blobs = single_blob();
        let field = BlobField::new(&blobs, 1.0);
        for direction in [Vec2::X, Vec2::Y, Vec2::new(-1.0, 1.0).normalize()] {
            let values: Vec<f32> = [50.0, 100.0, 200.0]
                .iter()
                .map(|d| field.value_at(Vec2::new(400.0, 300.0) + direction * *d))
                .collect();
            assert!(values[0] > values[1] && values[1] > values[2], "{values:?}");
        }
    }

    #[test]
    fn test_field_superposition() {
        let blobs = vec![
            Blob::primary(Vec2::new(0.0, 0.0), 50.0),
            Blob::secondary(Vec2::new(200.0, 0.0), Vec2::ZERO, 50.0),
        ];
        let both = BlobField::new(&blobs, 1.0);
        let midpoint = Vec2::new(100.0, 0.0);
        for alone in blobs.iter() {
            let single = std::slice::from_ref(alone);
            assert!(both.value_at(midpoint) > BlobField::new(single, 1.0).value_at(midpoint));
        }
    }

    #[test]
    fn test_threshold_consistency() {
        let blobs = vec![
            Blob::primary(Vec2::new(300.0, 200.0), 80.0),
            Blob::secondary(Vec2::new(420.0, 260.0), Vec2::ZERO, 40.0),
        ];
        let field = BlobField::new(&blobs, 1.3);
        for y in (0..600).step_by(17) {
            for x in (0..800).step_by(13) {
                let (x, y) = (x as f32, y as f32);
                assert_eq!(field.is_inside_xy(x, y), field.field_at(x, y) >= 1.3);
            }
        }
    }

    #[test]
    fn test_field_is_finite_at_blob_center() {
        let blobs = single_blob();
        let field = BlobField::new(&blobs, 1.0);
        let value = field.field_at(400.0, 300.0);
        assert!(value.is_finite());
        assert!(field.is_inside_xy(400.0, 300.0));
    }

    #[test]
    fn test_empty_field_is_zero() {
        let field = BlobField::new(&[], 1.0);
        assert_eq!(field.field_at(10.0, 10.0), 0.0);
        assert!(field.centroid().is_none());
    }

    #[test]
    fn test_sampled_grid_covers_bounds() {
        let bounds = Bounds2D::from_size(105.0, 50.0).unwrap();
        let blobs = single_blob();
        let sampled = SampledField::sample(&BlobField::new(&blobs, 1.0), &bounds, 10.0);
        assert_eq!((sampled.width, sampled.height), (12, 6));
        assert_eq!(sampled.data().len(), 72);
        assert_eq!(sampled.cell_to_world(11, 5), Vec2::new(110.0, 50.0));
        assert_eq!(sampled.get(99, 0), 0.0);
    }
}
