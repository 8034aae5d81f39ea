// src/math/algorithms/boundary.rs

use crate::math::algorithms::marching_squares::{Contour, MarchingSquares};
use crate::math::algorithms::metaballs::{Blob, BlobField, SampledField};
use crate::math::geometry::{MaskPath, SegmentPath};
use crate::math::scalar_field::ImplicitField;
use crate::math::types::Bounds2D;
use crate::math::utils::{comparison, constants::TAU};
use bevy::math::Vec2;

/// Toleranz beim Zusammenfügen von Segment-Endpunkten, relativ zur Gitterweite.
const STITCH_TOLERANCE_FACTOR: f32 = 1e-3;

/// Parameter der Konturextraktion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundarySettings {
    pub threshold: f32,
    /// Gitterabstand in Pixeln für Marching Squares.
    pub grid_resolution: f32,
    /// Anzahl der Strahlen für die füllbare Kontur (120 = alle 3°).
    pub ray_count: usize,
    /// Bisektionsschritte pro Strahl.
    pub ray_iterations: usize,
}

impl Default for BoundarySettings {
    fn default() -> Self {
        Self {
            threshold: 1.0,
            grid_resolution: 10.0,
            ray_count: 120,
            ray_iterations: 20,
        }
    }
}

/// Liest einen Blob-Snapshot und erzeugt daraus renderbare Formen.
/// Verändert die Blobs nie.
#[derive(Debug, Clone, Copy)]
pub struct BoundaryExtractor<'a> {
    field: BlobField<'a>,
    bounds: Bounds2D,
    settings: BoundarySettings,
}

impl<'a> BoundaryExtractor<'a> {
    pub fn new(blobs: &'a [Blob], bounds: Bounds2D, settings: BoundarySettings) -> Self {
        Self {
            field: BlobField::new(blobs, settings.threshold),
            bounds,
            settings,
        }
    }

    pub fn field(&self) -> &BlobField<'a> {
        &self.field
    }

    /// Tastet das Feld einmal pro Gitterpunkt über der gesamten Oberfläche ab.
    pub fn sample_grid(&self) -> SampledField {
        SampledField::sample(&self.field, &self.bounds, self.settings.grid_resolution)
    }

    /// Marching-Squares-Segmente der Iso-Linie `field = threshold`.
    pub fn boundary_path(&self) -> SegmentPath {
        let usable_grid = comparison::all_positive_finite(&[self.settings.grid_resolution]);
        if self.field.blobs().is_empty() || !usable_grid {
            return SegmentPath::default();
        }
        let grid = self.sample_grid();
        SegmentPath::new(MarchingSquares::extract_segments(
            &grid,
            self.settings.threshold,
        ))
    }

    /// Die Segmente aus `boundary_path`, zu Polylinien zusammengefügt.
    pub fn traced_contours(&self) -> Vec<Contour> {
        let path = self.boundary_path();
        MarchingSquares::stitch_segments(
            &path.segments,
            self.settings.grid_resolution * STITCH_TOLERANCE_FACTOR,
        )
    }

    /// Ein Randpunkt pro Strahl vom Schwerpunkt aus, in Winkelreihenfolge.
    ///
    /// Nur für bezüglich des Schwerpunkts sternförmige Konfigurationen exakt:
    /// Einbuchtungen, die vom Schwerpunkt aus nicht sichtbar sind, gehen verloren.
    pub fn ray_boundary_points(&self) -> Vec<Vec2> {
        let Some(centroid) = self.field.centroid() else {
            return Vec::new();
        };
        let ray_count = self.settings.ray_count;
        let max_radius = self.bounds.max_extent();

        (0..ray_count)
            .map(|i| {
                let angle = i as f32 / ray_count as f32 * TAU;
                let direction = Vec2::from_angle(angle);
                let radius = self.bisect_ray(centroid, direction, max_radius);
                centroid + direction * radius
            })
            .collect()
    }

    /// Sucht entlang des Strahls den Radius, an dem das Feld den Schwellenwert kreuzt.
    fn bisect_ray(&self, origin: Vec2, direction: Vec2, max_radius: f32) -> f32 {
        let (mut inner, mut outer) = (0.0_f32, max_radius);
        for _ in 0..self.settings.ray_iterations {
            let mid = (inner + outer) * 0.5;
            if self.field.is_inside(origin + direction * mid) {
                inner = mid;
            } else {
                outer = mid;
            }
        }
        (inner + outer) * 0.5
    }

    /// Geschlossene, füllbare Kontur aus den Strahl-Randpunkten,
    /// geglättet mit quadratischen Kurven.
    pub fn filled_boundary_path(&self) -> MaskPath {
        MaskPath::smooth_closed(&self.ray_boundary_points())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> Bounds2D {
        Bounds2D::from_size(800.0, 600.0).unwrap()
    }

    #[test]
    fn test_empty_blobs_give_empty_paths() {
        let extractor = BoundaryExtractor::new(&[], surface(), BoundarySettings::default());
        assert!(extractor.boundary_path().is_empty());
        assert!(extractor.filled_boundary_path().is_empty());
        assert!(extractor.traced_contours().is_empty());
    }

    #[test]
    fn test_filled_path_covers_single_blob() {
        let blobs = [Blob::primary(Vec2::new(400.0, 300.0), 120.0)];
        let extractor = BoundaryExtractor::new(&blobs, surface(), BoundarySettings::default());
        let path = extractor.filled_boundary_path();
        assert!(path.contains(Vec2::new(400.0, 300.0)));
        assert!(!path.contains(Vec2::new(400.0 + 360.0, 300.0)));
        assert!(!path.contains(Vec2::new(400.0, 300.0 - 3.0 * 120.0)));
    }

    #[test]
    fn test_ray_points_sit_on_radius() {
        let blobs = [Blob::primary(Vec2::new(400.0, 300.0), 120.0)];
        let extractor = BoundaryExtractor::new(&blobs, surface(), BoundarySettings::default());
        let points = extractor.ray_boundary_points();
        assert_eq!(points.len(), 120);
        for point in points {
            let r = point.distance(Vec2::new(400.0, 300.0));
            assert!((r - 120.0).abs() < 0.01, "ray hit at {r}");
        }
    }

    #[test]
    fn test_threshold_shrinks_surface() {
        let blobs = [Blob::primary(Vec2::new(400.0, 300.0), 120.0)];
        let settings = BoundarySettings {
            threshold: 4.0,
            ..Default::default()
        };
        let extractor = BoundaryExtractor::new(&blobs, surface(), settings);
        for point in extractor.ray_boundary_points() {
            // r² / d² = 4  =>  d = r / 2
            assert!((point.distance(Vec2::new(400.0, 300.0)) - 60.0).abs() < 0.01);
        }
    }

    #[test]
    fn test_boundary_path_tracks_two_blobs() {
        let blobs = [
            Blob::primary(Vec2::new(250.0, 300.0), 60.0),
            Blob::secondary(Vec2::new(550.0, 300.0), Vec2::ZERO, 60.0),
        ];
        let extractor = BoundaryExtractor::new(&blobs, surface(), BoundarySettings::default());
        assert!(!extractor.boundary_path().is_empty());
        let contours = extractor.traced_contours();
        assert_eq!(contours.iter().filter(|c| c.is_closed).count(), 2);
    }

    #[test]
    fn test_extraction_does_not_mutate_snapshot() {
        let blobs = vec![Blob::primary(Vec2::new(400.0, 300.0), 120.0)];
        let before = blobs.clone();
        let extractor = BoundaryExtractor::new(&blobs, surface(), BoundarySettings::default());
        let _ = extractor.boundary_path();
        let _ = extractor.filled_boundary_path();
        assert_eq!(blobs, before);
    }
}
