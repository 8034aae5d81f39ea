// src/debug/visualization/overlay.rs

use crate::math::{algorithms::Blob, geometry::MaskPath, types::Bounds2D, utils::constants::TAU};
use crate::physics::sim::resources::{BlobSimulation, OverlaySettings};
use bevy::prelude::*;

const FLATTEN_STEPS: usize = 4;
const BLOB_OUTLINE_SEGMENTS: usize = 48;

/// Flächenkoordinaten (Pixel, oben links, y nach unten) in Weltkoordinaten der
/// 2D-Kamera (Fenstermitte, y nach oben).
pub fn surface_to_world(point: Vec2, bounds: &Bounds2D) -> Vec2 {
    let center = bounds.center();
    Vec2::new(point.x - center.x, center.y - point.y)
}

/// Umriss eines gestreckten Blobs auf Höhe seines Radius.
pub fn blob_outline(blob: &Blob, segments: usize) -> Vec<Vec2> {
    let segments = segments.max(3);
    (0..=segments)
        .map(|i| {
            let angle = TAU * i as f32 / segments as f32;
            blob.position
                + Vec2::new(
                    angle.cos() * blob.radius * blob.stretch.x,
                    angle.sin() * blob.radius * blob.stretch.y,
                )
        })
        .collect()
}

/// Mittelpunkt (Welt) und Größe des achsenparallelen Rahmens um die Maske.
pub fn mask_frame(path: &MaskPath, bounds: &Bounds2D) -> Option<(Vec2, Vec2)> {
    let extent = path.bounds()?;
    Some((surface_to_world(extent.center(), bounds), extent.size()))
}

pub fn draw_blob_overlay_system(
    sim: Res<BlobSimulation>,
    settings: Res<OverlaySettings>,
    mut gizmos: Gizmos,
) {
    let engine = &sim.engine;
    let bounds = engine.bounds();
    let to_world = |point: Vec2| surface_to_world(point, &bounds);

    if settings.show_grid_bounds {
        gizmos.rect_2d(Vec2::ZERO, 0.0, bounds.size(), Color::DARK_GRAY);
        if let Some((centre, size)) = mask_frame(&engine.filled_boundary_path(), &bounds) {
            gizmos.rect_2d(centre, 0.0, size, Color::GRAY);
        }
    }

    if settings.show_segments {
        for segment in engine.boundary_path().iter() {
            gizmos.line_2d(
                to_world(segment.start),
                to_world(segment.end),
                settings.segment_color,
            );
        }
    }

    if settings.show_filled_path {
        for polyline in engine.filled_boundary_path().flatten(FLATTEN_STEPS) {
            let mut points: Vec<Vec2> = polyline.iter().copied().map(to_world).collect();
            if let Some(first) = points.first().copied() {
                points.push(first);
            }
            gizmos.linestrip_2d(points, settings.filled_color);
        }
    }

    if settings.show_blobs {
        for blob in engine.blobs() {
            let color = if blob.is_primary {
                settings.primary_color
            } else {
                settings.secondary_color
            };
            let outline = blob_outline(blob, BLOB_OUTLINE_SEGMENTS);
            gizmos.linestrip_2d(outline.into_iter().map(to_world), color);
            gizmos.circle_2d(to_world(blob.position), 2.0, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_surface_to_world() {
        let bounds = Bounds2D::from_size(800.0, 600.0).unwrap();
        assert_eq!(surface_to_world(Vec2::new(400.0, 300.0), &bounds), Vec2::ZERO);
        assert_eq!(
            surface_to_world(Vec2::new(0.0, 0.0), &bounds),
            Vec2::new(-400.0, 300.0)
        );
        assert_eq!(
            surface_to_world(Vec2::new(800.0, 600.0), &bounds),
            Vec2::new(400.0, -300.0)
        );
    }

    #[test]
    fn test_blob_outline_follows_stretch() {
        let mut blob = Blob::primary(Vec2::new(10.0, 20.0), 100.0);
        blob.stretch = Vec2::new(1.5, 0.5);
        let outline = blob_outline(&blob, 4);
        assert_eq!(outline.len(), 5);
        assert_relative_eq!(outline[0].x, 160.0, epsilon = 1e-3);
        assert_relative_eq!(outline[1].y, 70.0, epsilon = 1e-3);
        assert_relative_eq!(outline[4].x, outline[0].x, epsilon = 1e-3);
    }

    #[test]
    fn test_mask_frame_centres_on_mask() {
        let bounds = Bounds2D::from_size(800.0, 600.0).unwrap();
        assert!(mask_frame(&MaskPath::empty(), &bounds).is_none());

        let square = MaskPath::smooth_closed(&[
            Vec2::new(390.0, 290.0),
            Vec2::new(410.0, 290.0),
            Vec2::new(410.0, 310.0),
            Vec2::new(390.0, 310.0),
        ]);
        let (centre, size) = mask_frame(&square, &bounds).unwrap();
        assert_relative_eq!(centre.x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(centre.y, 0.0, epsilon = 1e-3);
        assert!(size.x > 0.0 && size.x <= 20.0);
        assert_relative_eq!(size.x, size.y, epsilon = 1e-3);
    }
}
