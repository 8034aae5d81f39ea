// src/math/types/bounds.rs

use crate::math::{error::*, types::*, utils::comparison};
use std::fmt;

/// 2D Bounding Box (Axis-Aligned Bounding Box)
///
/// Für die Render-Oberfläche gilt `min = (0, 0)` und `max = (width, height)`
/// in Pixeln, y zeigt nach unten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2D {
    pub min: Point2D,
    pub max: Point2D,
}

impl Bounds2D {
    /// Erstellt die Bounding Box einer Render-Oberfläche mit Ursprung oben links.
    /// Breite und Höhe müssen endlich und strikt positiv sein.
    pub fn from_size(width: f32, height: f32) -> MathResult<Self> {
        if !comparison::all_positive_finite(&[width, height]) {
            return Err(MathError::InvalidDimensions { width, height });
        }
        Ok(Self {
            min: Point2D::ZERO,
            max: Point2D::new(width, height),
        })
    }

    /// Erstellt eine Bounding Box die alle Punkte umschließt
    pub fn from_points_iter<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point2D>,
    {
        let mut points_iter = points.into_iter();
        let first_point = points_iter.next()?;

        let mut min = first_point;
        let mut max = first_point;

        for point in points_iter {
            min = min.min(point);
            max = max.max(point);
        }

        Some(Self { min, max })
    }

    pub fn width(&self) -> f32 {
        (self.max.x - self.min.x).max(0.0)
    }

    pub fn height(&self) -> f32 {
        (self.max.y - self.min.y).max(0.0)
    }

    /// Größe der Bounding Box
    pub fn size(&self) -> Point2D {
        Point2D::new(self.width(), self.height())
    }

    /// Zentrum der Bounding Box
    pub fn center(&self) -> Point2D {
        (self.min + self.max) * 0.5
    }

    /// Die größere der beiden Seitenlängen.
    pub fn max_extent(&self) -> f32 {
        self.width().max(self.height())
    }

    /// Skalierungsfaktoren pro Achse, um von `self` auf `other` zu kommen.
    /// Achsen ohne Ausdehnung liefern 1.0.
    pub fn scale_factors_to(&self, other: &Bounds2D) -> Point2D {
        let factor = |from: f32, to: f32| {
            if comparison::nearly_zero(from) {
                1.0
            } else {
                to / from
            }
        };
        Point2D::new(
            factor(self.width(), other.width()),
            factor(self.height(), other.height()),
        )
    }
}

impl fmt::Display for Bounds2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bounds2D({:?} to {:?})", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_size_rejects_degenerate_surfaces() {
        assert!(Bounds2D::from_size(800.0, 600.0).is_ok());
        assert!(matches!(
            Bounds2D::from_size(0.0, 600.0),
            Err(MathError::InvalidDimensions { .. })
        ));
        assert!(Bounds2D::from_size(800.0, -1.0).is_err());
        assert!(Bounds2D::from_size(f32::NAN, 10.0).is_err());
    }

    #[test]
    fn test_scale_factors() {
        let a = Bounds2D::from_size(400.0, 300.0).unwrap();
        let b = Bounds2D::from_size(800.0, 150.0).unwrap();
        assert_eq!(a.scale_factors_to(&b), Vec2::new(2.0, 0.5));
        assert_eq!(a.center(), Vec2::new(200.0, 150.0));
        assert_eq!(b.max_extent(), 800.0);
    }

    #[test]
    fn test_from_points_iter() {
        let bounds = Bounds2D::from_points_iter([
            Vec2::new(3.0, -1.0),
            Vec2::new(-2.0, 4.0),
            Vec2::new(0.0, 0.0),
        ])
        .unwrap();
        assert_eq!(bounds.min, Vec2::new(-2.0, -1.0));
        assert_eq!(bounds.max, Vec2::new(3.0, 4.0));
        assert!(Bounds2D::from_points_iter(std::iter::empty()).is_none());
    }
}
