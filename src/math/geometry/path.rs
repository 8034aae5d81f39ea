// src/math/geometry/path.rs

use crate::math::types::Bounds2D;
use bevy::math::Vec2;
use svg::node::element::path::Data;

/// Anzahl der Stützpunkte pro Kurvensegment beim Abflachen für Hit-Tests.
const DEFAULT_FLATTEN_STEPS: usize = 8;

/// Ein Liniensegment der Iso-Kontur.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Prüft, ob beide Segmente einen Endpunkt (innerhalb `tolerance`) teilen.
    pub fn touches(&self, other: &Segment, tolerance: f32) -> bool {
        [self.start, self.end].iter().any(|a| {
            [other.start, other.end]
                .iter()
                .any(|b| a.distance(*b) <= tolerance)
        })
    }
}

/// Unverbundene Segmentmenge aus Marching Squares; zum Stroken gedacht.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentPath {
    pub segments: Vec<Segment>,
}

impl SegmentPath {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// SVG-Pfaddaten: ein `M … L …` Paar pro Segment.
    pub fn to_svg_data(&self) -> Data {
        self.segments.iter().fold(Data::new(), |data, segment| {
            data.move_to((segment.start.x, segment.start.y))
                .line_to((segment.end.x, segment.end.y))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Vec2),
    QuadTo { control: Vec2, to: Vec2 },
    Close,
}

/// Geschlossener, füllbarer Pfad (z.B. als Maske über einem Video).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaskPath {
    commands: Vec<PathCommand>,
}

impl MaskPath {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Verbindet die Punkte in gegebener Reihenfolge mit quadratischen Kurven.
    /// Jeder Punkt dient als Kontrollpunkt, die Kurven laufen durch die
    /// Kantenmittelpunkte; der Pfad wird geschlossen.
    /// Weniger als drei Punkte ergeben einen leeren Pfad.
    pub fn smooth_closed(points: &[Vec2]) -> Self {
        let n = points.len();
        if n < 3 {
            return Self::empty();
        }

        let midpoint = |i: usize| (points[i] + points[(i + 1) % n]) * 0.5;

        let mut commands = Vec::with_capacity(n + 2);
        commands.push(PathCommand::MoveTo(midpoint(n - 1)));
        for (i, control) in points.iter().enumerate() {
            commands.push(PathCommand::QuadTo {
                control: *control,
                to: midpoint(i),
            });
        }
        commands.push(PathCommand::Close);
        Self { commands }
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Flacht den Pfad zu Polygonzügen ab, einer pro `MoveTo`.
    /// Kurven werden mit `steps` Stützpunkten abgetastet.
    pub fn flatten(&self, steps: usize) -> Vec<Vec<Vec2>> {
        let steps = steps.max(1);
        let mut polylines: Vec<Vec<Vec2>> = Vec::new();
        let mut cursor = Vec2::ZERO;

        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(point) => {
                    polylines.push(vec![point]);
                    cursor = point;
                }
                PathCommand::QuadTo { control, to } => {
                    if let Some(current) = polylines.last_mut() {
                        for step in 1..=steps {
                            let t = step as f32 / steps as f32;
                            current.push(quadratic_point(cursor, control, to, t));
                        }
                    }
                    cursor = to;
                }
                // Polygone werden implizit geschlossen
                PathCommand::Close => {}
            }
        }
        polylines.retain(|polyline| polyline.len() >= 3);
        polylines
    }

    /// Even-odd Hit-Test gegen die abgeflachte Fläche.
    pub fn contains(&self, point: Vec2) -> bool {
        self.flatten(DEFAULT_FLATTEN_STEPS)
            .iter()
            .filter(|polygon| polygon_contains(polygon, point))
            .count()
            % 2
            == 1
    }

    pub fn bounds(&self) -> Option<Bounds2D> {
        Bounds2D::from_points_iter(self.flatten(DEFAULT_FLATTEN_STEPS).into_iter().flatten())
    }

    pub fn to_svg_data(&self) -> Data {
        self.commands
            .iter()
            .fold(Data::new(), |data, command| match *command {
                PathCommand::MoveTo(p) => data.move_to((p.x, p.y)),
                PathCommand::QuadTo { control, to } => {
                    data.quadratic_curve_to((control.x, control.y, to.x, to.y))
                }
                PathCommand::Close => data.close(),
            })
    }
}

fn quadratic_point(from: Vec2, control: Vec2, to: Vec2, t: f32) -> Vec2 {
    let inv = 1.0 - t;
    from * (inv * inv) + control * (2.0 * inv * t) + to * (t * t)
}

/// Strahltest (crossing number) für ein implizit geschlossenes Polygon.
fn polygon_contains(polygon: &[Vec2], point: Vec2) -> bool {
    let mut inside = false;
    let n = polygon.len();
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
