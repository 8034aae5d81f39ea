// src/math/algorithms/marching_squares.rs

use crate::math::geometry::Segment;
use crate::math::scalar_field::ScalarField2D;
use crate::math::utils::{comparison, constants};
use bevy::math::Vec2;
use std::collections::HashMap;

/// Repräsentiert eine extrahierte Konturlinie (Iso-Linie) aus einem Skalarfeld.
#[derive(Debug, Clone, Default)]
pub struct Contour {
    pub vertices: Vec<Vec2>,
    pub is_closed: bool,
}

impl Contour {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, vertex: Vec2) {
        self.vertices.push(vertex);
    }

    pub fn close(&mut self) {
        if self.vertices.len() >= 3 {
            self.is_closed = true;
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Fläche nach der Gaußschen Trapezformel; 0.0 für offene Konturen.
    pub fn area(&self) -> f32 {
        if !self.is_closed || self.vertices.len() < 3 {
            return 0.0;
        }
        let n = self.vertices.len();
        let twice_area: f32 = (0..n)
            .map(|i| {
                let p1 = self.vertices[i];
                let p2 = self.vertices[(i + 1) % n];
                p1.x * p2.y - p2.x * p1.y
            })
            .sum();
        (twice_area * 0.5).abs()
    }
}

/// Kante einer Gitterzelle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellEdge {
    Top,
    Right,
    Bottom,
    Left,
}

/// Ein Liniensegment innerhalb einer Zelle, angegeben über die beiden geschnittenen Kanten.
pub type EdgePair = (CellEdge, CellEdge);

/// Konfiguration einer Zelle nach Klassifikation ihrer vier Ecken.
///
/// Bit-Reihenfolge des Index: oben-links = 8, oben-rechts = 4,
/// unten-rechts = 2, unten-links = 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellCase {
    /// Alle Ecken außen (Index 0).
    Empty,
    /// Alle Ecken innen (Index 15).
    Full,
    /// Genau ein Segment.
    Single(EdgePair),
    /// Diagonal gegenüberliegende Ecken innen (Index 5 und 10): immer zwei
    /// disjunkte Segmente. `separated` trennt die beiden inneren Ecken,
    /// `joined` verbindet sie über die Zellmitte hinweg.
    Saddle {
        separated: [EdgePair; 2],
        joined: [EdgePair; 2],
    },
}

impl CellCase {
    pub const fn from_index(index: u8) -> Self {
        use CellEdge::*;
        match index & 0b1111 {
            0 => CellCase::Empty,
            1 => CellCase::Single((Left, Bottom)),
            2 => CellCase::Single((Bottom, Right)),
            3 => CellCase::Single((Left, Right)),
            4 => CellCase::Single((Top, Right)),
            // TR + BL innen
            5 => CellCase::Saddle {
                separated: [(Top, Right), (Left, Bottom)],
                joined: [(Left, Top), (Bottom, Right)],
            },
            6 => CellCase::Single((Top, Bottom)),
            7 => CellCase::Single((Left, Top)),
            8 => CellCase::Single((Left, Top)),
            9 => CellCase::Single((Top, Bottom)),
            // TL + BR innen
            10 => CellCase::Saddle {
                separated: [(Left, Top), (Bottom, Right)],
                joined: [(Top, Right), (Left, Bottom)],
            },
            11 => CellCase::Single((Top, Right)),
            12 => CellCase::Single((Left, Right)),
            13 => CellCase::Single((Bottom, Right)),
            14 => CellCase::Single((Left, Bottom)),
            _ => CellCase::Full,
        }
    }
}

/// Die vier Eckwerte einer Zelle samt ihrer Weltkoordinaten.
/// Benachbarte Zellen erhalten für gemeinsame Ecken bitgleiche Positionen,
/// damit Schnittpunkte auf gemeinsamen Kanten exakt übereinstimmen.
#[derive(Debug, Clone, Copy)]
struct CellCorners {
    top_left: f32,
    top_right: f32,
    bottom_right: f32,
    bottom_left: f32,
    /// Positionen in der Reihenfolge TL, TR, BR, BL.
    positions: [Vec2; 4],
}

impl CellCorners {
    fn index(&self, threshold: f32) -> u8 {
        let mut config_idx = 0;
        if self.top_left >= threshold {
            config_idx |= 8;
        }
        if self.top_right >= threshold {
            config_idx |= 4;
        }
        if self.bottom_right >= threshold {
            config_idx |= 2;
        }
        if self.bottom_left >= threshold {
            config_idx |= 1;
        }
        config_idx
    }

    fn center_value(&self) -> f32 {
        (self.top_left + self.top_right + self.bottom_right + self.bottom_left) * 0.25
    }

    /// Schnittpunkt der Iso-Linie mit `edge` per inverser linearer Interpolation.
    fn crossing(&self, edge: CellEdge, threshold: f32) -> Vec2 {
        let [tl, tr, br, bl] = self.positions;

        let (v0, v1, p0, p1) = match edge {
            CellEdge::Top => (self.top_left, self.top_right, tl, tr),
            CellEdge::Right => (self.top_right, self.bottom_right, tr, br),
            CellEdge::Bottom => (self.bottom_left, self.bottom_right, bl, br),
            CellEdge::Left => (self.top_left, self.bottom_left, tl, bl),
        };

        match comparison::inverse_lerp(v0, v1, threshold) {
            Some(t) => p0.lerp(p1, t.clamp(0.0, 1.0)),
            None => (p0 + p1) * 0.5,
        }
    }

    fn segment(&self, (from, to): EdgePair, threshold: f32) -> Segment {
        Segment::new(self.crossing(from, threshold), self.crossing(to, threshold))
    }
}

pub struct MarchingSquares;

impl MarchingSquares {
    /// Extrahiert alle Segmente der Iso-Linie `field = threshold`.
    /// Das Ergebnis ist eine unverbundene Segmentmenge, Zelle für Zelle.
    pub fn extract_segments<F: ScalarField2D + ?Sized>(field: &F, threshold: f32) -> Vec<Segment> {
        let (width, height) = (field.width(), field.height());
        if width <= 1 || height <= 1 {
            return Vec::new();
        }

        let mut segments = Vec::new();
        for y in 0..height - 1 {
            for x in 0..width - 1 {
                let corners = CellCorners {
                    top_left: field.get_value(x, y),
                    top_right: field.get_value(x + 1, y),
                    bottom_right: field.get_value(x + 1, y + 1),
                    bottom_left: field.get_value(x, y + 1),
                    positions: [
                        field.cell_to_world(x, y),
                        field.cell_to_world(x + 1, y),
                        field.cell_to_world(x + 1, y + 1),
                        field.cell_to_world(x, y + 1),
                    ],
                };
                Self::emit_cell(&corners, threshold, &mut segments);
            }
        }
        segments
    }

    fn emit_cell(corners: &CellCorners, threshold: f32, out: &mut Vec<Segment>) {
        let case = CellCase::from_index(corners.index(threshold));
        let pairs: &[EdgePair] = match &case {
            CellCase::Empty | CellCase::Full => return,
            CellCase::Single(pair) => std::slice::from_ref(pair),
            CellCase::Saddle { separated, joined } => {
                // Mittelwert als Schätzung des Feldes in der Zellmitte
                if corners.center_value() >= threshold {
                    joined
                } else {
                    separated
                }
            }
        };
        // Liegt ein Gitterpunkt exakt auf dem Schwellenwert, entstehen
        // Segmente der Länge 0; die Nachbarzellen decken den Punkt bereits ab.
        out.extend(
            pairs
                .iter()
                .map(|pair| corners.segment(*pair, threshold))
                .filter(|segment| segment.length() > constants::EPSILON),
        );
    }

    /// Fügt eine Segmentmenge zu Polylinien zusammen. Endpunkte gelten als
    /// identisch, wenn sie in dieselbe Rasterzelle der Größe `tolerance` fallen.
    /// Kehrt ein Zug zu seinem Anfang zurück, wird er als geschlossen markiert.
    pub fn stitch_segments(segments: &[Segment], tolerance: f32) -> Vec<Contour> {
        let tolerance = tolerance.max(f32::EPSILON);
        let key = |p: Vec2| {
            (
                (p.x / tolerance).round() as i64,
                (p.y / tolerance).round() as i64,
            )
        };

        let mut endpoints: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
        for (i, segment) in segments.iter().enumerate() {
            endpoints.entry(key(segment.start)).or_default().push(i);
            endpoints.entry(key(segment.end)).or_default().push(i);
        }

        let mut used = vec![false; segments.len()];
        let mut contours = Vec::new();

        for first in 0..segments.len() {
            if used[first] {
                continue;
            }
            used[first] = true;

            let mut contour = Contour::new();
            contour.add_vertex(segments[first].start);
            contour.add_vertex(segments[first].end);
            let start_key = key(segments[first].start);
            let mut tail = segments[first].end;

            while let Some(next) = endpoints.get(&key(tail)).and_then(|candidates| {
                candidates.iter().copied().find(|candidate| !used[*candidate])
            }) {
                used[next] = true;
                let segment = segments[next];
                tail = if key(segment.start) == key(tail) {
                    segment.end
                } else {
                    segment.start
                };
                if key(tail) == start_key {
                    break;
                }
                contour.add_vertex(tail);
            }

            if key(tail) == start_key {
                contour.close();
            }
            contours.push(contour);
        }
        contours
    }
}
