// src/debug/visualization/svg.rs
use crate::math::{
    algorithms::Blob,
    error::MathResult,
    geometry::{MaskPath, SegmentPath},
    types::Bounds2D,
};
use crate::physics::blob::BlobEngine;
use crate::physics::sim::resources::BlobSimulation;
use bevy::log::{error, info};
use bevy::prelude::{ButtonInput, KeyCode, Res, ResMut, Resource};
use std::path::{Path, PathBuf};
use svg::Document;
use svg::node::element::{Circle, Path as SvgPath, Rectangle};

/// Stil und Ebenen eines SVG-Snapshots der Maske.
#[derive(Debug, Clone)]
pub struct MaskSvgExporter {
    pub background: String,
    pub mask_fill: String,
    pub segment_stroke: String,
    /// Linienstärke relativ zur mittleren Kantenlänge der Fläche.
    pub relative_stroke_width: f32,
    pub include_segments: bool,
    pub include_blob_centres: bool,
}

impl Default for MaskSvgExporter {
    fn default() -> Self {
        Self {
            background: "#101014".to_string(),
            mask_fill: "#ffffff".to_string(),
            segment_stroke: "#33e6ff".to_string(),
            relative_stroke_width: 0.002,
            include_segments: true,
            include_blob_centres: true,
        }
    }
}

impl MaskSvgExporter {
    /// Baut das Dokument für den aktuellen Zustand der Engine.
    pub fn document(&self, engine: &BlobEngine) -> Document {
        self.compose(
            &engine.bounds(),
            engine.blobs(),
            &engine.filled_boundary_path(),
            &engine.boundary_path(),
        )
    }

    pub fn compose(
        &self,
        bounds: &Bounds2D,
        blobs: &[Blob],
        filled: &MaskPath,
        segments: &SegmentPath,
    ) -> Document {
        let stroke_width = (bounds.width() + bounds.height()) * 0.5 * self.relative_stroke_width;

        let mut document = Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    bounds.min.x,
                    bounds.min.y,
                    bounds.width(),
                    bounds.height()
                ),
            )
            .set("width", bounds.width())
            .set("height", bounds.height())
            .add(
                Rectangle::new()
                    .set("x", bounds.min.x)
                    .set("y", bounds.min.y)
                    .set("width", bounds.width())
                    .set("height", bounds.height())
                    .set("fill", self.background.as_str()),
            );

        if !filled.is_empty() {
            document = document.add(
                SvgPath::new()
                    .set("class", "mask")
                    .set("fill", self.mask_fill.as_str())
                    .set("d", filled.to_svg_data()),
            );
        }

        if self.include_segments && !segments.is_empty() {
            document = document.add(
                SvgPath::new()
                    .set("class", "iso-segments")
                    .set("fill", "none")
                    .set("stroke", self.segment_stroke.as_str())
                    .set("stroke-width", stroke_width)
                    .set("d", segments.to_svg_data()),
            );
        }

        if self.include_blob_centres {
            for blob in blobs {
                let color = if blob.is_primary { "#ff8800" } else { "#ffdd00" };
                document = document.add(
                    Circle::new()
                        .set("cx", blob.position.x)
                        .set("cy", blob.position.y)
                        .set("r", stroke_width * 2.0)
                        .set("fill", color),
                );
            }
        }

        document
    }

    pub fn save(&self, engine: &BlobEngine, path: impl AsRef<Path>) -> MathResult<()> {
        let path = path.as_ref();
        svg::save(path, &self.document(engine))?;
        info!(
            "Mask SVG with {} blob(s) written to {}",
            engine.blob_count(),
            path.display()
        );
        Ok(())
    }
}

/// Zielverzeichnis und Zähler für SVG-Snapshots aus der Demo.
#[derive(Resource, Debug)]
pub struct SvgExportSettings {
    pub directory: PathBuf,
    pub exporter: MaskSvgExporter,
    /// Vom Steuerpanel gesetzt, vom Exportsystem zurückgesetzt.
    pub requested: bool,
    next_index: u32,
}

impl Default for SvgExportSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            exporter: MaskSvgExporter::default(),
            requested: false,
            next_index: 0,
        }
    }
}

impl SvgExportSettings {
    pub fn next_path(&mut self) -> PathBuf {
        let path = self
            .directory
            .join(format!("blob_mask_{:04}.svg", self.next_index));
        self.next_index += 1;
        path
    }
}

/// `S` oder die Schaltfläche im Panel schreiben einen Snapshot.
pub fn svg_export_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut settings: ResMut<SvgExportSettings>,
    sim: Res<BlobSimulation>,
) {
    if !(keys.just_pressed(KeyCode::KeyS) || settings.requested) {
        return;
    }
    settings.requested = false;
    let path = settings.next_path();
    if let Err(err) = settings.exporter.save(&sim.engine, &path) {
        error!("SVG export to {} failed: {}", path.display(), err);
    }
}
