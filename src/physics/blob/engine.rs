// src/physics/blob/engine.rs

use super::{config::EngineConfig, dynamics};
use crate::math::{
    algorithms::{Blob, BoundaryExtractor, Contour, SampledField},
    error::{MathError, MathResult},
    geometry::{MaskPath, SegmentPath},
    types::Bounds2D,
};
use bevy::log::{debug, info};
use bevy::math::Vec2;

/// Zeigerzustand eines Frames: Position in Pixeln, Geschwindigkeit in Pixeln pro Frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl PointerSample {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self { position, velocity }
    }
}

/// Besitzt die Blob-Liste und treibt sie Tick für Tick voran.
///
/// Der primäre Blob liegt immer an Index 0 und wird nie entfernt. Abkühlzeit und
/// Simulationsuhr sind Instanzzustand, mehrere Engines beeinflussen sich nicht.
#[derive(Debug, Clone)]
pub struct BlobEngine {
    config: EngineConfig,
    bounds: Bounds2D,
    blobs: Vec<Blob>,
    clock_ms: f64,
    last_split_ms: Option<f64>,
    last_pointer: Option<PointerSample>,
}

impl BlobEngine {
    /// Legt die Simulationsfläche fest und erzeugt den primären Blob in deren Mitte.
    pub fn new(config: EngineConfig, width: f32, height: f32) -> MathResult<Self> {
        config.validate()?;
        let bounds = Bounds2D::from_size(width, height)?;
        let primary = Blob::primary(bounds.center(), config.base_radius);

        info!(
            "BlobEngine initialised on {}x{} surface (grid {} px, max {} blobs)",
            width, height, config.grid_resolution, config.max_blobs
        );

        Ok(Self {
            config,
            bounds,
            blobs: vec![primary],
            clock_ms: 0.0,
            last_split_ms: None,
            last_pointer: None,
        })
    }

    pub fn with_defaults(width: f32, height: f32) -> MathResult<Self> {
        Self::new(EngineConfig::default(), width, height)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn bounds(&self) -> Bounds2D {
        self.bounds
    }

    /// Vergangene Simulationszeit in Millisekunden.
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn last_pointer(&self) -> Option<PointerSample> {
        self.last_pointer
    }

    pub fn blobs(&self) -> &[Blob] {
        &self.blobs
    }

    /// Kopie der Blob-Liste für Konsumenten, die über den Frame hinaus halten.
    pub fn snapshot(&self) -> Vec<Blob> {
        self.blobs.clone()
    }

    pub fn blob_count(&self) -> usize {
        self.blobs.len()
    }

    pub fn primary(&self) -> Option<&Blob> {
        self.blobs.first().filter(|blob| blob.is_primary)
    }

    /// Aktueller Wert der Atem-Hüllkurve, zu dem der ruhende Blob zurückkehrt.
    pub fn breathing_baseline(&self) -> f32 {
        dynamics::breathing_baseline(self.clock_ms, &self.config)
    }

    /// Anzahl der Gitterpunkte (x, y), mit denen Marching Squares die Fläche abtastet.
    pub fn grid_dimensions(&self) -> (usize, usize) {
        SampledField::grid_dimensions(&self.bounds, self.config.grid_resolution)
    }

    /// Ein Simulationsschritt. `dt_ms` ist die Framezeit in Millisekunden,
    /// das Ziel die Zeigerposition in Pixeln.
    pub fn update(
        &mut self,
        dt_ms: f32,
        target_x: f32,
        target_y: f32,
        target_vx: f32,
        target_vy: f32,
    ) {
        self.step(
            dt_ms,
            PointerSample::new(
                Vec2::new(target_x, target_y),
                Vec2::new(target_vx, target_vy),
            ),
        );
    }

    /// Wie [`BlobEngine::update`], mit einem fertigen Zeiger-Sample.
    pub fn step(&mut self, dt_ms: f32, pointer: PointerSample) {
        if self.primary().is_none() {
            return;
        }
        let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        self.clock_ms += f64::from(dt_ms);
        self.last_pointer = Some(pointer);

        let config = &self.config;
        let primary = &mut self.blobs[0];
        // Nicht-endliche Ziele halten den Blob an Ort und Stelle
        let target = if pointer.position.is_finite() {
            pointer.position
        } else {
            primary.position
        };
        dynamics::apply_spring(primary, target, config);
        dynamics::update_primary_stretch(primary, self.clock_ms, config);
        let primary = *primary;

        self.try_split(&primary);
        self.update_secondaries(primary.position, dt_ms);
        self.merge_into_primary();
    }

    fn try_split(&mut self, primary: &Blob) {
        let cooled_down = self.last_split_ms.is_none_or(|last| {
            self.clock_ms - last >= f64::from(self.config.split_cooldown_ms)
        });
        if !cooled_down || self.blobs.len() >= self.config.max_blobs {
            return;
        }
        if let Some(droplet) = dynamics::split_droplet(primary, &self.config) {
            debug!(
                "Split at t={:.0} ms: droplet at {:?} (primary speed {:.1})",
                self.clock_ms,
                droplet.position,
                primary.speed()
            );
            self.blobs.push(droplet);
            self.last_split_ms = Some(self.clock_ms);
        }
    }

    fn update_secondaries(&mut self, primary_position: Vec2, dt_ms: f32) {
        let (clock_ms, config) = (self.clock_ms, &self.config);
        for blob in self.blobs.iter_mut().filter(|blob| !blob.is_primary) {
            dynamics::update_secondary(blob, primary_position, dt_ms, clock_ms, config);
        }

        let before = self.blobs.len();
        self.blobs.retain(|blob| blob.is_primary || blob.life > 0.0);
        let expired = before - self.blobs.len();
        if expired > 0 {
            debug!("{} secondary blob(s) expired", expired);
        }
    }

    fn merge_into_primary(&mut self) {
        let Some(primary) = self.primary().copied() else {
            return;
        };
        let merge_radius = self.config.merge_distance * primary.radius;
        let absorb = self.config.absorb_fraction;

        let mut kick = Vec2::ZERO;
        let mut merged = 0usize;
        self.blobs.retain(|blob| {
            if blob.is_primary || blob.position.distance(primary.position) >= merge_radius {
                return true;
            }
            kick += blob.velocity * absorb;
            merged += 1;
            false
        });

        if merged > 0 {
            self.blobs[0].velocity += kick;
            debug!("{} secondary blob(s) merged, kick {:?}", merged, kick);
        }
    }

    /// Fügt einen sekundären Blob ein, sofern `max_blobs` es erlaubt. Der Radius
    /// entspricht dem eines frisch abgespaltenen Tropfens.
    pub fn spawn_secondary(&mut self, position: Vec2, velocity: Vec2) -> bool {
        if self.primary().is_none()
            || self.blobs.len() >= self.config.max_blobs
            || !position.is_finite()
            || !velocity.is_finite()
        {
            return false;
        }
        let radius = self.config.base_radius * dynamics::SECONDARY_RADIUS_FACTOR;
        self.blobs.push(Blob::secondary(position, velocity, radius));
        true
    }

    /// Setzt den primären Blob ohne Geschwindigkeit an eine neue Position.
    pub fn set_primary_position(&mut self, x: f32, y: f32) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        if let Some(primary) = self.blobs.first_mut().filter(|blob| blob.is_primary) {
            primary.position = Vec2::new(x, y);
            primary.velocity = Vec2::ZERO;
        }
    }

    /// Passt die Fläche an und skaliert alle Blob-Positionen proportional mit.
    pub fn resize(&mut self, width: f32, height: f32) -> MathResult<()> {
        let new_bounds = Bounds2D::from_size(width, height)?;
        let factors = self.bounds.scale_factors_to(&new_bounds);
        for blob in &mut self.blobs {
            blob.position = new_bounds.min + (blob.position - self.bounds.min) * factors;
        }
        info!(
            "BlobEngine resized from {} to {} (scale {:?})",
            self.bounds, new_bounds, factors
        );
        self.bounds = new_bounds;
        Ok(())
    }

    /// Entfernt alle sekundären Blobs und zentriert den primären Blob neu.
    pub fn reset(&mut self) {
        self.blobs.clear();
        self.blobs
            .push(Blob::primary(self.bounds.center(), self.config.base_radius));
        self.last_split_ms = None;
        info!("BlobEngine reset, primary recentred at {:?}", self.bounds.center());
    }

    /// Übernimmt eine neue Konfiguration zur Laufzeit. Ungültige Werte werden
    /// abgelehnt, die bisherige Konfiguration bleibt dann aktiv.
    pub fn apply_config(&mut self, config: EngineConfig) -> MathResult<()> {
        config.validate()?;
        if let Some(primary) = self.blobs.first_mut() {
            primary.radius = config.base_radius;
        }
        if self.blobs.len() > config.max_blobs {
            // Die jüngsten Tropfen fallen zuerst weg
            self.blobs.truncate(config.max_blobs);
        }
        self.config = config;
        Ok(())
    }

    /// Extraktor über den aktuellen Blobs und der Konfiguration.
    pub fn extractor(&self) -> BoundaryExtractor<'_> {
        BoundaryExtractor::new(&self.blobs, self.bounds, self.config.boundary_settings())
    }

    pub fn field_at(&self, x: f32, y: f32) -> f32 {
        self.extractor().field().field_at(x, y)
    }

    pub fn is_inside(&self, x: f32, y: f32) -> bool {
        self.extractor().field().is_inside_xy(x, y)
    }

    /// Marching-Squares-Segmente der Iso-Linie.
    pub fn boundary_path(&self) -> SegmentPath {
        self.extractor().boundary_path()
    }

    /// Geschlossene, füllbare Kontur aus dem Strahlenverfahren.
    pub fn filled_boundary_path(&self) -> MaskPath {
        self.extractor().filled_boundary_path()
    }

    /// Zu Polylinien verbundene Marching-Squares-Segmente.
    pub fn traced_contours(&self) -> Vec<Contour> {
        self.extractor().traced_contours()
    }
}

impl TryFrom<(f32, f32)> for BlobEngine {
    type Error = MathError;

    fn try_from((width, height): (f32, f32)) -> MathResult<Self> {
        Self::with_defaults(width, height)
    }
}
