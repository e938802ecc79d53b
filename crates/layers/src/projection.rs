//! Projection state and fitting.
//!
//! The scale is fitted once per `(collection, viewport)` pair. Rotation never
//! triggers a refit; it only changes the projection handed to the path
//! generator.

use foundation::Aabb2;
use foundation::math::{Orthographic, Rotation, Vec2};
use scene::{CollectionId, FeatureCollection};
use tracing::debug;

use crate::path::PathGenerator;

/// Size of the drawing area in device-independent pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Fit {
    pub scale: f64,
    pub translate: Vec2,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum RefitOutcome {
    /// A new fit was computed.
    Fitted(Fit),
    /// Same collection and viewport as last time.
    Unchanged(Fit),
    /// The viewport was unusable; the previous fit stays in effect.
    KeptLast(Fit),
    /// Nothing to draw yet.
    NotReady,
}

impl RefitOutcome {
    pub fn fit(&self) -> Option<Fit> {
        match *self {
            RefitOutcome::Fitted(f) | RefitOutcome::Unchanged(f) | RefitOutcome::KeptLast(f) => {
                Some(f)
            }
            RefitOutcome::NotReady => None,
        }
    }
}

/// Inscribes `collection`, projected at zero rotation, into `viewport`.
///
/// A collection with no visible extent at zero rotation is fitted as the
/// whole globe.
pub fn fit_collection(
    collection: &FeatureCollection,
    viewport: Viewport,
    precision_px: f64,
) -> Option<Fit> {
    if !viewport.is_valid() || collection.is_empty() {
        return None;
    }
    let reference = PathGenerator::new(
        Orthographic::new(Rotation::default(), Orthographic::REFERENCE_SCALE, Vec2::default()),
        precision_px,
    );
    let mut bounds = Aabb2::empty();
    for feature in collection.features() {
        let b = reference.bounds(&feature.geometry);
        if !b.is_empty() {
            bounds.extend(Vec2::new(b.min[0], b.min[1]));
            bounds.extend(Vec2::new(b.max[0], b.max[1]));
        }
    }

    let (bw, bh) = if bounds.is_empty() {
        let d = 2.0 * Orthographic::REFERENCE_SCALE;
        (d, d)
    } else {
        (bounds.width(), bounds.height())
    };
    let k = match (bw > 0.0, bh > 0.0) {
        (true, true) => (viewport.width / bw).min(viewport.height / bh),
        (true, false) => viewport.width / bw,
        (false, true) => viewport.height / bh,
        (false, false) => viewport.width.min(viewport.height) / (2.0 * Orthographic::REFERENCE_SCALE),
    };
    Some(Fit {
        scale: Orthographic::REFERENCE_SCALE * k,
        translate: viewport.center(),
    })
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct FitKey {
    collection: CollectionId,
    viewport: Viewport,
}

#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    rotation: Rotation,
    precision_px: f64,
    fit: Option<(FitKey, Fit)>,
}

impl ProjectionEngine {
    pub fn new(precision_px: f64) -> Self {
        Self {
            rotation: Rotation::default(),
            precision_px,
            fit: None,
        }
    }

    pub fn refit(&mut self, collection: &FeatureCollection, viewport: Viewport) -> RefitOutcome {
        if collection.is_empty() {
            debug!("no features loaded; projection not ready");
            return RefitOutcome::NotReady;
        }
        let key = FitKey {
            collection: collection.id(),
            viewport,
        };
        if let Some((last_key, fit)) = self.fit {
            if last_key == key {
                return RefitOutcome::Unchanged(fit);
            }
        }
        match fit_collection(collection, viewport, self.precision_px) {
            Some(fit) => {
                debug!(
                    scale = fit.scale,
                    width = viewport.width,
                    height = viewport.height,
                    "fitted projection"
                );
                self.fit = Some((key, fit));
                RefitOutcome::Fitted(fit)
            }
            None => {
                debug!(
                    width = viewport.width,
                    height = viewport.height,
                    "degenerate viewport; keeping last projection"
                );
                match self.fit {
                    Some((_, fit)) => RefitOutcome::KeptLast(fit),
                    None => RefitOutcome::NotReady,
                }
            }
        }
    }

    pub fn fit(&self) -> Option<Fit> {
        self.fit.map(|(_, fit)| fit)
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Non-finite rotations are ignored.
    pub fn set_rotation(&mut self, rotation: Rotation) {
        if rotation.is_finite() {
            self.rotation = rotation;
        }
    }

    pub fn projection(&self) -> Option<Orthographic> {
        self.fit()
            .map(|fit| Orthographic::new(self.rotation, fit.scale, fit.translate))
    }

    pub fn path_generator(&self) -> Option<PathGenerator> {
        self.projection()
            .map(|projection| PathGenerator::new(projection, self.precision_px))
    }
}
