//! The interactive globe.
//!
//! `GlobeView` wires the projection engine, rotation controller, feature
//! renderer and legend together. Callers push data, viewport and metric in,
//! forward pointer input, advance time with [`GlobeView::tick`], and drain
//! [`GlobeEvent`]s out. Nothing here blocks on a transition.

use foundation::math::{Rotation, Vec2};
use render::{RenderCommand, RenderFrame, Surface};
use runtime::{Easing, Event, EventBus, Frame};
use scene::{FeatureCollection, FeatureId, Metric, SelectionEvent};
use tracing::debug;

use crate::choropleth::{FeatureRenderer, FillRule, RedrawMode};
use crate::config::{ConfigError, GlobeConfig, Palette};
use crate::legend::Legend;
use crate::picking::pick_feature;
use crate::projection::{Fit, ProjectionEngine, RefitOutcome, Viewport};
use crate::rotation::RotationController;
use crate::symbology::DivergingScale;

#[derive(Debug, Clone, PartialEq)]
pub enum GlobeEvent {
    /// A country was clicked.
    Selected(SelectionEvent),
    /// The first drag started; the rotate hint can be hidden.
    FirstInteraction,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RenderStatus {
    Presented,
    NotReady,
}

pub struct GlobeView {
    collection: FeatureCollection,
    viewport: Viewport,
    fill: FillRule,
    palette: Palette,
    compact: bool,
    engine: ProjectionEngine,
    controller: RotationController,
    renderer: FeatureRenderer,
    legend: Legend,
    frame: Frame,
    events: EventBus<GlobeEvent>,
}

impl Default for GlobeView {
    fn default() -> Self {
        Self::from_parts(&GlobeConfig::default(), DivergingScale::default(), Palette::default())
    }
}

impl GlobeView {
    pub fn new(config: &GlobeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(config, config.diverging_scale()?, config.palette()?))
    }

    fn from_parts(config: &GlobeConfig, scale: DivergingScale, palette: Palette) -> Self {
        let metric = Metric::default();
        Self {
            collection: FeatureCollection::empty(),
            viewport: Viewport::new(0.0, 0.0),
            fill: FillRule {
                scale,
                metric,
                policy: config.no_data_policy,
                no_data_fill: palette.no_data,
            },
            palette,
            compact: config.compact,
            engine: ProjectionEngine::new(config.precision_px),
            controller: RotationController::new(config.drag_sensitivity),
            renderer: FeatureRenderer::new(config.transition_s, Easing::CubicInOut),
            legend: Legend::generate(&scale, metric, palette.no_data, config.compact),
            frame: Frame::start(),
            events: EventBus::new(),
        }
    }

    /// Replaces the dataset (for example after a date change).
    pub fn set_features(&mut self, collection: FeatureCollection) {
        self.collection = collection;
        self.refresh();
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.refresh();
    }

    pub fn set_metric(&mut self, metric: Metric) {
        if metric == self.fill.metric {
            return;
        }
        self.fill.metric = metric;
        self.legend = Legend::generate(&self.fill.scale, metric, self.palette.no_data, self.compact);
        self.redraw(self.controller.redraw_mode());
    }

    pub fn drag_start(&mut self) {
        let first = !self.controller.has_interacted();
        self.controller.drag_start();
        if first {
            self.events.emit(self.frame, GlobeEvent::FirstInteraction);
        }
    }

    /// Rotates by a pointer delta and redraws immediately.
    ///
    /// Returns `false` when the move was ignored (idle, or nothing fitted).
    pub fn drag_move(&mut self, dx: f64, dy: f64) -> bool {
        let Some(fit) = self.engine.fit() else {
            return false;
        };
        let Some(next) = self
            .controller
            .drag_move(dx, dy, fit.scale, self.engine.rotation())
        else {
            return false;
        };
        self.engine.set_rotation(next);
        self.redraw(RedrawMode::Instant);
        true
    }

    pub fn drag_end(&mut self) {
        self.controller.drag_end();
    }

    /// Advances the clock by `dt_s` seconds. Returns `true` while a
    /// transition is still running.
    pub fn tick(&mut self, dt_s: f64) -> bool {
        self.frame = self.frame.advance(dt_s);
        self.renderer.tick(self.frame.time)
    }

    /// Topmost feature under a screen point.
    pub fn pick(&self, point: Vec2) -> Option<FeatureId> {
        if self.collection.is_empty() {
            return None;
        }
        pick_feature(self.renderer.displayed_paths(), point)
    }

    /// Emits a selection for `id`. Projection and rotation are untouched.
    pub fn click(&mut self, id: FeatureId) -> Option<SelectionEvent> {
        let selection = SelectionEvent::from_feature(self.collection.get(id)?);
        self.events
            .emit(self.frame, GlobeEvent::Selected(selection.clone()));
        Some(selection)
    }

    pub fn click_at(&mut self, point: Vec2) -> Option<SelectionEvent> {
        let id = self.pick(point)?;
        self.click(id)
    }

    pub fn events(&self) -> &EventBus<GlobeEvent> {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<Event<GlobeEvent>> {
        self.events.drain()
    }

    /// Writes the current frame to `surface`; does nothing until features
    /// and a usable viewport have been supplied.
    pub fn render(&self, surface: &mut dyn Surface) -> RenderStatus {
        let Some(fit) = self.engine.fit() else {
            debug!("render skipped: projection not fitted");
            return RenderStatus::NotReady;
        };
        if self.collection.is_empty() {
            debug!("render skipped: no features");
            return RenderStatus::NotReady;
        }
        let size = fit.translate;
        let mut frame = RenderFrame::new(2.0 * size.x, 2.0 * size.y);
        if !self.compact {
            frame.push(RenderCommand::Shadow {
                center: Vec2::new(
                    size.x - frame.width / 20.0,
                    size.y + frame.height / 2.06,
                ),
                rx: 1.1 * fit.scale,
                ry: 0.25 * fit.scale,
            });
        }
        frame.push(RenderCommand::Globe {
            center: fit.translate,
            radius: fit.scale,
            top: self.palette.globe_top,
            bottom: self.palette.globe_bottom,
        });
        self.renderer.emit(&self.collection, &mut frame);
        frame.push(RenderCommand::Legend(self.legend.strip()));
        surface.present(&frame);
        RenderStatus::Presented
    }

    pub fn collection(&self) -> &FeatureCollection {
        &self.collection
    }

    pub fn metric(&self) -> Metric {
        self.fill.metric
    }

    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    pub fn rotation(&self) -> Rotation {
        self.engine.rotation()
    }

    pub fn fit(&self) -> Option<Fit> {
        self.engine.fit()
    }

    pub fn has_interacted(&self) -> bool {
        self.controller.has_interacted()
    }

    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    pub fn is_animating(&self) -> bool {
        self.renderer.is_animating()
    }

    pub fn renderer(&self) -> &FeatureRenderer {
        &self.renderer
    }

    fn refresh(&mut self) {
        if self.engine.refit(&self.collection, self.viewport) == RefitOutcome::NotReady {
            return;
        }
        self.redraw(self.controller.redraw_mode());
    }

    fn redraw(&mut self, mode: RedrawMode) {
        if self.collection.is_empty() {
            return;
        }
        let Some(paths) = self.engine.path_generator() else {
            debug!("redraw skipped: projection not fitted");
            return;
        };
        self.renderer
            .redraw(&self.collection, &paths, &self.fill, mode, self.frame.time);
    }
}
