//! Per-country fills and outlines, with animated redraws.
//!
//! Each feature keeps three path buffers (displayed, transition start and
//! target) that live as long as the renderer, so redraws only overwrite
//! points. An animated redraw starts from whatever is currently displayed;
//! an instant redraw cancels any running transition. Fills only animate
//! between two data colors: a feature gaining or losing its value switches
//! fill and class together.

use foundation::time::Time;
use render::{RenderCommand, RenderFrame, Rgb, ScreenPath};
use runtime::{Easing, Transition};
use scene::{FeatureCollection, Metric, MobilityRecord, NoDataPolicy};
use tracing::debug;

use crate::path::{PathGenerator, PathScratch};
use crate::symbology::DivergingScale;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RedrawMode {
    /// Apply geometry and fills immediately (active drag).
    Instant,
    /// Interpolate from the displayed state.
    Animated,
}

/// Decides a feature's fill and whether it is styled as "no data".
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FillRule {
    pub scale: DivergingScale,
    pub metric: Metric,
    pub policy: NoDataPolicy,
    pub no_data_fill: Rgb,
}

impl FillRule {
    /// `(fill, no_data)`; both come from the same lookup.
    pub fn resolve(&self, record: &MobilityRecord) -> (Rgb, bool) {
        match record
            .value(self.metric, self.policy)
            .and_then(|v| self.scale.color(v))
        {
            Some(fill) => (fill, false),
            None => (self.no_data_fill, true),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct FeatureState {
    displayed: ScreenPath,
    from: ScreenPath,
    target: ScreenPath,
    fill: Rgb,
    from_fill: Rgb,
    target_fill: Rgb,
    no_data: bool,
    /// Path is being interpolated in the running transition.
    morph: bool,
}

impl FeatureState {
    fn snap(&mut self) {
        self.displayed.copy_from(&self.target);
        self.fill = self.target_fill;
        self.morph = false;
    }

    fn sample(&mut self, t: f64) {
        if self.morph {
            self.displayed.blend(&self.from, &self.target, t);
        }
        self.fill = self.from_fill.lerp(self.target_fill, t);
    }
}

#[derive(Debug, Clone)]
pub struct FeatureRenderer {
    states: Vec<FeatureState>,
    scratch: PathScratch,
    transition: Option<Transition>,
    duration_s: f64,
    easing: Easing,
}

impl FeatureRenderer {
    pub fn new(duration_s: f64, easing: Easing) -> Self {
        Self {
            states: Vec::new(),
            scratch: PathScratch::new(),
            transition: None,
            duration_s,
            easing,
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Projects every feature and recomputes fills.
    ///
    /// Features are matched to their previous state by position; newly added
    /// positions appear without interpolation.
    pub fn redraw(
        &mut self,
        collection: &FeatureCollection,
        paths: &PathGenerator,
        fills: &FillRule,
        mode: RedrawMode,
        now: Time,
    ) {
        let previous = self.states.len();
        let n = collection.len();
        self.states.truncate(n);
        self.states.resize_with(n, FeatureState::default);

        let animate = mode == RedrawMode::Animated && self.duration_s > 0.0;
        for (idx, (state, feature)) in self.states.iter_mut().zip(collection.features()).enumerate() {
            let (fill, no_data) = fills.resolve(&feature.record);
            let class_changed = state.no_data != no_data;
            state.target_fill = fill;
            state.no_data = no_data;
            paths.write_with(&feature.geometry, &mut self.scratch, &mut state.target);

            if animate && idx < previous {
                if class_changed {
                    state.fill = fill;
                }
                state.from.copy_from(&state.displayed);
                state.from_fill = state.fill;
                state.morph = state.from.same_shape(&state.target);
                if !state.morph {
                    state.displayed.copy_from(&state.target);
                }
            } else {
                state.snap();
            }
        }

        self.transition = if animate && previous > 0 {
            Some(Transition::new(now, self.duration_s, self.easing))
        } else {
            if self.transition.is_some() {
                debug!("transition interrupted");
            }
            None
        };
    }

    /// Advances the running transition. Returns `true` while still animating.
    pub fn tick(&mut self, now: Time) -> bool {
        let Some(transition) = self.transition else {
            return false;
        };
        if transition.is_finished(now) {
            for state in &mut self.states {
                state.snap();
            }
            self.transition = None;
            return false;
        }
        let t = transition.progress(now);
        for state in &mut self.states {
            state.sample(t);
        }
        true
    }

    /// Appends one command per feature with a visible outline, in
    /// collection order.
    pub fn emit<'a>(&'a self, collection: &'a FeatureCollection, frame: &mut RenderFrame<'a>) {
        for (state, feature) in self.states.iter().zip(collection.features()) {
            if state.displayed.is_empty() {
                continue;
            }
            frame.push(RenderCommand::Feature {
                index: feature.id.0,
                code: &feature.record.country_code,
                path: &state.displayed,
                fill: state.fill,
                no_data: state.no_data,
            });
        }
    }

    /// Displayed outlines in paint order.
    pub fn displayed_paths(&self) -> impl DoubleEndedIterator<Item = &ScreenPath> + ExactSizeIterator {
        self.states.iter().map(|s| &s.displayed)
    }

    pub fn displayed_fill(&self, index: usize) -> Option<Rgb> {
        self.states.get(index).map(|s| s.fill)
    }

    pub fn is_no_data(&self, index: usize) -> Option<bool> {
        self.states.get(index).map(|s| s.no_data)
    }

    pub fn displayed_path(&self, index: usize) -> Option<&ScreenPath> {
        self.states.get(index).map(|s| &s.displayed)
    }
}
