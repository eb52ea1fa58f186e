use super::animation::{ChartAnimation, CompletionCallback, PointProjection};
use super::data::ChartData;
use super::locate_positions;
use super::renderer::{ChartLayer, ChartRenderer};
use super::settings::ChartSettings;
use crate::aspects::{AspectCalculator, AspectMatch};
use crate::layout::{LayoutError, LocatedPoint, Universe};
use std::time::Duration;

/// Transiting bodies drawn on a ring outside a radix chart
pub struct TransitChart<'a> {
    settings: &'a ChartSettings,
    radix: &'a ChartData,
    data: ChartData,
    universe: Universe,
}

impl<'a> TransitChart<'a> {
    /// `universe` must already carry the radix chart's shift
    pub fn new(
        universe: Universe,
        radix: &'a ChartData,
        data: ChartData,
        settings: &'a ChartSettings,
    ) -> Self {
        Self {
            settings,
            radix,
            data,
            universe,
        }
    }

    pub fn data(&self) -> &ChartData {
        &self.data
    }

    pub fn point_radius(&self) -> f64 {
        self.settings.transit_point_radius(self.universe.radius)
    }

    pub fn locate_points(&self) -> Result<Vec<LocatedPoint>, LayoutError> {
        locate_positions(
            &self.data.planets,
            &self.universe,
            self.point_radius(),
            self.settings.collision_radius,
        )
    }

    /// Aspects from the transiting bodies to the radix bodies
    pub fn aspects(&self) -> Vec<AspectMatch> {
        AspectCalculator::new(Some(&self.radix.planets), &self.settings.aspects)
            .transit(Some(&self.data.planets))
    }

    pub fn render(&self, renderer: &mut dyn ChartRenderer) -> Result<(), LayoutError> {
        let points = self.locate_points()?;
        renderer.draw_points(ChartLayer::Transit, &points);
        renderer.draw_aspects(&self.aspects());
        Ok(())
    }

    pub fn projection(&self) -> PointProjection {
        PointProjection {
            universe: self.universe,
            radius: self.point_radius(),
            layer: ChartLayer::Transit,
        }
    }

    /// Running animation from the current transit state to `target`.
    ///
    /// The host drives it frame by frame and calls [`TransitChart::apply`]
    /// with the same target once it has finished.
    pub fn animate(
        &self,
        target: &ChartData,
        duration: Duration,
        reverse: bool,
        on_complete: Option<CompletionCallback>,
    ) -> ChartAnimation {
        let mut animation = ChartAnimation::new(&self.data, self.projection(), self.settings);
        animation.start(target, duration, reverse, on_complete);
        animation
    }

    /// Replace the transit data, e.g. after an animation reached its target
    pub fn apply(&mut self, data: ChartData) {
        self.data = data;
    }
}
