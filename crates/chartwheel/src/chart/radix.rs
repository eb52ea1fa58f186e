use super::data::ChartData;
use super::locate_positions;
use super::renderer::{ChartLayer, ChartRenderer};
use super::settings::ChartSettings;
use super::transit::TransitChart;
use crate::aspects::{AspectCalculator, AspectMatch};
use crate::layout::{LayoutError, LocatedPoint, Universe};

/// Natal wheel: bodies laid out inside the zodiac ring
pub struct RadixChart<'a> {
    settings: &'a ChartSettings,
    data: &'a ChartData,
    universe: Universe,
}

impl<'a> RadixChart<'a> {
    /// The ascendant (first cusp) is drawn at `shift_in_degrees`; without
    /// cusps 0° longitude is.
    pub fn new(universe: Universe, data: &'a ChartData, settings: &'a ChartSettings) -> Self {
        let shift = settings.shift_in_degrees - data.first_cusp().unwrap_or(0.0);
        Self {
            settings,
            data,
            universe: universe.with_shift(shift),
        }
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn data(&self) -> &ChartData {
        self.data
    }

    pub fn point_radius(&self) -> f64 {
        self.settings.radix_point_radius(self.universe.radius)
    }

    /// Collision-free positions of every body, sorted by display angle
    pub fn locate_points(&self) -> Result<Vec<LocatedPoint>, LayoutError> {
        locate_positions(
            &self.data.planets,
            &self.universe,
            self.point_radius(),
            self.settings.collision_radius,
        )
    }

    pub fn aspects(&self) -> Vec<AspectMatch> {
        AspectCalculator::new(Some(&self.data.planets), &self.settings.aspects)
            .radix(Some(&self.data.planets))
    }

    /// Draw bodies then aspects. A layout failure aborts before anything is drawn.
    pub fn render(&self, renderer: &mut dyn ChartRenderer) -> Result<(), LayoutError> {
        let points = self.locate_points()?;
        renderer.draw_points(ChartLayer::Radix, &points);
        renderer.draw_aspects(&self.aspects());
        Ok(())
    }

    /// Transit wheel around this chart, sharing its center and orientation
    pub fn transit(&self, data: ChartData) -> TransitChart<'a> {
        TransitChart::new(self.universe, self.data, data, self.settings)
    }
}
