pub mod animation;
pub mod data;
pub mod loader;
pub mod radix;
pub mod renderer;
pub mod settings;
pub mod timer;
pub mod transit;

pub use animation::{AnimationState, ChartAnimation, CompletionCallback, PointProjection};
pub use data::{ChartData, PositionEntry, Positions};
pub use loader::{load_chart_data_from_json, validate_chart_data, ChartDataError, ValidationStatus};
pub use radix::RadixChart;
pub use renderer::{ChartLayer, ChartRenderer, RecordingRenderer, RenderCall};
pub use settings::{ChartSettings, SettingsError};
pub use timer::FrameTimer;
pub use transit::TransitChart;

use crate::layout::{assemble, LayoutError, LocatedPoint, Universe};

/// Lay out every body on one ring, in name order
pub fn locate_positions(
    positions: &Positions,
    universe: &Universe,
    radius: f64,
    tolerance: f64,
) -> Result<Vec<LocatedPoint>, LayoutError> {
    positions
        .iter()
        .try_fold(Vec::with_capacity(positions.len()), |located, (name, entry)| {
            let point = LocatedPoint::new(name.as_str(), entry.longitude, radius, universe)
                .with_retrograde(entry.is_retrograde());
            assemble(located, point, universe, tolerance)
        })
}
